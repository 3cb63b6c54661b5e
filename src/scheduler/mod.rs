mod assignment;
mod conflicts;
mod eligibility;
mod state;
mod summary;
mod types;
mod util;

pub use eligibility::{can_assign, evaluate, OffPace};
pub use state::{PersonState, ShiftCounts};
pub use summary::{summarize, PersonSummary, Summary};
pub use types::{Rejection, Resolution, SchedError, Verdict, Violation, ViolationKind};

use crate::config::GenerationConfig;
use crate::model::{PersonId, Roster, Schedule, ShiftLabel};

/// Résultat d'une génération : planning complet + totaux.
#[derive(Debug, Clone)]
pub struct Generation {
    pub schedule: Schedule,
    pub summary: Summary,
}

/// Génère le planning du mois pour `roster` (aucun résultat partiel en cas d'erreur).
pub fn generate_schedule(
    roster: &Roster,
    config: &GenerationConfig,
) -> Result<Generation, SchedError> {
    let schedule = assignment::generate(roster, config)?;
    let summary = summarize(&schedule, roster);
    Ok(Generation { schedule, summary })
}

/// Écarts d'un planning aux règles (dures et souples).
pub fn detect_violations(
    schedule: &Schedule,
    roster: &Roster,
    config: &GenerationConfig,
) -> Vec<Violation> {
    conflicts::detect_violations(schedule, roster, config)
}

/// Scheduler : encapsule le roster édité par l'appelant
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn with_roster(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Pose ou efface la préférence d'une personne pour un jour.
    pub fn set_preference(
        &mut self,
        person: PersonId,
        day: u32,
        shift: Option<ShiftLabel>,
    ) -> Result<(), SchedError> {
        let p = self
            .roster
            .find_person_mut_by_id(person)
            .ok_or(SchedError::UnknownPerson(person))?;
        p.set_preference(day, shift);
        Ok(())
    }

    pub fn generate(&self, config: &GenerationConfig) -> Result<Generation, SchedError> {
        generate_schedule(&self.roster, config)
    }

    pub fn detect_violations(
        &self,
        schedule: &Schedule,
        config: &GenerationConfig,
    ) -> Vec<Violation> {
        conflicts::detect_violations(schedule, &self.roster, config)
    }
}
