use crate::model::{PersonId, ShiftLabel};
use thiserror::Error;

/// Motif de refus d'une affectation, dans l'ordre de précédence des règles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Nuit → Repos → Jour.
    NightRestGap,
    ConsecutiveWork,
    PostNightRest,
    NightCap,
    EveningToDay,
    NightToWork,
    /// Trop en retard sur le rythme des repos.
    OffPaceDeficit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }
}

/// Étape du planificateur ayant fixé un poste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Preference,
    Staffing,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    NightFollowedByWork,
    NightOffDay,
    ConsecutiveWork,
    NightCap,
    OffPreferenceIgnored,
    OffQuotaMissed,
    /// Poste staffé sans senior ce jour-là.
    NoSenior(ShiftLabel),
    Missing,
}

impl ViolationKind {
    /// Les règles souples (couverture senior, quota de repos) ne bloquent pas.
    pub fn is_hard(self) -> bool {
        !matches!(self, ViolationKind::NoSenior(_) | ViolationKind::OffQuotaMissed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub person: Option<PersonId>,
    pub day: u32,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("unknown person: {0}")]
    UnknownPerson(PersonId),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
