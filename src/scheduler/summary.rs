use super::state::ShiftCounts;
use crate::model::{PersonId, Roster, Schedule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totaux d'une personne sur le planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub person: PersonId,
    pub name: String,
    pub counts: ShiftCounts,
    pub total_work_days: u32,
}

pub type Summary = BTreeMap<PersonId, PersonSummary>;

/// Agrège un planning (fonction pure, sert uniquement au reporting).
pub fn summarize(schedule: &Schedule, roster: &Roster) -> Summary {
    roster
        .people
        .iter()
        .map(|person| {
            let mut counts = ShiftCounts::default();
            for (_, row) in schedule.days() {
                if let Some(shift) = row.get(&person.id) {
                    counts.increment(*shift);
                }
            }
            let summary = PersonSummary {
                person: person.id,
                name: person.name.clone(),
                counts,
                total_work_days: counts.work(),
            };
            (person.id, summary)
        })
        .collect()
}
