use super::types::{Violation, ViolationKind};
use crate::config::GenerationConfig;
use crate::model::{Person, Roster, Schedule, ShiftLabel};

/// Relit un planning complet et liste les écarts aux règles.
pub(super) fn detect_violations(
    schedule: &Schedule,
    roster: &Roster,
    config: &GenerationConfig,
) -> Vec<Violation> {
    let mut out = Vec::new();

    for person in &roster.people {
        let row: Vec<Option<ShiftLabel>> = config
            .month
            .days()
            .map(|day| schedule.get(day, person.id))
            .collect();
        scan_person(person, &row, config, &mut out);
    }

    for day in config.month.days() {
        for shift in ShiftLabel::WORK {
            let assigned: Vec<&Person> = roster
                .people
                .iter()
                .filter(|p| schedule.get(day, p.id) == Some(shift))
                .collect();
            if !assigned.is_empty()
                && !assigned
                    .iter()
                    .any(|p| p.experience_years > config.senior_threshold)
            {
                out.push(Violation {
                    person: None,
                    day,
                    kind: ViolationKind::NoSenior(shift),
                });
            }
        }
    }

    out
}

fn scan_person(
    person: &Person,
    row: &[Option<ShiftLabel>],
    config: &GenerationConfig,
    out: &mut Vec<Violation>,
) {
    let mut push = |day: u32, kind: ViolationKind| {
        out.push(Violation {
            person: Some(person.id),
            day,
            kind,
        })
    };

    let mut streak = 0u32;
    let mut nights = 0u32;
    let mut offs = 0u32;

    for (idx, shift) in row.iter().enumerate() {
        let day = idx as u32 + 1;
        let Some(shift) = *shift else {
            push(day, ViolationKind::Missing);
            streak = 0;
            continue;
        };

        let prev = idx.checked_sub(1).and_then(|i| row[i]);
        let prev2 = idx.checked_sub(2).and_then(|i| row[i]);

        if prev == Some(ShiftLabel::Night) && shift.is_work() {
            push(day, ViolationKind::NightFollowedByWork);
        }
        if prev2 == Some(ShiftLabel::Night)
            && prev == Some(ShiftLabel::Off)
            && shift == ShiftLabel::Day
        {
            push(day, ViolationKind::NightOffDay);
        }

        if shift.is_work() {
            streak += 1;
            if streak == config.rules.max_consecutive_work + 1 {
                push(day, ViolationKind::ConsecutiveWork);
            }
        } else {
            streak = 0;
            offs += 1;
        }

        if shift == ShiftLabel::Night {
            nights += 1;
            if nights == config.rules.max_nights_per_month + 1 {
                push(day, ViolationKind::NightCap);
            }
        }

        if person.preference(day) == Some(ShiftLabel::Off) && shift != ShiftLabel::Off {
            push(day, ViolationKind::OffPreferenceIgnored);
        }
    }

    let floor = f64::from(config.target_off_days) - config.rules.off_deficit_tolerance;
    if f64::from(offs) < floor {
        push(row.len() as u32, ViolationKind::OffQuotaMissed);
    }
}
