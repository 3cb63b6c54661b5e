#![forbid(unsafe_code)]
use roulement::model::ShiftLabel::{self, Day, Evening, Night, Off};
use roulement::{
    detect_violations, GenerationConfig, Headcount, Person, PersonId, Roster, Schedule,
    StaffingPlan, TargetMonth, Violation, ViolationKind,
};

fn february(target_off_days: u32) -> GenerationConfig {
    GenerationConfig::new(
        TargetMonth::new(2026, 2).unwrap(),
        target_off_days,
        StaffingPlan::fixed(Headcount::new(1, 0, 0)),
    )
}

fn schedule_for(id: PersonId, row: &[ShiftLabel]) -> Schedule {
    let mut schedule = Schedule::new();
    for (i, shift) in row.iter().enumerate() {
        schedule.set(i as u32 + 1, id, *shift);
    }
    schedule
}

#[test]
fn reports_each_broken_rule_once() {
    let person = Person::new(1, "Alice", 10).with_preference(5, Off);
    let id = person.id;
    let roster = Roster::new(vec![person]);

    let mut row = vec![Night, Off, Day, Day, Day, Day, Day, Day, Day, Night, Evening, Off, Night, Off, Night];
    row.resize(28, Off);
    let schedule = schedule_for(id, &row);

    let violations = detect_violations(&schedule, &roster, &february(0));
    let found: Vec<(u32, ViolationKind)> = violations.iter().map(|v| (v.day, v.kind)).collect();
    assert_eq!(
        found,
        vec![
            (3, ViolationKind::NightOffDay),
            (5, ViolationKind::OffPreferenceIgnored),
            (8, ViolationKind::ConsecutiveWork),
            (11, ViolationKind::NightFollowedByWork),
            (15, ViolationKind::NightCap),
        ]
    );
    assert!(violations.iter().all(|v| v.person == Some(id) && v.kind.is_hard()));
}

#[test]
fn soft_findings_for_quota_and_seniority() {
    let junior = Person::new(1, "Bob", 1);
    let id = junior.id;
    let roster = Roster::new(vec![junior]);

    let mut row = vec![Day, Off, Off];
    row.resize(28, Off);
    let schedule = schedule_for(id, &row);

    // 27 repos pour un quota de 28 : dans la tolérance de 2 jours
    let violations = detect_violations(&schedule, &roster, &february(28));
    assert_eq!(
        violations,
        vec![Violation {
            person: None,
            day: 1,
            kind: ViolationKind::NoSenior(Day),
        }]
    );

    let all_day = schedule_for(id, &[Day; 28]);
    let violations = detect_violations(&all_day, &roster, &february(10));
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::OffQuotaMissed && v.day == 28));
    assert!(violations.iter().any(|v| !v.kind.is_hard()));
}

#[test]
fn missing_cells_are_reported() {
    let person = Person::new(1, "Alice", 6);
    let id = person.id;
    let roster = Roster::new(vec![person]);
    let schedule = schedule_for(id, &[Off; 27]);

    let violations = detect_violations(&schedule, &roster, &february(0));
    assert_eq!(
        violations,
        vec![Violation {
            person: Some(id),
            day: 28,
            kind: ViolationKind::Missing,
        }]
    );
}
