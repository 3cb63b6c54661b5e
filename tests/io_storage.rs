#![forbid(unsafe_code)]
use roulement::model::ShiftLabel::{Day, Night, Off};
use roulement::{
    generate_schedule, io, load_config_from_file, summarize, GenerationConfig, JsonStorage,
    Person, PersonId, Roster, Rules, Schedule, Storage, Workspace,
};
use std::fs;
use tempfile::tempdir;

fn tiny() -> (Roster, Schedule) {
    let roster = Roster::new(vec![Person::new(1, "Alice", 6), Person::new(2, "Bob", 2)]);
    let mut schedule = Schedule::new();
    schedule.set(1, PersonId::new(1), Day);
    schedule.set(1, PersonId::new(2), Night);
    schedule.set(2, PersonId::new(1), Off);
    schedule.set(2, PersonId::new(2), Off);
    (roster, schedule)
}

#[test]
fn import_roster_with_preferences() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(
        &path,
        "id,name,experience,preferences\n1,Alice,6,5:OFF;12:n\n2,Bob,2,\n3,Chloé,9\n",
    )
    .unwrap();

    let roster = io::import_roster_csv(&path).unwrap();
    assert_eq!(roster.len(), 3);
    let alice = roster.find_person_by_id(PersonId::new(1)).unwrap();
    assert_eq!(alice.preference(5), Some(Off));
    assert_eq!(alice.preference(12), Some(Night));
    assert_eq!(alice.preference(13), None);
    assert!(roster.people[1].preferences.is_empty());
    assert_eq!(roster.people[2].name, "Chloé");
    assert_eq!(roster.people[2].experience_years, 9);
}

#[test]
fn import_rejects_bad_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "id,name,experience\n1,Alice,six\n").unwrap();
    assert!(io::import_roster_csv(&path).is_err());

    fs::write(&path, "id,name,experience,preferences\n1,Alice,3,5:X\n").unwrap();
    assert!(io::import_roster_csv(&path).is_err());
}

#[test]
fn schedule_csv_layout() {
    let (roster, schedule) = tiny();
    let mut w = csv::Writer::from_writer(vec![]);
    io::write_schedule(&mut w, &schedule, &roster).unwrap();
    let data = String::from_utf8(w.into_inner().unwrap()).unwrap();
    insta::assert_snapshot!(data.trim_end(), @r"
    id,name,1,2
    1,Alice,D,OFF
    2,Bob,N,OFF
    ");
}

#[test]
fn summary_csv_layout() {
    let (roster, schedule) = tiny();
    let summary = summarize(&schedule, &roster);
    let mut w = csv::Writer::from_writer(vec![]);
    io::write_summary(&mut w, &summary).unwrap();
    let data = String::from_utf8(w.into_inner().unwrap()).unwrap();
    insta::assert_snapshot!(data.trim_end(), @r"
    id,name,D,E,N,OFF,work
    1,Alice,1,0,0,1,1
    2,Bob,0,0,1,1,1
    ");
}

#[test]
fn schedule_json_round_trip() {
    let (_, schedule) = tiny();
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    io::export_schedule_json(&path, &schedule).unwrap();
    let back: Schedule = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(back, schedule);
}

#[test]
fn config_defaults_when_loading() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"month":"2026-01","target_off_days":12,"staffing":{"base":{"day":3,"evening":3,"night":2}}}"#,
    )
    .unwrap();

    let config = load_config_from_file(&path).unwrap();
    assert_eq!(config.month.to_string(), "2026-01");
    assert_eq!(config.rules, Rules::default());
    assert_eq!(config.senior_threshold, 4);
    assert!((config.near_tie_epsilon - 0.1).abs() < f64::EPSILON);
    assert_eq!(config.seed, None);
    assert!(config.staffing.weekend.is_none());

    fs::write(&path, r#"{"month":"2026-13","target_off_days":12}"#).unwrap();
    assert!(load_config_from_file(&path).is_err());
}

#[test]
fn workspace_save_and_load() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("roulement.json")).unwrap();
    assert!(!storage.exists());

    let roster = Roster::with_default_staff(10);
    let config = GenerationConfig::new(
        "2026-01".parse().unwrap(),
        12,
        Default::default(),
    )
    .with_seed(9);
    let generation = generate_schedule(&roster, &config).unwrap();
    let mut ws = Workspace::new(config.clone(), roster.clone());
    ws.schedule = Some(generation.schedule.clone());
    storage.save(&ws).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.config, config);
    assert_eq!(loaded.roster, roster);
    assert_eq!(loaded.schedule, Some(generation.schedule));
}
