#![forbid(unsafe_code)]
use roulement::model::ShiftLabel::{self, Day, Evening, Night, Off};
use roulement::scheduler::PersonState;

fn run(shifts: &[ShiftLabel]) -> PersonState {
    let mut state = PersonState::new();
    for s in shifts {
        state.apply(*s);
    }
    state
}

#[test]
fn off_resets_streaks() {
    let state = run(&[Day, Evening, Off]);
    assert_eq!(state.work_days, 2);
    assert_eq!(state.off_days, 1);
    assert_eq!(state.consecutive_work, 0);
    assert_eq!(state.consecutive_nights, 0);
    assert_eq!(state.last_shift, Some(Off));
    assert_eq!(state.two_days_ago, Some(Evening));
}

#[test]
fn night_sets_and_releases_post_night_counter() {
    let mut state = run(&[Day, Night]);
    assert_eq!(state.total_nights, 1);
    assert_eq!(state.consecutive_nights, 1);
    assert_eq!(state.off_count_after_night, 1);
    assert_eq!(state.consecutive_work, 2);

    state.apply(Off);
    assert_eq!(state.off_count_after_night, 0);
    assert_eq!(state.two_days_ago, Some(Night));
    assert_eq!(state.last_shift, Some(Off));
}

#[test]
fn day_after_night_resets_consecutive_nights() {
    let state = run(&[Night, Night, Evening]);
    assert_eq!(state.total_nights, 2);
    assert_eq!(state.consecutive_nights, 0);
    assert_eq!(state.consecutive_work, 3);
}

#[test]
fn counters_stay_consistent() {
    let seq = [Day, Day, Evening, Off, Night, Off, Off, Day, Evening, Off];
    let state = run(&seq);
    let counts = state.shift_counts;

    assert_eq!(state.days_processed(), seq.len() as u32);
    assert_eq!(counts.off, state.off_days);
    assert_eq!(counts.day + counts.evening + counts.night, state.work_days);
    assert_eq!(counts.get(Day), 3);
    assert_eq!(counts.get(Evening), 2);
    assert_eq!(counts.get(Night), 1);
    assert_eq!(counts.get(Off), 4);
    assert!(state.met_off_quota(4));
    assert!(!state.met_off_quota(5));
}
