#![forbid(unsafe_code)]
use roulement::config::Rules;
use roulement::model::ShiftLabel::{Day, Evening, Night, Off};
use roulement::scheduler::{can_assign, evaluate, OffPace, PersonState, Rejection, Verdict};

const PACE: OffPace = OffPace {
    target_off_days: 12,
    total_days: 31,
};

fn rules() -> Rules {
    Rules::default()
}

#[test]
fn fresh_state_accepts_everything_on_day_one() {
    let state = PersonState::new();
    for shift in [Day, Evening, Night, Off] {
        assert!(can_assign(&state, 1, Some(shift), PACE, &rules()));
    }
    assert!(can_assign(&state, 1, None, PACE, &rules()));
}

#[test]
fn night_off_day_gap() {
    let state = PersonState {
        last_shift: Some(Off),
        two_days_ago: Some(Night),
        off_days: 1,
        ..PersonState::default()
    };
    assert_eq!(
        evaluate(&state, 3, Some(Day), PACE, &rules()),
        Verdict::Reject(Rejection::NightRestGap)
    );
    assert_eq!(evaluate(&state, 3, Some(Evening), PACE, &rules()), Verdict::Accept);
}

#[test]
fn consecutive_work_cap() {
    let state = PersonState {
        consecutive_work: 5,
        work_days: 5,
        last_shift: Some(Day),
        off_days: 12,
        ..PersonState::default()
    };
    assert_eq!(
        evaluate(&state, 6, Some(Day), PACE, &rules()),
        Verdict::Reject(Rejection::ConsecutiveWork)
    );
    assert_eq!(
        evaluate(&state, 6, None, PACE, &rules()),
        Verdict::Reject(Rejection::ConsecutiveWork)
    );
    assert_eq!(evaluate(&state, 6, Some(Off), PACE, &rules()), Verdict::Accept);
}

#[test]
fn post_night_rest_comes_after_consecutive_cap() {
    let mut state = PersonState {
        last_shift: Some(Night),
        off_count_after_night: 1,
        total_nights: 1,
        consecutive_work: 2,
        ..PersonState::default()
    };
    assert_eq!(
        evaluate(&state, 3, Some(Evening), PACE, &rules()),
        Verdict::Reject(Rejection::PostNightRest)
    );

    state.consecutive_work = 5;
    assert_eq!(
        evaluate(&state, 6, Some(Evening), PACE, &rules()),
        Verdict::Reject(Rejection::ConsecutiveWork)
    );
}

#[test]
fn night_cap() {
    let state = PersonState {
        total_nights: 3,
        last_shift: Some(Off),
        off_days: 6,
        ..PersonState::default()
    };
    assert_eq!(
        evaluate(&state, 15, Some(Night), PACE, &rules()),
        Verdict::Reject(Rejection::NightCap)
    );
    assert_eq!(evaluate(&state, 15, Some(Evening), PACE, &rules()), Verdict::Accept);

    let relaxed = Rules {
        max_nights_per_month: 4,
        ..Rules::default()
    };
    assert_eq!(evaluate(&state, 15, Some(Night), PACE, &relaxed), Verdict::Accept);
}

#[test]
fn evening_then_day_is_banned() {
    let state = PersonState {
        last_shift: Some(Evening),
        consecutive_work: 1,
        ..PersonState::default()
    };
    assert_eq!(
        evaluate(&state, 2, Some(Day), PACE, &rules()),
        Verdict::Reject(Rejection::EveningToDay)
    );
    assert_eq!(evaluate(&state, 2, Some(Night), PACE, &rules()), Verdict::Accept);
    assert_eq!(evaluate(&state, 2, Some(Evening), PACE, &rules()), Verdict::Accept);
}

#[test]
fn night_must_be_followed_by_off() {
    let state = PersonState {
        last_shift: Some(Night),
        off_count_after_night: 0,
        ..PersonState::default()
    };
    assert_eq!(
        evaluate(&state, 2, Some(Evening), PACE, &rules()),
        Verdict::Reject(Rejection::NightToWork)
    );
    assert_eq!(
        evaluate(&state, 2, None, PACE, &rules()),
        Verdict::Reject(Rejection::NightToWork)
    );
    assert_eq!(evaluate(&state, 2, Some(Off), PACE, &rules()), Verdict::Accept);
}

#[test]
fn off_pace_throttle() {
    let behind = PersonState {
        work_days: 5,
        consecutive_work: 0,
        last_shift: Some(Day),
        ..PersonState::default()
    };
    // 12 * 5 / 31 ≈ 1.94 : retard toléré
    assert_eq!(evaluate(&behind, 5, Some(Day), PACE, &rules()), Verdict::Accept);
    // 12 * 6 / 31 ≈ 2.32 : au-delà de 2 jours de retard
    assert_eq!(
        evaluate(&behind, 6, Some(Day), PACE, &rules()),
        Verdict::Reject(Rejection::OffPaceDeficit)
    );
    assert!(!can_assign(&behind, 6, None, PACE, &rules()));
}

#[test]
fn met_quota_accepts_unconditionally() {
    let state = PersonState {
        off_days: 12,
        work_days: 3,
        last_shift: Some(Day),
        ..PersonState::default()
    };
    assert_eq!(evaluate(&state, 30, Some(Day), PACE, &rules()), Verdict::Accept);
    assert!((PACE.deficit(&state, 31) - 0.0).abs() < 1e-9);
}
