use super::state::PersonState;
use super::types::{Rejection, Verdict};
use crate::config::Rules;
use crate::model::ShiftLabel;

/// Rythme cible des repos sur le mois.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffPace {
    pub target_off_days: u32,
    pub total_days: u32,
}

impl OffPace {
    pub fn new(target_off_days: u32, total_days: u32) -> Self {
        Self {
            target_off_days,
            total_days,
        }
    }

    pub fn expected_by(&self, day: u32) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        f64::from(self.target_off_days) * f64::from(day) / f64::from(self.total_days)
    }

    /// Avance (positive) ou retard (négatif) sur les repos attendus au jour `day`.
    pub fn deficit(&self, state: &PersonState, day: u32) -> f64 {
        f64::from(state.off_days) - self.expected_by(day)
    }
}

/// Évalue les règles dans l'ordre ; la première règle violée l'emporte.
///
/// `candidate == None` interroge seulement « peut-elle travailler aujourd'hui ».
pub fn evaluate(
    state: &PersonState,
    day: u32,
    candidate: Option<ShiftLabel>,
    pace: OffPace,
    rules: &Rules,
) -> Verdict {
    let works = candidate != Some(ShiftLabel::Off);

    if state.last_shift == Some(ShiftLabel::Off)
        && candidate == Some(ShiftLabel::Day)
        && state.two_days_ago == Some(ShiftLabel::Night)
    {
        return Verdict::Reject(Rejection::NightRestGap);
    }
    if state.consecutive_work >= rules.max_consecutive_work && works {
        return Verdict::Reject(Rejection::ConsecutiveWork);
    }
    if state.off_count_after_night > 0 && state.off_count_after_night < 2 && works {
        return Verdict::Reject(Rejection::PostNightRest);
    }
    if candidate == Some(ShiftLabel::Night) && state.total_nights >= rules.max_nights_per_month {
        return Verdict::Reject(Rejection::NightCap);
    }
    if state.last_shift == Some(ShiftLabel::Evening) && candidate == Some(ShiftLabel::Day) {
        return Verdict::Reject(Rejection::EveningToDay);
    }
    if state.last_shift == Some(ShiftLabel::Night) && works {
        return Verdict::Reject(Rejection::NightToWork);
    }

    if state.met_off_quota(pace.target_off_days) {
        return Verdict::Accept;
    }
    if pace.deficit(state, day) < -rules.off_deficit_tolerance {
        return Verdict::Reject(Rejection::OffPaceDeficit);
    }
    Verdict::Accept
}

pub fn can_assign(
    state: &PersonState,
    day: u32,
    candidate: Option<ShiftLabel>,
    pace: OffPace,
    rules: &Rules,
) -> bool {
    evaluate(state, day, candidate, pace, rules).is_accept()
}
