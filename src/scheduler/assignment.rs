use super::eligibility::{evaluate, OffPace};
use super::state::PersonState;
use super::types::{Resolution, SchedError, Verdict};
use super::util::TieBreaker;
use crate::config::GenerationConfig;
use crate::model::{Person, Roster, Schedule, ShiftLabel};
use std::collections::BTreeMap;

/// Génère le planning du mois, jour après jour.
pub(super) fn generate(roster: &Roster, config: &GenerationConfig) -> Result<Schedule, SchedError> {
    if let Err(err) = config.validate(roster) {
        #[cfg(feature = "logging")]
        tracing::warn!(error = %err, "configuration rejected");
        return Err(err);
    }

    #[cfg(feature = "logging")]
    tracing::info!(
        month = %config.month,
        people = roster.len(),
        target_off_days = config.target_off_days,
        seed = ?config.seed,
        "generating schedule"
    );

    let mut run = Run::new(&roster.people, config);
    let mut schedule = Schedule::new();

    for day in config.month.days() {
        let labels = run.plan_day(day);
        let mut row = BTreeMap::new();
        for (idx, shift) in labels.into_iter().enumerate() {
            run.states[idx].apply(shift);
            row.insert(run.people[idx].id, shift);
        }
        schedule.insert_day(day, row);
    }

    Ok(schedule)
}

/// Affectations provisoires d'une journée, avant application aux états.
struct DayPlan {
    slots: Vec<Option<(ShiftLabel, Resolution)>>,
}

impl DayPlan {
    fn new(n: usize) -> Self {
        Self {
            slots: vec![None; n],
        }
    }

    fn is_resolved(&self, idx: usize) -> bool {
        self.slots[idx].is_some()
    }

    fn bind(&mut self, idx: usize, shift: ShiftLabel, how: Resolution) {
        self.slots[idx] = Some((shift, how));
    }

    fn unbind(&mut self, idx: usize) {
        self.slots[idx] = None;
    }

    fn count(&self, how: Resolution) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Some((_, h)) if *h == how))
            .count()
    }

    fn into_labels(self) -> Vec<ShiftLabel> {
        self.slots
            .into_iter()
            .map(|s| s.map_or(ShiftLabel::Off, |(shift, _)| shift))
            .collect()
    }
}

struct Run<'a> {
    people: &'a [Person],
    states: Vec<PersonState>,
    config: &'a GenerationConfig,
    pace: OffPace,
    tie: TieBreaker,
}

impl<'a> Run<'a> {
    fn new(people: &'a [Person], config: &'a GenerationConfig) -> Self {
        Self {
            people,
            states: vec![PersonState::new(); people.len()],
            config,
            pace: OffPace::new(config.target_off_days, config.total_days()),
            tie: TieBreaker::from_seed(config.seed),
        }
    }

    fn verdict(&self, idx: usize, day: u32, shift: ShiftLabel) -> Verdict {
        evaluate(
            &self.states[idx],
            day,
            Some(shift),
            self.pace,
            &self.config.rules,
        )
    }

    fn eligible(&self, idx: usize, day: u32, shift: ShiftLabel) -> bool {
        self.verdict(idx, day, shift).is_accept()
    }

    fn is_senior(&self, idx: usize) -> bool {
        self.people[idx].experience_years > self.config.senior_threshold
    }

    /// Préférences → effectifs → repos par défaut.
    fn plan_day(&mut self, day: u32) -> Vec<ShiftLabel> {
        let mut plan = DayPlan::new(self.people.len());
        self.bind_preferences(day, &mut plan);
        self.staff(day, &mut plan);
        self.fallback(day, &mut plan);

        #[cfg(feature = "logging")]
        tracing::debug!(
            day,
            preference = plan.count(Resolution::Preference),
            staffing = plan.count(Resolution::Staffing),
            fallback = plan.count(Resolution::Fallback),
            "day resolved"
        );
        debug_assert_eq!(
            plan.count(Resolution::Preference)
                + plan.count(Resolution::Staffing)
                + plan.count(Resolution::Fallback),
            self.people.len()
        );

        plan.into_labels()
    }

    fn bind_preferences(&self, day: u32, plan: &mut DayPlan) {
        for (idx, person) in self.people.iter().enumerate() {
            let Some(wanted) = person.preference(day) else {
                continue;
            };
            // un repos demandé est toujours accordé
            if wanted == ShiftLabel::Off {
                plan.bind(idx, wanted, Resolution::Preference);
                continue;
            }
            match self.verdict(idx, day, wanted) {
                Verdict::Accept => plan.bind(idx, wanted, Resolution::Preference),
                Verdict::Reject(_reason) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!(day, person = %person.id, shift = %wanted, reason = ?_reason, "preference rejected");
                }
            }
        }
    }

    fn staff(&mut self, day: u32, plan: &mut DayPlan) {
        let need = self.config.staffing.for_day(self.config.month, day);
        let tie_keys = self.tie.keys(self.people);
        let target = self.config.target_off_days;
        let target_ratio =
            f64::from(self.config.target_work_days()) / f64::from(self.pace.total_days.max(1));
        let elapsed = f64::from(day.max(1));
        let epsilon = self.config.near_tie_epsilon;

        // Quota atteint en dernier, puis écart au ratio cible par tranches d'epsilon.
        let mut order: Vec<usize> = (0..self.people.len())
            .filter(|idx| !plan.is_resolved(*idx))
            .collect();
        order.sort_by_key(|&idx| {
            let state = &self.states[idx];
            let deviation = (f64::from(state.work_days) / elapsed - target_ratio).abs();
            // tranches fixes : deux écarts à moins d'epsilon peuvent tomber de part et d'autre d'une borne
            let band = (deviation / epsilon).floor() as u64;
            (state.met_off_quota(target), band, tie_keys[idx])
        });

        for shift in self.tie.label_order() {
            let wanted = need.get(shift) as usize;
            if wanted == 0 {
                continue;
            }

            let mut candidates: Vec<usize> = order
                .iter()
                .copied()
                .filter(|idx| !plan.is_resolved(*idx))
                .collect();
            candidates.sort_by_key(|&idx| self.states[idx].shift_counts.get(shift));

            let mut bound: Vec<usize> = Vec::with_capacity(wanted);
            let mut spare_senior: Option<usize> = None;
            for idx in candidates {
                if bound.len() >= wanted
                    && (spare_senior.is_some() || bound.iter().any(|b| self.is_senior(*b)))
                {
                    break;
                }
                if !self.eligible(idx, day, shift) {
                    continue;
                }
                if bound.len() < wanted {
                    plan.bind(idx, shift, Resolution::Staffing);
                    bound.push(idx);
                } else if self.is_senior(idx) {
                    spare_senior = Some(idx);
                }
            }

            // équipe complète sans senior : le dernier retenu cède sa place
            if let (Some(senior), Some(last)) = (spare_senior, bound.pop()) {
                plan.unbind(last);
                plan.bind(senior, shift, Resolution::Staffing);

                #[cfg(feature = "logging")]
                tracing::debug!(
                    day,
                    shift = %shift,
                    senior = %self.people[senior].id,
                    replaced = %self.people[last].id,
                    "senior swapped in"
                );
            }
        }
    }

    fn fallback(&self, day: u32, plan: &mut DayPlan) {
        for idx in 0..self.people.len() {
            if plan.is_resolved(idx) {
                continue;
            }
            let shift = self.fallback_shift(idx, day);
            plan.bind(idx, shift, Resolution::Fallback);
        }
    }

    /// Repos, sauf quota atteint sans retard : poste le moins tenu parmi les postes légaux.
    fn fallback_shift(&self, idx: usize, day: u32) -> ShiftLabel {
        let state = &self.states[idx];
        if state.last_shift == Some(ShiftLabel::Night) || state.off_count_after_night > 0 {
            return ShiftLabel::Off;
        }
        if !state.met_off_quota(self.config.target_off_days)
            || self.pace.deficit(state, day) < 0.0
        {
            return ShiftLabel::Off;
        }
        ShiftLabel::WORK
            .into_iter()
            .filter(|shift| self.eligible(idx, day, *shift))
            .min_by_key(|shift| state.shift_counts.get(*shift))
            .unwrap_or(ShiftLabel::Off)
    }
}
