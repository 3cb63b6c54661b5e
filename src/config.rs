use crate::calendar::TargetMonth;
use crate::model::{Roster, ShiftLabel};
use crate::scheduler::SchedError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Effectif requis par poste pour une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Headcount {
    pub day: u32,
    pub evening: u32,
    pub night: u32,
}

impl Headcount {
    pub fn new(day: u32, evening: u32, night: u32) -> Self {
        Self { day, evening, night }
    }

    pub fn get(&self, shift: ShiftLabel) -> u32 {
        match shift {
            ShiftLabel::Day => self.day,
            ShiftLabel::Evening => self.evening,
            ShiftLabel::Night => self.night,
            ShiftLabel::Off => 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.day + self.evening + self.night
    }
}

/// Plan d'effectifs : base, week-end optionnel, surcharges par jour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingPlan {
    pub base: Headcount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend: Option<Headcount>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<u32, Headcount>,
}

impl StaffingPlan {
    pub fn fixed(headcount: Headcount) -> Self {
        Self {
            base: headcount,
            weekend: None,
            overrides: BTreeMap::new(),
        }
    }

    /// Surcharge explicite > week-end > base.
    pub fn for_day(&self, month: TargetMonth, day: u32) -> Headcount {
        if let Some(h) = self.overrides.get(&day) {
            return *h;
        }
        match self.weekend {
            Some(h) if month.is_weekend(day).unwrap_or(false) => h,
            _ => self.base,
        }
    }

    /// Effectif total maximal sur le mois.
    pub fn peak_total(&self, month: TargetMonth) -> u32 {
        month
            .days()
            .map(|d| self.for_day(month, d).total())
            .max()
            .unwrap_or(0)
    }
}

impl Default for StaffingPlan {
    fn default() -> Self {
        Self::fixed(Headcount::new(3, 3, 2))
    }
}

/// Règles d'éligibilité (politique de référence par défaut)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub max_consecutive_work: u32,
    pub max_nights_per_month: u32,
    /// Retard toléré (en jours) sur le rythme linéaire des repos.
    pub off_deficit_tolerance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_consecutive_work: 5,
            max_nights_per_month: 3,
            off_deficit_tolerance: 2.0,
        }
    }
}

fn default_senior_threshold() -> u32 {
    4
}

fn default_near_tie_epsilon() -> f64 {
    0.1
}

/// Paramètres d'une génération mensuelle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub month: TargetMonth,
    pub target_off_days: u32,
    #[serde(default)]
    pub staffing: StaffingPlan,
    #[serde(default)]
    pub rules: Rules,
    /// Ancienneté strictement supérieure à ce seuil = senior.
    #[serde(default = "default_senior_threshold")]
    pub senior_threshold: u32,
    #[serde(default = "default_near_tie_epsilon")]
    pub near_tie_epsilon: f64,
    /// Graine du départage aléatoire ; `None` = départage par plus petit id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerationConfig {
    pub fn new(month: TargetMonth, target_off_days: u32, staffing: StaffingPlan) -> Self {
        Self {
            month,
            target_off_days,
            staffing,
            rules: Rules::default(),
            senior_threshold: default_senior_threshold(),
            near_tie_epsilon: default_near_tie_epsilon(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn total_days(&self) -> u32 {
        self.month.days_in_month()
    }

    pub fn target_work_days(&self) -> u32 {
        self.total_days().saturating_sub(self.target_off_days)
    }

    /// Rejette toute configuration inexploitable avant génération.
    pub fn validate(&self, roster: &Roster) -> Result<(), SchedError> {
        let total_days = self.total_days();
        if self.target_off_days > total_days {
            return Err(invalid(format!(
                "target_off_days {} outside [0, {total_days}]",
                self.target_off_days
            )));
        }
        if roster.is_empty() {
            return Err(invalid("roster is empty"));
        }

        let mut seen = HashSet::new();
        for person in &roster.people {
            if !seen.insert(person.id) {
                return Err(invalid(format!("duplicate person id {}", person.id)));
            }
            if person.experience_years < 1 {
                return Err(invalid(format!(
                    "person {} has experience_years < 1",
                    person.id
                )));
            }
            if let Some(day) = person.preferences.keys().find(|d| !self.month.contains(**d)) {
                return Err(invalid(format!(
                    "person {} has a preference for day {day} outside {}",
                    person.id, self.month
                )));
            }
        }

        if let Some(day) = self
            .staffing
            .overrides
            .keys()
            .find(|d| !self.month.contains(**d))
        {
            return Err(invalid(format!(
                "staffing override for day {day} outside {}",
                self.month
            )));
        }
        let peak = self.staffing.peak_total(self.month);
        if (roster.len() as u64) < u64::from(peak) {
            return Err(invalid(format!(
                "roster of {} is below the peak daily headcount {peak}",
                roster.len()
            )));
        }

        if !self.near_tie_epsilon.is_finite() || self.near_tie_epsilon <= 0.0 {
            return Err(invalid("near_tie_epsilon must be a positive number"));
        }
        if !self.rules.off_deficit_tolerance.is_finite() || self.rules.off_deficit_tolerance < 0.0 {
            return Err(invalid("off_deficit_tolerance must be >= 0"));
        }
        if self.rules.max_consecutive_work == 0 {
            return Err(invalid("max_consecutive_work must be > 0"));
        }
        Ok(())
    }
}

fn invalid<S: Into<String>>(msg: S) -> SchedError {
    SchedError::InvalidConfiguration(msg.into())
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<GenerationConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: GenerationConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &GenerationConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
