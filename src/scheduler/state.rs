use crate::model::ShiftLabel;
use serde::{Deserialize, Serialize};

/// Compteurs par type de poste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftCounts {
    #[serde(rename = "D")]
    pub day: u32,
    #[serde(rename = "E")]
    pub evening: u32,
    #[serde(rename = "N")]
    pub night: u32,
    #[serde(rename = "OFF")]
    pub off: u32,
}

impl ShiftCounts {
    pub fn get(&self, shift: ShiftLabel) -> u32 {
        match shift {
            ShiftLabel::Day => self.day,
            ShiftLabel::Evening => self.evening,
            ShiftLabel::Night => self.night,
            ShiftLabel::Off => self.off,
        }
    }

    pub fn increment(&mut self, shift: ShiftLabel) {
        match shift {
            ShiftLabel::Day => self.day += 1,
            ShiftLabel::Evening => self.evening += 1,
            ShiftLabel::Night => self.night += 1,
            ShiftLabel::Off => self.off += 1,
        }
    }

    pub fn work(&self) -> u32 {
        self.day + self.evening + self.night
    }
}

/// Repos consécutifs au bout desquels le compteur post-nuit est libéré.
const POST_NIGHT_RELEASE: u32 = 2;

/// État courant d'une personne pendant une génération (remis à zéro à chaque run).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonState {
    pub off_days: u32,
    pub work_days: u32,
    pub consecutive_work: u32,
    pub consecutive_nights: u32,
    pub total_nights: u32,
    pub off_count_after_night: u32,
    pub last_shift: Option<ShiftLabel>,
    /// Poste de l'avant-veille.
    pub two_days_ago: Option<ShiftLabel>,
    pub shift_counts: ShiftCounts,
}

impl PersonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unique point de mutation : exactement un appel par personne et par jour.
    pub fn apply(&mut self, shift: ShiftLabel) {
        self.two_days_ago = self.last_shift;
        self.shift_counts.increment(shift);

        if shift == ShiftLabel::Off {
            self.off_days += 1;
            self.consecutive_work = 0;
            self.consecutive_nights = 0;
            if self.off_count_after_night > 0 {
                self.off_count_after_night += 1;
                if self.off_count_after_night >= POST_NIGHT_RELEASE {
                    self.off_count_after_night = 0;
                }
            }
        } else {
            self.work_days += 1;
            self.consecutive_work += 1;
            if shift == ShiftLabel::Night {
                self.consecutive_nights += 1;
                self.total_nights += 1;
                self.off_count_after_night = 1;
            } else {
                self.consecutive_nights = 0;
            }
        }

        self.last_shift = Some(shift);
    }

    pub fn days_processed(&self) -> u32 {
        self.work_days + self.off_days
    }

    pub fn met_off_quota(&self, target_off_days: u32) -> bool {
        self.off_days >= target_off_days
    }
}
