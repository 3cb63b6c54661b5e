//! Arithmétique calendaire pure (grégorien, sans fuseau horaire).

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("invalid year-month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),
}

/// Nombre de jours du mois.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidDate {
        year,
        month,
        day: 1,
    })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(CalendarError::InvalidDate { year, month, day: 1 })?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Jours `1..=K` du mois.
pub fn days(year: i32, month: u32) -> Result<RangeInclusive<u32>, CalendarError> {
    Ok(1..=days_in_month(year, month)?)
}

pub fn weekday(year: i32, month: u32, day: u32) -> Result<Weekday, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.weekday())
        .ok_or(CalendarError::InvalidDate { year, month, day })
}

/// Samedi ou dimanche.
pub fn is_weekend(year: i32, month: u32, day: u32) -> Result<bool, CalendarError> {
    Ok(matches!(weekday(year, month, day)?, Weekday::Sat | Weekday::Sun))
}

/// Mois cible d'une génération, validé à la construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetMonth {
    year: i32,
    month: u32,
}

impl TargetMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        days_in_month(year, month)?;
        Ok(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }
    pub fn month(self) -> u32 {
        self.month
    }

    pub fn days_in_month(self) -> u32 {
        // validé dans `new`
        days_in_month(self.year, self.month).unwrap_or(0)
    }

    pub fn days(self) -> RangeInclusive<u32> {
        1..=self.days_in_month()
    }

    pub fn contains(self, day: u32) -> bool {
        (1..=self.days_in_month()).contains(&day)
    }

    pub fn weekday(self, day: u32) -> Result<Weekday, CalendarError> {
        weekday(self.year, self.month, day)
    }

    pub fn is_weekend(self, day: u32) -> Result<bool, CalendarError> {
        is_weekend(self.year, self.month, day)
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for TargetMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TargetMonth {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetMonth> for String {
    fn from(value: TargetMonth) -> Self {
        value.to_string()
    }
}
