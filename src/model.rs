use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifiant fort pour Person (entier stable, unique dans le roster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(u32);

impl PersonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type de poste attribué pour une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftLabel {
    #[serde(rename = "D", alias = "Day")]
    Day,
    #[serde(rename = "E", alias = "Evening")]
    Evening,
    #[serde(rename = "N", alias = "Night")]
    Night,
    #[serde(rename = "OFF", alias = "Off")]
    Off,
}

impl ShiftLabel {
    /// Postes travaillés, dans l'ordre canonique.
    pub const WORK: [ShiftLabel; 3] = [ShiftLabel::Day, ShiftLabel::Evening, ShiftLabel::Night];

    pub fn is_work(self) -> bool {
        self != ShiftLabel::Off
    }

    pub fn code(self) -> &'static str {
        match self {
            ShiftLabel::Day => "D",
            ShiftLabel::Evening => "E",
            ShiftLabel::Night => "N",
            ShiftLabel::Off => "OFF",
        }
    }
}

impl fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ShiftLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" => Ok(ShiftLabel::Day),
            "e" | "evening" => Ok(ShiftLabel::Evening),
            "n" | "night" => Ok(ShiftLabel::Night),
            "off" | "o" => Ok(ShiftLabel::Off),
            other => Err(format!("unknown shift label: {other}")),
        }
    }
}

/// Membre du personnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub experience_years: u32,
    /// Préférences jour (1..=N) → poste souhaité.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preferences: BTreeMap<u32, ShiftLabel>,
}

impl Person {
    pub fn new<N: Into<String>>(id: u32, name: N, experience_years: u32) -> Self {
        Self {
            id: PersonId::new(id),
            name: name.into(),
            experience_years,
            preferences: BTreeMap::new(),
        }
    }

    pub fn with_preference(mut self, day: u32, shift: ShiftLabel) -> Self {
        self.preferences.insert(day, shift);
        self
    }

    /// Pose ou efface (`None`) la préférence d'un jour.
    pub fn set_preference(&mut self, day: u32, shift: Option<ShiftLabel>) {
        match shift {
            Some(s) => {
                self.preferences.insert(day, s);
            }
            None => {
                self.preferences.remove(&day);
            }
        }
    }

    pub fn preference(&self, day: u32) -> Option<ShiftLabel> {
        self.preferences.get(&day).copied()
    }
}

/// Années d'expérience attribuées au personnel par défaut, en boucle.
const DEFAULT_EXPERIENCE: [u32; 10] = [1, 3, 5, 2, 7, 4, 10, 6, 8, 3];

/// Roster complet (ordre stable = ordre d'itération du planificateur)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// Roster « Person 1..n » avec des anciennetés variées.
    pub fn with_default_staff(n: usize) -> Self {
        let mut roster = Self::default();
        roster.resize(n);
        roster
    }

    /// Ajoute ou retire du personnel en fin de liste.
    pub fn resize(&mut self, n: usize) {
        if n < self.people.len() {
            self.people.truncate(n);
            return;
        }
        let mut next_id = self.people.iter().map(|p| p.id.get()).max().unwrap_or(0);
        while self.people.len() < n {
            next_id += 1;
            let years = DEFAULT_EXPERIENCE[self.people.len() % DEFAULT_EXPERIENCE.len()];
            self.people
                .push(Person::new(next_id, format!("Person {next_id}"), years));
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
    pub fn find_person_by_id(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }
    pub fn find_person_mut_by_id(&mut self, id: PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.id == id)
    }
}

/// Planning : jour → (personne → poste).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Schedule {
    days: BTreeMap<u32, BTreeMap<PersonId, ShiftLabel>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, day: u32, person: PersonId, shift: ShiftLabel) {
        self.days.entry(day).or_default().insert(person, shift);
    }

    pub fn insert_day(&mut self, day: u32, row: BTreeMap<PersonId, ShiftLabel>) {
        self.days.insert(day, row);
    }

    pub fn get(&self, day: u32, person: PersonId) -> Option<ShiftLabel> {
        self.days.get(&day).and_then(|row| row.get(&person)).copied()
    }

    pub fn day(&self, day: u32) -> Option<&BTreeMap<PersonId, ShiftLabel>> {
        self.days.get(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = (u32, &BTreeMap<PersonId, ShiftLabel>)> {
        self.days.iter().map(|(d, row)| (*d, row))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Nombre de personnes affectées à `shift` le jour `day`.
    pub fn count_on(&self, day: u32, shift: ShiftLabel) -> usize {
        self.days
            .get(&day)
            .map_or(0, |row| row.values().filter(|s| **s == shift).count())
    }
}
