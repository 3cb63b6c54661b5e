#![forbid(unsafe_code)]
//! Roulement — génération locale de plannings mensuels (sans BD).
//!
//! - Postes Jour / Soir / Nuit / Repos, un par personne et par jour.
//! - Heuristique gloutonne jour après jour : préférences, effectifs, repos par défaut.
//! - Règles de repos, plafond de nuits, rythme des repos, couverture senior.
//! - Stockage fichiers (JSON/CSV) ; rendu et affichage hors de la lib.

pub mod calendar;
pub mod config;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use calendar::{CalendarError, TargetMonth};
pub use config::{
    export_config_json, load_config_from_file, GenerationConfig, Headcount, Rules, StaffingPlan,
};
pub use model::{Person, PersonId, Roster, Schedule, ShiftLabel};
pub use scheduler::{
    detect_violations, generate_schedule, summarize, Generation, PersonState, SchedError,
    Scheduler, Summary, Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage, Workspace};
