#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use roulement::{
    config::{export_config_json, GenerationConfig, Headcount, StaffingPlan},
    io,
    model::{PersonId, Roster, Schedule, ShiftLabel},
    scheduler::{detect_violations, generate_schedule, summarize, ViolationKind},
    storage::{JsonStorage, Storage, Workspace},
    TargetMonth,
};
use chrono::Weekday;
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings de roulement (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de workspace (config + roster + planning)
    #[arg(long, global = true, default_value = "roulement.json")]
    workspace: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un workspace avec un roster par défaut
    Init {
        /// Mois cible YYYY-MM
        #[arg(long)]
        month: String,
        #[arg(long, default_value_t = 12)]
        off_days: u32,
        #[arg(long, default_value_t = 10)]
        staff: usize,
        #[arg(long, default_value_t = 3)]
        day: u32,
        #[arg(long, default_value_t = 3)]
        evening: u32,
        #[arg(long, default_value_t = 2)]
        night: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Écrase un workspace existant
        #[arg(long)]
        force: bool,
    },

    /// Remplacer le roster depuis un CSV
    ImportRoster {
        #[arg(long)]
        csv: String,
    },

    /// Ajuster la taille du roster (ajout/retrait en fin de liste)
    Resize {
        #[arg(long)]
        staff: usize,
    },

    /// Renommer une personne ou changer son ancienneté
    EditPerson {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        experience: Option<u32>,
    },

    /// Poser (D/E/N/OFF) ou effacer (-) une préférence
    Prefer {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        day: u32,
        #[arg(long)]
        shift: String,
    },

    /// Générer le planning du mois
    Generate {
        /// Remplace la graine de la config
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher le planning courant
    Show,

    /// Totaux par personne
    Summary {
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier le planning courant
    Check {
        /// Export CSV des écarts (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Exporter planning / config
    Export {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        config_json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.workspace)?;

    if let Commands::Init {
        month,
        off_days,
        staff,
        day,
        evening,
        night,
        seed,
        force,
    } = &cli.cmd
    {
        if storage.exists() && !force {
            bail!("{} already exists (use --force)", cli.workspace);
        }
        let month: TargetMonth = month.parse()?;
        let staffing = StaffingPlan::fixed(Headcount::new(*day, *evening, *night));
        let mut config = GenerationConfig::new(month, *off_days, staffing);
        config.seed = *seed;
        let roster = Roster::with_default_staff(*staff);
        config.validate(&roster)?;
        storage.save(&Workspace::new(config, roster))?;
        println!("Workspace created: {}", cli.workspace);
        std::process::exit(0);
    }

    let mut ws = storage.load()?;

    let code = match cli.cmd {
        Commands::Init { .. } => 0,
        Commands::ImportRoster { csv } => {
            ws.roster = io::import_roster_csv(csv)?;
            ws.schedule = None;
            storage.save(&ws)?;
            0
        }
        Commands::Resize { staff } => {
            ws.roster.resize(staff);
            ws.schedule = None;
            storage.save(&ws)?;
            0
        }
        Commands::EditPerson {
            id,
            name,
            experience,
        } => {
            let person = ws
                .roster
                .find_person_mut_by_id(PersonId::new(id))
                .with_context(|| format!("unknown person: {id}"))?;
            if let Some(name) = name {
                person.name = name;
            }
            if let Some(years) = experience {
                person.experience_years = years;
            }
            storage.save(&ws)?;
            0
        }
        Commands::Prefer { id, day, shift } => {
            if !ws.config.month.contains(day) {
                bail!("day {day} outside {}", ws.config.month);
            }
            let shift = match shift.trim() {
                "" | "-" => None,
                raw => Some(raw.parse::<ShiftLabel>().map_err(anyhow::Error::msg)?),
            };
            let person = ws
                .roster
                .find_person_mut_by_id(PersonId::new(id))
                .with_context(|| format!("unknown person: {id}"))?;
            person.set_preference(day, shift);
            storage.save(&ws)?;
            0
        }
        Commands::Generate { seed } => {
            let mut config = ws.config.clone();
            if seed.is_some() {
                config.seed = seed;
            }
            let generation = generate_schedule(&ws.roster, &config)?;
            print_grid(&ws.roster, &generation.schedule, config.month);
            ws.schedule = Some(generation.schedule);
            storage.save(&ws)?;
            0
        }
        Commands::Show => {
            let schedule = current_schedule(&ws)?;
            print_grid(&ws.roster, schedule, ws.config.month);
            0
        }
        Commands::Summary { out_csv } => {
            let schedule = current_schedule(&ws)?;
            let summary = summarize(schedule, &ws.roster);
            if let Some(path) = out_csv {
                io::export_summary_csv(path, &summary)?;
            }
            for s in summary.values() {
                println!(
                    "{} | {} | D {} E {} N {} OFF {} | work {}",
                    s.person,
                    s.name,
                    s.counts.day,
                    s.counts.evening,
                    s.counts.night,
                    s.counts.off,
                    s.total_work_days
                );
            }
            0
        }
        Commands::Check { report } => {
            let schedule = current_schedule(&ws)?;
            let violations = detect_violations(schedule, &ws.roster, &ws.config);
            let hard = violations.iter().filter(|v| v.kind.is_hard()).count();
            if let Some(path) = report {
                let mut w = csv::Writer::from_path(path)?;
                w.write_record(["person_id", "day", "kind", "severity"])?;
                for v in &violations {
                    let person = v.person.map(|p| p.to_string()).unwrap_or_default();
                    let day = v.day.to_string();
                    let kind = kind_code(v.kind);
                    let severity = if v.kind.is_hard() { "hard" } else { "soft" };
                    w.write_record([person.as_str(), day.as_str(), kind.as_str(), severity])?;
                }
                w.flush()?;
            }
            if hard == 0 {
                println!(
                    "OK: no rule violations ({} soft warning(s))",
                    violations.len()
                );
                0
            } else {
                eprintln!("Found {hard} rule violation(s)");
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Export {
            out_json,
            out_csv,
            config_json,
        } => {
            if let Some(path) = config_json {
                export_config_json(path, &ws.config)?;
            }
            if out_json.is_some() || out_csv.is_some() {
                let schedule = current_schedule(&ws)?;
                if let Some(path) = out_json {
                    io::export_schedule_json(path, schedule)?;
                }
                if let Some(path) = out_csv {
                    io::export_schedule_csv(path, schedule, &ws.roster)?;
                }
            }
            0
        }
    };

    std::process::exit(code);
}

fn current_schedule(ws: &Workspace) -> Result<&Schedule> {
    ws.schedule
        .as_ref()
        .context("no schedule generated yet (run `generate`)")
}

fn kind_code(kind: ViolationKind) -> String {
    match kind {
        ViolationKind::NightFollowedByWork => "night_then_work".into(),
        ViolationKind::NightOffDay => "night_off_day".into(),
        ViolationKind::ConsecutiveWork => "consecutive_work".into(),
        ViolationKind::NightCap => "night_cap".into(),
        ViolationKind::OffPreferenceIgnored => "off_preference".into(),
        ViolationKind::OffQuotaMissed => "off_quota".into(),
        ViolationKind::NoSenior(shift) => format!("no_senior_{shift}"),
        ViolationKind::Missing => "missing".into(),
    }
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

// impression compacte : une ligne par personne
fn print_grid(roster: &Roster, schedule: &Schedule, month: TargetMonth) {
    let mut header = format!("{:<16}", month.to_string());
    let mut weekdays = format!("{:<16}", "");
    for day in month.days() {
        header.push_str(&format!("{day:>4}"));
        let wd = month.weekday(day).map(weekday_short).unwrap_or("??");
        weekdays.push_str(&format!("{wd:>4}"));
    }
    println!("{header}");
    println!("{weekdays}");
    for person in &roster.people {
        let mut line = format!("{:<16}", person.name);
        for day in month.days() {
            let code = schedule.get(day, person.id).map_or("-", ShiftLabel::code);
            line.push_str(&format!("{code:>4}"));
        }
        println!("{line}");
    }
}
