use crate::model::{Person, Roster, Schedule, ShiftLabel};
use crate::scheduler::Summary;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import du personnel depuis CSV: header `id,name,experience[,preferences]`
///
/// Les préférences s'écrivent `jour:poste` séparés par `;` (ex. `5:OFF;12:N`).
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    read_roster(rdr)
}

pub fn read_roster<R: std::io::Read>(mut rdr: csv::Reader<R>) -> anyhow::Result<Roster> {
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        let experience = rec.get(2).context("missing experience")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid roster row (empty)");
        }
        let id: u32 = id.parse().with_context(|| format!("invalid id: {id}"))?;
        let experience: u32 = experience
            .parse()
            .with_context(|| format!("invalid experience for id {id}"))?;
        let mut person = Person::new(id, name, experience);
        if let Some(raw) = rec.get(3) {
            let raw = raw.trim();
            if !raw.is_empty() {
                person.preferences = parse_preferences(raw)
                    .with_context(|| format!("invalid preferences for id {id}"))?;
            }
        }
        out.push(person);
    }
    Ok(Roster::new(out))
}

fn parse_preferences(raw: &str) -> anyhow::Result<BTreeMap<u32, ShiftLabel>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| -> anyhow::Result<(u32, ShiftLabel)> {
            let (day, shift) = chunk
                .split_once(':')
                .with_context(|| format!("expected day:shift, got {chunk}"))?;
            let day: u32 = day.trim().parse().context("invalid day")?;
            let shift: ShiftLabel = shift.parse().map_err(anyhow::Error::msg)?;
            Ok((day, shift))
        })
        .collect()
}

/// Export CSV du planning: une ligne par personne, une colonne par jour.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    write_schedule(&mut w, schedule, roster)
}

pub fn write_schedule<W: Write>(
    w: &mut csv::Writer<W>,
    schedule: &Schedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let days: Vec<u32> = schedule.days().map(|(d, _)| d).collect();
    let mut header = vec!["id".to_string(), "name".to_string()];
    header.extend(days.iter().map(|d| d.to_string()));
    w.write_record(&header)?;

    for person in &roster.people {
        let mut record = vec![person.id.to_string(), person.name.clone()];
        record.extend(days.iter().map(|d| {
            schedule
                .get(*d, person.id)
                .map_or_else(String::new, |s| s.code().to_string())
        }));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des totaux: header `id,name,D,E,N,OFF,work`
pub fn export_summary_csv<P: AsRef<Path>>(path: P, summary: &Summary) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    write_summary(&mut w, summary)
}

pub fn write_summary<W: Write>(w: &mut csv::Writer<W>, summary: &Summary) -> anyhow::Result<()> {
    w.write_record(["id", "name", "D", "E", "N", "OFF", "work"])?;
    for s in summary.values() {
        w.write_record([
            s.person.to_string(),
            s.name.clone(),
            s.counts.day.to_string(),
            s.counts.evening.to_string(),
            s.counts.night.to_string(),
            s.counts.off.to_string(),
            s.total_work_days.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}
