use crate::forecast::{Forecast, LoadRecord};
use crate::model::{Assignment, DayRequest, Staff};
use crate::scheduler::HorizonResult;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV: header `employee_id,name,holidays`
/// (`holidays` = dates `YYYY-MM-DD` séparées par `,` ou `;`).
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Staff>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing employee_id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid staff row (empty)");
        }
        let id: u32 = id
            .parse()
            .with_context(|| format!("invalid employee_id for {name}: {id}"))?;
        let holidays = match rec.get(2).map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_holidays(raw)
                .with_context(|| format!("invalid holidays value for {name}"))?,
            _ => Vec::new(),
        };
        out.push(Staff::new(id, name).with_holidays(holidays));
    }
    Ok(out)
}

fn parse_holidays(raw: &str) -> anyhow::Result<Vec<NaiveDate>> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            NaiveDate::parse_from_str(chunk, "%Y-%m-%d")
                .with_context(|| format!("invalid date: {chunk}"))
        })
        .collect()
}

/// Date d'historique : `DD-MM-YYYY` ou `YYYY-MM-DD`.
pub fn parse_load_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .with_context(|| format!("invalid date: {raw}"))
}

/// Import d'historique de charge: header `date,load_units`
pub fn import_load_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<LoadRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = parse_load_date(rec.get(0).context("missing date")?.trim())?;
        let units = rec.get(1).context("missing load_units")?.trim();
        let load_units: u32 = units
            .parse()
            .with_context(|| format!("invalid load_units on {date}: {units}"))?;
        out.push(LoadRecord { date, load_units });
    }
    Ok(out)
}

/// Import de besoins: header `date,people_required[,day_name]`
pub fn import_requests_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<DayRequest>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = rec.get(0).context("missing date")?.trim();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date}"))?;
        let required = rec.get(1).context("missing people_required")?.trim();
        let required: i64 = required
            .parse()
            .with_context(|| format!("people_required must be an integer on {date}"))?;
        let label = rec
            .get(2)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        out.push(DayRequest::new(date, required, label)?);
    }
    Ok(out)
}

/// Export CSV: header
/// `date,day_name,people_required,assigned_staff,assigned_count,overtime,shortage,coverage_percentage`
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    assignments: &[Assignment],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "date",
        "day_name",
        "people_required",
        "assigned_staff",
        "assigned_count",
        "overtime",
        "shortage",
        "coverage_percentage",
    ])?;
    let mut required = itoa::Buffer::new();
    let mut assigned = itoa::Buffer::new();
    let mut shortage = itoa::Buffer::new();
    for a in assignments {
        let date = a.date.format("%Y-%m-%d").to_string();
        let staff = a.selected.join(";");
        let coverage = format!("{:.1}", a.coverage_percentage());
        w.write_record([
            date.as_str(),
            a.day_label.as_str(),
            required.format(a.required),
            staff.as_str(),
            assigned.format(a.assigned_count),
            if a.overtime { "true" } else { "false" },
            shortage.format(a.shortage),
            coverage.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV d'une prévision: header `date,people_required,day_name`
pub fn export_forecast_csv<P: AsRef<Path>>(path: P, forecast: &Forecast) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "people_required", "day_name"])?;
    let mut buf = itoa::Buffer::new();
    for r in &forecast.requests {
        let date = r.date.format("%Y-%m-%d").to_string();
        let label = r.label();
        w.write_record([date.as_str(), buf.format(r.required), label.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON du résultat (jolie mise en forme)
pub fn export_result_json<P: AsRef<Path>>(path: P, result: &HorizonResult) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(result)?;
    fs::write(path, s)?;
    Ok(())
}
