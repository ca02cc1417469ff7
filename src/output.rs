//! Output formatting and persistence for dashboard reports.
//!
//! Supports a plain-text dashboard, JSON serialization, and CSV append of
//! headline metrics.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::report::DashboardReport;
use crate::stats::percentage;

/// Shown wherever a value is undefined.
pub const PLACEHOLDER: &str = "—";

/// One CSV row of headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub total: usize,
    pub average_range: Option<f64>,
    pub manufacturers: usize,
    pub counties: usize,
}

impl SummaryRow {
    pub fn from_report(report: &DashboardReport) -> Self {
        SummaryRow {
            timestamp: report.generated_at,
            source: report.source.clone(),
            total: report.stats.total,
            average_range: report.stats.average_range,
            manufacturers: report.stats.manufacturers,
            counties: report.stats.counties,
        }
    }
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &DashboardReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &DashboardReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the report as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json(path: &str, report: &DashboardReport) -> Result<()> {
    let body = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, body).with_context(|| format!("failed to write report to '{path}'"))?;
    info!(path, "Report JSON written");
    Ok(())
}

/// Appends a [`SummaryRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, row: &SummaryRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open '{path}'"))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

/// Renders the report as a plain-text dashboard.
pub fn render_report(report: &DashboardReport) -> String {
    Dashboard(report).to_string()
}

/// Hue (0..360) derived from a string, used to tint manufacturer badges.
pub fn badge_hue(label: &str) -> u16 {
    let hash = label.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    // Wraps at every step, not only at the shift as a JS-style hash does, so
    // long labels can differ from a browser-computed hue. Cosmetic only.
    hash.rem_euclid(360) as u16
}

/// First two characters of `label`, uppercased.
pub fn badge_initials(label: &str) -> String {
    label.chars().take(2).flat_map(char::to_uppercase).collect()
}

fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_share(part: usize, whole: usize) -> String {
    match percentage(part, whole) {
        Some(p) => format!("{p:.1}%"),
        None => PLACEHOLDER.to_string(),
    }
}

struct Dashboard<'a>(&'a DashboardReport);

impl Dashboard<'_> {
    fn section(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        rows: impl Iterator<Item = (String, usize)>,
    ) -> fmt::Result {
        let total = self.0.stats.total;
        writeln!(f, "{title}")?;
        let mut empty = true;
        for (label, count) in rows {
            empty = false;
            writeln!(
                f,
                "  {:<24} {:>10} {:>7}",
                label,
                format_count(count),
                format_share(count, total)
            )?;
        }
        if empty {
            writeln!(f, "  (no data)")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let stats = &report.stats;

        writeln!(f, "EV Population Dashboard")?;
        if let Some(source) = &report.source {
            writeln!(f, "source: {source}")?;
        }
        writeln!(f, "generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;

        let avg = stats
            .average_range
            .map(|a| format!("{} mi", a.round()))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        writeln!(f, "  {:<24} {:>10}", "Total EVs", format_count(stats.total))?;
        writeln!(f, "  {:<24} {:>10}", "Avg. Electric Range", avg)?;
        writeln!(f, "  {:<24} {:>10}", "Manufacturers", format_count(stats.manufacturers))?;
        writeln!(f, "  {:<24} {:>10}", "Counties", format_count(stats.counties))?;
        writeln!(f)?;

        self.section(
            f,
            "Manufacturer Distribution",
            report.manufacturers.iter().map(|b| (b.label.clone(), b.count)),
        )?;
        self.section(
            f,
            "Model Year Distribution",
            report.model_years.iter().map(|b| (b.year.clone(), b.count)),
        )?;
        self.section(
            f,
            "Electric Range Distribution (miles)",
            report.ranges.iter().map(|b| (b.label.to_string(), b.count)),
        )?;

        writeln!(f, "Top EV Models")?;
        if report.top_models.is_empty() {
            writeln!(f, "  (no data)")?;
        }
        for m in &report.top_models {
            writeln!(
                f,
                "  [{:<2} hsl({}, 70%, 60%)] {:<20} {:<16} {:>10}",
                badge_initials(&m.make),
                badge_hue(&m.make),
                m.model,
                m.make,
                format_count(m.count)
            )?;
        }
        Ok(())
    }
}
