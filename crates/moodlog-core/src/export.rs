//! Export functionality for CSV and JSON formats

use crate::report;
use crate::stats::UserStats;
use crate::{Mood, MoodEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Export data structure for JSON
#[derive(Debug, Serialize)]
pub struct ExportData<'a> {
    pub exported_at: DateTime<Utc>,
    pub stats: &'a UserStats,
    pub entries: &'a [MoodEntry],
}

pub struct Exporter<'a> {
    entries: &'a [MoodEntry],
    stats: &'a UserStats,
}

impl<'a> Exporter<'a> {
    pub fn new(entries: &'a [MoodEntry], stats: &'a UserStats) -> Self {
        Self { entries, stats }
    }

    /// Export the full journal to a writer
    pub fn export<W: Write>(&self, writer: W, format: ExportFormat) -> Result<()> {
        match format {
            ExportFormat::Csv => self.export_csv(writer),
            ExportFormat::Json => self.export_json(writer),
        }
    }

    fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record([
            "day",
            "mood",
            "points",
            "activities",
            "energy",
            "sleep_hours",
            "comment",
        ])?;

        // Write entries, oldest first
        let mut entries: Vec<&MoodEntry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.day);

        for entry in entries {
            let activities = entry
                .activities
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join(";");

            csv_writer.write_record([
                entry.day.to_string(),
                entry.mood.label().to_string(),
                crate::stats::entry_points(entry).to_string(),
                activities,
                entry
                    .energy
                    .map(|e| e.level().to_string())
                    .unwrap_or_default(),
                entry
                    .sleep_hours
                    .map(|h| h.to_string())
                    .unwrap_or_default(),
                entry.comment.clone().unwrap_or_default(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn export_json<W: Write>(&self, mut writer: W) -> Result<()> {
        let export_data = ExportData {
            exported_at: Utc::now(),
            stats: self.stats,
            entries: self.entries,
        };

        let json = serde_json::to_string_pretty(&export_data)?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export totals and the mood distribution only (no raw entries)
    pub fn export_summary<W: Write>(&self, mut writer: W, format: ExportFormat) -> Result<()> {
        let distribution = report::mood_distribution(self.entries);

        match format {
            ExportFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(writer);
                csv_writer.write_record(["metric", "value"])?;
                csv_writer
                    .write_record(["total_points", &self.stats.total_points.to_string()])?;
                csv_writer
                    .write_record(["current_streak", &self.stats.current_streak.to_string()])?;
                csv_writer
                    .write_record(["longest_streak", &self.stats.longest_streak.to_string()])?;
                csv_writer
                    .write_record(["total_entries", &self.stats.total_entries.to_string()])?;
                for (mood, count) in &distribution {
                    csv_writer.write_record([
                        &format!("mood_{}", mood.label().to_lowercase()),
                        &count.to_string(),
                    ])?;
                }
                csv_writer.flush()?;
            }
            ExportFormat::Json => {
                #[derive(Serialize)]
                struct SummaryExport<'a> {
                    exported_at: DateTime<Utc>,
                    stats: &'a UserStats,
                    mood_distribution: BTreeMap<Mood, usize>,
                }

                let export = SummaryExport {
                    exported_at: Utc::now(),
                    stats: self.stats,
                    mood_distribution: distribution,
                };

                let json = serde_json::to_string_pretty(&export)?;
                writer.write_all(json.as_bytes())?;
            }
        }

        Ok(())
    }
}
