//! Read-only aggregate reports over entry sets
//!
//! Pure functions recomputed on demand by the presentation layer. Every
//! report handles an empty input set by returning zeros or absent values.

use crate::{Activity, EnergyLevel, Mood, MoodEntry};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Summary of the trailing seven days.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyStats {
    /// Mean mood point value, 0.0 when no entries fall in the window
    pub average_mood_points: f64,
    pub total_entries: usize,
    /// Day of week with the most entries in the window
    pub most_active_day: Option<Weekday>,
}

/// Average sleep and the most frequent energy level across an entry set.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySleepSummary {
    pub average_sleep_hours: Option<f64>,
    pub typical_energy: Option<EnergyLevel>,
}

/// Stats over the trailing 7 calendar days ending at `today`.
pub fn weekly_stats(entries: &[MoodEntry], today: NaiveDate) -> WeeklyStats {
    let window_start = today - Duration::days(6);
    let recent: Vec<&MoodEntry> = entries
        .iter()
        .filter(|e| e.day >= window_start && e.day <= today)
        .collect();

    if recent.is_empty() {
        return WeeklyStats {
            average_mood_points: 0.0,
            total_entries: 0,
            most_active_day: None,
        };
    }

    let total_points: u64 = recent.iter().map(|e| e.mood.points() as u64).sum();

    let mut day_counts = [0usize; 7];
    for entry in &recent {
        day_counts[entry.day.weekday().num_days_from_monday() as usize] += 1;
    }
    let most_active_day = day_counts
        .iter()
        .enumerate()
        .max_by_key(|(_, &count)| count)
        .map(|(i, _)| WEEKDAYS[i]);

    WeeklyStats {
        average_mood_points: total_points as f64 / recent.len() as f64,
        total_entries: recent.len(),
        most_active_day,
    }
}

/// Count of entries per mood. Every mood appears as a key, zeros included.
pub fn mood_distribution(entries: &[MoodEntry]) -> BTreeMap<Mood, usize> {
    let mut counts: BTreeMap<Mood, usize> = Mood::ALL.iter().map(|m| (*m, 0)).collect();
    for entry in entries {
        if let Some(count) = counts.get_mut(&entry.mood) {
            *count += 1;
        }
    }
    counts
}

/// Activity tags ranked by how often they appear, most popular first.
/// Ties break toward the catalog order. Callers truncate as needed.
pub fn activity_popularity(entries: &[MoodEntry]) -> Vec<(Activity, usize)> {
    let mut counts: BTreeMap<Activity, usize> = BTreeMap::new();
    for entry in entries {
        for activity in &entry.activities {
            *counts.entry(*activity).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(Activity, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Average sleep hours across entries that recorded them, and the most
/// frequent energy level across entries that recorded one.
pub fn energy_and_sleep_summary(entries: &[MoodEntry]) -> EnergySleepSummary {
    let sleep: Vec<f64> = entries.iter().filter_map(|e| e.sleep_hours).collect();
    let average_sleep_hours = if sleep.is_empty() {
        None
    } else {
        Some(sleep.iter().sum::<f64>() / sleep.len() as f64)
    };

    let mut counts: BTreeMap<EnergyLevel, usize> = BTreeMap::new();
    for entry in entries {
        if let Some(level) = entry.energy {
            *counts.entry(level).or_insert(0) += 1;
        }
    }
    let typical_energy = counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(level, _)| level);

    EnergySleepSummary {
        average_sleep_hours,
        typical_energy,
    }
}
