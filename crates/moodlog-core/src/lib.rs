//! Moodlog Core Library
//!
//! Provides the entry store, derived statistics, achievement engine,
//! aggregate reports, and export functionality for the Moodlog mood journal.

pub mod achievements;
pub mod db;
pub mod export;
pub mod journal;
pub mod report;
pub mod stats;
pub mod store;

pub use achievements::{Achievement, AchievementKind};
pub use db::Database;
pub use export::{ExportFormat, Exporter};
pub use journal::MoodJournal;
pub use report::{EnergySleepSummary, WeeklyStats};
pub use stats::UserStats;
pub use store::EntryStore;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// One of the five moods a day can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
    Love,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Angry, Mood::Love];

    /// Points awarded for logging a day with this mood
    pub fn points(self) -> u32 {
        match self {
            Mood::Happy => 10,
            Mood::Neutral => 5,
            Mood::Sad => 2,
            Mood::Angry => 1,
            Mood::Love => 15,
        }
    }

    /// Display glyph shown next to the mood
    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😞",
            Mood::Angry => "😡",
            Mood::Love => "😍",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Love => "Love",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "neutral" => Some(Mood::Neutral),
            "sad" => Some(Mood::Sad),
            "angry" => Some(Mood::Angry),
            "love" => Some(Mood::Love),
            _ => None,
        }
    }
}

/// One of the ten activity tags an entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Exercise,
    Meditation,
    Reading,
    Socializing,
    Outdoors,
    Cooking,
    Music,
    Gaming,
    Work,
    Family,
}

impl Activity {
    pub const ALL: [Activity; 10] = [
        Activity::Exercise,
        Activity::Meditation,
        Activity::Reading,
        Activity::Socializing,
        Activity::Outdoors,
        Activity::Cooking,
        Activity::Music,
        Activity::Gaming,
        Activity::Work,
        Activity::Family,
    ];

    /// Points awarded for tagging an entry with this activity
    pub fn points(self) -> u32 {
        match self {
            Activity::Exercise => 10,
            Activity::Meditation => 8,
            Activity::Reading => 6,
            Activity::Socializing => 7,
            Activity::Outdoors => 8,
            Activity::Cooking => 5,
            Activity::Music => 4,
            Activity::Gaming => 3,
            Activity::Work => 5,
            Activity::Family => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Activity::Exercise => "Exercise",
            Activity::Meditation => "Meditation",
            Activity::Reading => "Reading",
            Activity::Socializing => "Socializing",
            Activity::Outdoors => "Outdoors",
            Activity::Cooking => "Cooking",
            Activity::Music => "Music",
            Activity::Gaming => "Gaming",
            Activity::Work => "Work",
            Activity::Family => "Family",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exercise" => Some(Activity::Exercise),
            "meditation" => Some(Activity::Meditation),
            "reading" => Some(Activity::Reading),
            "socializing" => Some(Activity::Socializing),
            "outdoors" => Some(Activity::Outdoors),
            "cooking" => Some(Activity::Cooking),
            "music" => Some(Activity::Music),
            "gaming" => Some(Activity::Gaming),
            "work" => Some(Activity::Work),
            "family" => Some(Activity::Family),
            _ => None,
        }
    }
}

/// Self-reported energy for the day, ordinal 1 (very low) to 5 (very high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl EnergyLevel {
    /// Ordinal value, 1 to 5
    pub fn level(self) -> u8 {
        match self {
            EnergyLevel::VeryLow => 1,
            EnergyLevel::Low => 2,
            EnergyLevel::Moderate => 3,
            EnergyLevel::High => 4,
            EnergyLevel::VeryHigh => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergyLevel::VeryLow => "Very low",
            EnergyLevel::Low => "Low",
            EnergyLevel::Moderate => "Moderate",
            EnergyLevel::High => "High",
            EnergyLevel::VeryHigh => "Very high",
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(EnergyLevel::VeryLow),
            2 => Some(EnergyLevel::Low),
            3 => Some(EnergyLevel::Moderate),
            4 => Some(EnergyLevel::High),
            5 => Some(EnergyLevel::VeryHigh),
            _ => None,
        }
    }
}

/// A single day's journal entry. At most one exists per calendar day; saving
/// a day that already has one replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub day: NaiveDate,
    pub mood: Mood,
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub activities: BTreeSet<Activity>,
    pub energy: Option<EnergyLevel>,
    /// Hours slept the previous night, non-negative
    pub sleep_hours: Option<f64>,
}

impl MoodEntry {
    pub fn new(day: NaiveDate, mood: Mood) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            mood,
            comment: None,
            activities: BTreeSet::new(),
            energy: None,
            sleep_hours: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_activities<I: IntoIterator<Item = Activity>>(mut self, activities: I) -> Self {
        self.activities = activities.into_iter().collect();
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_sleep(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }
}

/// Get the data directory for Moodlog
pub fn data_dir() -> std::path::PathBuf {
    directories::ProjectDirs::from("com", "moodlog", "moodlog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            directories::BaseDirs::new()
                .map(|d| d.home_dir().join(".moodlog"))
                .unwrap_or_else(|| std::path::PathBuf::from(".moodlog"))
        })
}

/// Get the database file path
pub fn db_path() -> std::path::PathBuf {
    data_dir().join("moodlog.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_points_table() {
        assert_eq!(Mood::Happy.points(), 10);
        assert_eq!(Mood::Love.points(), 15);
        assert_eq!(Mood::Neutral.points(), 5);
        assert_eq!(Mood::Sad.points(), 2);
        assert_eq!(Mood::Angry.points(), 1);
    }

    #[test]
    fn test_activity_points_in_range() {
        for activity in Activity::ALL {
            let points = activity.points();
            assert!((3..=10).contains(&points), "{:?} = {}", activity, points);
        }
    }

    #[test]
    fn test_energy_level_roundtrip() {
        for level in 1..=5u8 {
            let energy = EnergyLevel::from_level(level).unwrap();
            assert_eq!(energy.level(), level);
        }
        assert!(EnergyLevel::from_level(0).is_none());
        assert!(EnergyLevel::from_level(6).is_none());
    }

    #[test]
    fn test_mood_parse() {
        assert_eq!(Mood::parse("Happy"), Some(Mood::Happy));
        assert_eq!(Mood::parse("LOVE"), Some(Mood::Love));
        assert_eq!(Mood::parse("meh"), None);
    }

    #[test]
    fn test_entry_builder_deduplicates_activities() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let entry = MoodEntry::new(day, Mood::Happy)
            .with_activities([Activity::Reading, Activity::Reading, Activity::Music]);
        assert_eq!(entry.activities.len(), 2);
    }
}
