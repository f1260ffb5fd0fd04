//! Derived user statistics: points, streaks, and entry totals

use crate::achievements::{self, Achievement};
use crate::MoodEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Points for a single entry: mood value plus the sum of its activity values.
pub fn entry_points(entry: &MoodEntry) -> u64 {
    let activity_points: u64 = entry.activities.iter().map(|a| a.points() as u64).sum();
    entry.mood.points() as u64 + activity_points
}

/// Cumulative stats derived from submitted entries.
///
/// A cache kept consistent with the entry store after every mutation, but
/// persisted under its own key. `total_points` and `total_entries` count
/// submissions, not unique days: re-saving an already-recorded day adds to
/// both again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_entries: u64,
    pub achievements: Vec<Achievement>,
    pub last_entry_date: Option<NaiveDate>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_points: 0,
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
            achievements: achievements::default_catalog(),
            last_entry_date: None,
        }
    }
}

impl UserStats {
    /// Fold a newly-submitted entry into the cumulative stats.
    ///
    /// Streak rules, against the previously recorded last entry date:
    /// no prior entry starts a streak of 1; a gap of exactly one calendar
    /// day increments it; a gap of zero (same-day overwrite) leaves it
    /// unchanged; any other gap, including a backfilled past date, resets
    /// it to 1.
    pub fn record(&mut self, entry: &MoodEntry) {
        self.total_points += entry_points(entry);
        self.total_entries += 1;

        match self.last_entry_date {
            None => self.current_streak = 1,
            Some(last) => {
                let gap = (entry.day - last).num_days();
                if gap == 1 {
                    self.current_streak += 1;
                } else if gap != 0 {
                    self.current_streak = 1;
                }
            }
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_entry_date = Some(entry.day);
    }

    /// Add any predefined achievement missing from the catalog, keeping the
    /// unlock state of those already present. Stored stats from before a
    /// catalog addition pick up the new entries as locked.
    pub fn reseed_achievements(&mut self) {
        for def in achievements::default_catalog() {
            if !self.achievements.iter().any(|a| a.id == def.id) {
                self.achievements.push(def);
            }
        }
    }
}
