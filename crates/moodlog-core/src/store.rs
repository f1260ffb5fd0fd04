//! In-memory entry store, keyed by calendar day

use crate::MoodEntry;
use chrono::{Datelike, NaiveDate};

/// Ordered collection of daily mood entries.
///
/// Holds at most one entry per calendar day. Entries are never mutated in
/// place; saving a day that already has one is a delete-then-insert.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<MoodEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a previously persisted entry list
    pub fn from_entries(entries: Vec<MoodEntry>) -> Self {
        Self { entries }
    }

    /// Insert-or-replace keyed by the entry's calendar day
    pub fn upsert(&mut self, entry: MoodEntry) {
        self.entries.retain(|e| e.day != entry.day);
        self.entries.push(entry);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in insertion order
    pub fn all(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// The entry recorded for `day`, if any
    pub fn get(&self, day: NaiveDate) -> Option<&MoodEntry> {
        self.entries.iter().find(|e| e.day == day)
    }

    /// Entries whose day falls in the same calendar month and year as `date`
    pub fn entries_for_month(&self, date: NaiveDate) -> Vec<&MoodEntry> {
        self.entries
            .iter()
            .filter(|e| e.day.year() == date.year() && e.day.month() == date.month())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mood;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upsert_replaces_same_day() {
        let mut store = EntryStore::new();
        store.upsert(MoodEntry::new(day(2024, 1, 5), Mood::Sad));
        store.upsert(MoodEntry::new(day(2024, 1, 5), Mood::Happy).with_comment("better now"));

        assert_eq!(store.len(), 1);
        let entry = store.get(day(2024, 1, 5)).unwrap();
        assert_eq!(entry.mood, Mood::Happy);
        assert_eq!(entry.comment.as_deref(), Some("better now"));
    }

    #[test]
    fn test_upsert_keeps_other_days() {
        let mut store = EntryStore::new();
        store.upsert(MoodEntry::new(day(2024, 1, 5), Mood::Sad));
        store.upsert(MoodEntry::new(day(2024, 1, 6), Mood::Happy));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_entries_for_month() {
        let mut store = EntryStore::new();
        store.upsert(MoodEntry::new(day(2024, 1, 31), Mood::Happy));
        store.upsert(MoodEntry::new(day(2024, 2, 1), Mood::Neutral));
        store.upsert(MoodEntry::new(day(2023, 1, 15), Mood::Sad));

        let january = store.entries_for_month(day(2024, 1, 10));
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].day, day(2024, 1, 31));
    }

    #[test]
    fn test_clear() {
        let mut store = EntryStore::new();
        store.upsert(MoodEntry::new(day(2024, 1, 5), Mood::Happy));
        store.clear();
        assert!(store.is_empty());
        assert!(store.get(day(2024, 1, 5)).is_none());
    }
}
