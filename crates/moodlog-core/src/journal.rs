//! Journal root: submit flow, persistence, and unlock notifications
//!
//! `MoodJournal` owns the entry store, the derived stats, and the database
//! handle. All mutations go through `submit` and `clear_all`; reads go
//! through the accessors or the `report` functions. Persistence is
//! best-effort: a failed load falls back to empty defaults and a failed
//! save leaves the in-memory state authoritative.

use crate::achievements::{self, Achievement};
use crate::db::{Database, ENTRIES_KEY, STATS_KEY};
use crate::stats::UserStats;
use crate::store::EntryStore;
use crate::MoodEntry;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

pub struct MoodJournal {
    db: Database,
    store: EntryStore,
    stats: UserStats,
    pending_unlocks: Vec<Achievement>,
}

impl MoodJournal {
    /// Open a journal on the given database, loading any stored state.
    /// Unreadable or corrupt state is discarded in favor of defaults.
    pub fn open(db: Database) -> Self {
        let store = match db.load(ENTRIES_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<MoodEntry>>(&blob) {
                Ok(entries) => EntryStore::from_entries(entries),
                Err(e) => {
                    warn!("Discarding unreadable entry list: {}", e);
                    EntryStore::new()
                }
            },
            Ok(None) => EntryStore::new(),
            Err(e) => {
                warn!("Failed to load entry list: {}", e);
                EntryStore::new()
            }
        };

        let mut stats = match db.load(STATS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<UserStats>(&blob) {
                Ok(stats) => stats,
                Err(e) => {
                    warn!("Discarding unreadable stats: {}", e);
                    UserStats::default()
                }
            },
            Ok(None) => UserStats::default(),
            Err(e) => {
                warn!("Failed to load stats: {}", e);
                UserStats::default()
            }
        };
        stats.reseed_achievements();

        Self {
            db,
            store,
            stats,
            pending_unlocks: Vec::new(),
        }
    }

    /// Open a journal on the default database
    pub fn open_default() -> crate::db::Result<Self> {
        Ok(Self::open(Database::open_default()?))
    }

    /// Submit an entry for its calendar day, replacing any entry already
    /// recorded for that day, then update stats, re-evaluate locked
    /// achievements, and save. Returns the achievements this submission
    /// unlocked; they are also queued for [`take_unlocks`].
    ///
    /// [`take_unlocks`]: MoodJournal::take_unlocks
    pub fn submit(&mut self, entry: MoodEntry) -> Vec<Achievement> {
        let now = Utc::now();
        self.submit_at(entry, now.date_naive(), now)
    }

    /// Clock-injected variant of [`submit`]: `today` anchors the trailing
    /// 7-day window and `now` stamps unlock times.
    ///
    /// [`submit`]: MoodJournal::submit
    pub fn submit_at(
        &mut self,
        entry: MoodEntry,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        self.store.upsert(entry.clone());
        self.stats.record(&entry);

        let unlocked = achievements::evaluate(&self.store, &mut self.stats, today, now);
        self.pending_unlocks.extend(unlocked.iter().cloned());

        self.persist();
        unlocked
    }

    /// Drain the pending unlock notifications, oldest first. The
    /// presentation layer calls this after displaying them.
    pub fn take_unlocks(&mut self) -> Vec<Achievement> {
        std::mem::take(&mut self.pending_unlocks)
    }

    /// Erase both persisted keys and reset to a fresh journal: no entries,
    /// zeroed stats, the full achievement catalog re-seeded locked.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.stats = UserStats::default();
        self.pending_unlocks.clear();

        if let Err(e) = self.db.remove(ENTRIES_KEY) {
            warn!("Failed to erase entries: {}", e);
        }
        if let Err(e) = self.db.remove(STATS_KEY) {
            warn!("Failed to erase stats: {}", e);
        }
    }

    fn persist(&self) {
        match serde_json::to_string(self.store.all()) {
            Ok(blob) => {
                if let Err(e) = self.db.save(ENTRIES_KEY, &blob) {
                    warn!("Failed to save entries: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode entries: {}", e),
        }

        match serde_json::to_string(&self.stats) {
            Ok(blob) => {
                if let Err(e) = self.db.save(STATS_KEY, &blob) {
                    warn!("Failed to save stats: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode stats: {}", e),
        }
    }

    pub fn entries(&self) -> &[MoodEntry] {
        self.store.all()
    }

    pub fn entry_for(&self, day: NaiveDate) -> Option<&MoodEntry> {
        self.store.get(day)
    }

    pub fn entries_for_month(&self, date: NaiveDate) -> Vec<&MoodEntry> {
        self.store.entries_for_month(date)
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report;
    use crate::Mood;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn memory_journal() -> MoodJournal {
        MoodJournal::open(Database::open(":memory:").unwrap())
    }

    fn submit(journal: &mut MoodJournal, entry: MoodEntry) -> Vec<Achievement> {
        let today = entry.day;
        journal.submit_at(entry, today, Utc::now())
    }

    #[test]
    fn test_seven_day_scenario() {
        let mut journal = memory_journal();

        let mut last_events = Vec::new();
        for d in 1..=7 {
            last_events = submit(&mut journal, MoodEntry::new(day(d), Mood::Happy));
        }

        assert_eq!(journal.stats().current_streak, 7);
        assert_eq!(journal.stats().longest_streak, 7);

        let ids: Vec<&str> = last_events.iter().map(|a| a.id.as_str()).collect();
        assert!(ids.contains(&"week_warrior"));
        assert!(ids.contains(&"perfect_week"));

        // The queue kept everything unlocked so far: first_step plus the two
        let queued = journal.take_unlocks();
        assert_eq!(queued.len(), 3);
        assert!(journal.take_unlocks().is_empty());
    }

    #[test]
    fn test_same_day_overwrite_replaces_entry_but_adds_points() {
        let mut journal = memory_journal();
        submit(&mut journal, MoodEntry::new(day(1), Mood::Sad));
        let points_after_first = journal.stats().total_points;

        submit(
            &mut journal,
            MoodEntry::new(day(1), Mood::Happy).with_comment("turned around"),
        );

        assert_eq!(journal.entries().len(), 1);
        assert_eq!(journal.entry_for(day(1)).unwrap().mood, Mood::Happy);
        assert_eq!(journal.stats().total_entries, 2);
        assert_eq!(
            journal.stats().total_points,
            points_after_first + Mood::Happy.points() as u64
        );
    }

    #[test]
    fn test_clear_all_resets_state_and_catalog() {
        let mut journal = memory_journal();
        for d in 1..=7 {
            submit(&mut journal, MoodEntry::new(day(d), Mood::Happy));
        }

        journal.clear_all();

        assert!(journal.entries().is_empty());
        assert_eq!(journal.stats().total_points, 0);
        assert_eq!(journal.stats().current_streak, 0);
        assert_eq!(journal.stats().achievements.len(), 8);
        assert!(journal.stats().achievements.iter().all(|a| !a.is_unlocked));
        assert!(journal.take_unlocks().is_empty());

        let weekly = report::weekly_stats(journal.entries(), day(7));
        assert_eq!(weekly.total_entries, 0);
        assert_eq!(weekly.average_mood_points, 0.0);
        let dist = report::mood_distribution(journal.entries());
        assert!(dist.values().all(|&c| c == 0));
    }

    #[test]
    fn test_state_survives_reopen() {
        let path = std::env::temp_dir().join(format!("moodlog-test-{}.db", uuid::Uuid::new_v4()));

        {
            let mut journal = MoodJournal::open(Database::open(&path).unwrap());
            submit(&mut journal, MoodEntry::new(day(1), Mood::Love).with_sleep(7.5));
            submit(&mut journal, MoodEntry::new(day(2), Mood::Happy));
        }

        let journal = MoodJournal::open(Database::open(&path).unwrap());
        assert_eq!(journal.entries().len(), 2);
        assert_eq!(journal.stats().current_streak, 2);
        assert_eq!(journal.entry_for(day(1)).unwrap().sleep_hours, Some(7.5));
        assert!(journal
            .stats()
            .achievements
            .iter()
            .any(|a| a.id == "first_step" && a.is_unlocked));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_blobs_fall_back_to_defaults() {
        let db = Database::open(":memory:").unwrap();
        db.save(ENTRIES_KEY, "not json").unwrap();
        db.save(STATS_KEY, "{\"broken\":").unwrap();

        let journal = MoodJournal::open(db);
        assert!(journal.entries().is_empty());
        assert_eq!(journal.stats().total_entries, 0);
        assert_eq!(journal.stats().achievements.len(), 8);
    }

    #[test]
    fn test_stored_stats_missing_achievements_are_reseeded() {
        let db = Database::open(":memory:").unwrap();
        db.save(
            STATS_KEY,
            r#"{"total_points":9,"current_streak":1,"longest_streak":1,
                "total_entries":1,"achievements":[],"last_entry_date":"2024-01-01"}"#,
        )
        .unwrap();

        let journal = MoodJournal::open(db);
        assert_eq!(journal.stats().total_points, 9);
        assert_eq!(journal.stats().achievements.len(), 8);
    }
}
