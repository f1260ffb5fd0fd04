//! Achievement catalog and unlock evaluation
//!
//! Defines the 8 predefined achievements, checks the locked ones after every
//! stats update, and reports newly unlocked achievements to the caller.
//! Unlocking is one-way: once unlocked, an achievement is never re-evaluated
//! or re-locked.

use crate::stats::UserStats;
use crate::store::EntryStore;
use crate::{Activity, Mood};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Category an unlock rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Streak,
    TotalEntries,
    MoodVariety,
    ActivityCompletion,
    PerfectWeek,
}

/// Static description of a single achievement.
///
/// `id` is the stable rule key the engine evaluates against; the title is
/// display-only and free to change without touching unlock logic.
struct AchievementDef {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    kind: AchievementKind,
}

/// All 8 achievements defined statically.
const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first_step",
        title: "First Step",
        description: "Record your first mood entry",
        icon: "🌱",
        kind: AchievementKind::TotalEntries,
    },
    AchievementDef {
        id: "happiness_seeker",
        title: "Happiness Seeker",
        description: "Record 50 happy days",
        icon: "😊",
        kind: AchievementKind::TotalEntries,
    },
    AchievementDef {
        id: "week_warrior",
        title: "Week Warrior",
        description: "Keep a 7-day streak",
        icon: "🔥",
        kind: AchievementKind::Streak,
    },
    AchievementDef {
        id: "consistency_king",
        title: "Consistency King",
        description: "Keep a 14-day streak",
        icon: "👑",
        kind: AchievementKind::Streak,
    },
    AchievementDef {
        id: "month_master",
        title: "Month Master",
        description: "Keep a 30-day streak",
        icon: "🏆",
        kind: AchievementKind::Streak,
    },
    AchievementDef {
        id: "mood_explorer",
        title: "Mood Explorer",
        description: "Record all 5 moods",
        icon: "🧭",
        kind: AchievementKind::MoodVariety,
    },
    AchievementDef {
        id: "activity_master",
        title: "Activity Master",
        description: "Tag all 10 activities",
        icon: "🎯",
        kind: AchievementKind::ActivityCompletion,
    },
    AchievementDef {
        id: "perfect_week",
        title: "Perfect Week",
        description: "Log every day of the past week",
        icon: "⭐",
        kind: AchievementKind::PerfectWeek,
    },
];

/// A named milestone with a one-way locked to unlocked transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub kind: AchievementKind,
    pub is_unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// The fixed catalog, all locked. Seeds fresh stats on first use.
pub fn default_catalog() -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|def| Achievement {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            kind: def.kind,
            is_unlocked: false,
            unlocked_at: None,
        })
        .collect()
}

/// Returns `true` if the rule with the given id is satisfied by the current
/// state. Assumes the achievement is not yet unlocked.
fn rule_satisfied(id: &str, store: &EntryStore, stats: &UserStats, today: NaiveDate) -> bool {
    match id {
        "first_step" => stats.total_entries >= 1,
        "happiness_seeker" => {
            store.all().iter().filter(|e| e.mood == Mood::Happy).count() >= 50
        }

        "week_warrior" => stats.current_streak >= 7,
        "consistency_king" => stats.current_streak >= 14,
        "month_master" => stats.current_streak >= 30,

        "mood_explorer" => {
            let moods: BTreeSet<Mood> = store.all().iter().map(|e| e.mood).collect();
            moods.len() >= 5
        }
        "activity_master" => {
            let tags: BTreeSet<Activity> = store
                .all()
                .iter()
                .flat_map(|e| e.activities.iter().copied())
                .collect();
            tags.len() >= 10
        }

        "perfect_week" => {
            // Distinct entry days within the trailing 7 calendar days,
            // today inclusive
            let window_start = today - Duration::days(6);
            let days: BTreeSet<NaiveDate> = store
                .all()
                .iter()
                .map(|e| e.day)
                .filter(|d| *d >= window_start && *d <= today)
                .collect();
            days.len() >= 7
        }

        _ => false,
    }
}

/// Evaluate every locked achievement against the updated state, unlocking
/// those whose rule is satisfied.
///
/// Returns all achievements unlocked by this pass; a single submission can
/// unlock more than one, and none may be dropped.
pub fn evaluate(
    store: &EntryStore,
    stats: &mut UserStats,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    // Decide first against an immutable snapshot, then apply the unlocks.
    let mut satisfied = Vec::new();
    for (i, achievement) in stats.achievements.iter().enumerate() {
        if achievement.is_unlocked {
            continue;
        }
        if rule_satisfied(&achievement.id, store, stats, today) {
            satisfied.push(i);
        }
    }

    let mut unlocked = Vec::new();
    for i in satisfied {
        let achievement = &mut stats.achievements[i];
        achievement.is_unlocked = true;
        achievement.unlocked_at = Some(now);
        info!("Achievement unlocked: {}", achievement.title);
        unlocked.push(achievement.clone());
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoodEntry;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn submit(store: &mut EntryStore, stats: &mut UserStats, entry: MoodEntry) -> Vec<Achievement> {
        store.upsert(entry.clone());
        stats.record(&entry);
        evaluate(store, stats, entry.day, Utc::now())
    }

    fn unlocked(stats: &UserStats, id: &str) -> bool {
        stats.achievements.iter().any(|a| a.id == id && a.is_unlocked)
    }

    #[test]
    fn test_first_step_unlocks_on_first_entry() {
        let mut store = EntryStore::new();
        let mut stats = UserStats::default();

        let events = submit(&mut store, &mut stats, MoodEntry::new(day(1), Mood::Neutral));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "first_step");
        assert!(events[0].unlocked_at.is_some());
    }

    #[test]
    fn test_week_warrior_and_perfect_week_unlock_in_same_pass() {
        let mut store = EntryStore::new();
        let mut stats = UserStats::default();

        let mut last_events = Vec::new();
        for d in 1..=7 {
            last_events = submit(&mut store, &mut stats, MoodEntry::new(day(d), Mood::Happy));
        }

        let ids: Vec<&str> = last_events.iter().map(|a| a.id.as_str()).collect();
        assert!(ids.contains(&"week_warrior"));
        assert!(ids.contains(&"perfect_week"));
        // First Step went out with the first entry, not now
        assert!(!ids.contains(&"first_step"));
        assert!(unlocked(&stats, "first_step"));
    }

    #[test]
    fn test_mood_explorer_needs_all_five() {
        let mut store = EntryStore::new();
        let mut stats = UserStats::default();

        for (i, mood) in [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Angry]
            .into_iter()
            .enumerate()
        {
            submit(&mut store, &mut stats, MoodEntry::new(day(i as u32 + 1), mood));
        }
        assert!(!unlocked(&stats, "mood_explorer"));

        submit(&mut store, &mut stats, MoodEntry::new(day(5), Mood::Love));
        assert!(unlocked(&stats, "mood_explorer"));
    }

    #[test]
    fn test_happiness_seeker_unlocks_exactly_at_fifty() {
        let mut store = EntryStore::new();
        let mut stats = UserStats::default();

        for d in 1..=49 {
            let events = submit(&mut store, &mut stats, MoodEntry::new(day_of_year(d), Mood::Happy));
            assert!(events.iter().all(|a| a.id != "happiness_seeker"));
        }
        let events = submit(&mut store, &mut stats, MoodEntry::new(day_of_year(50), Mood::Happy));
        assert!(events.iter().any(|a| a.id == "happiness_seeker"));
    }

    fn day_of_year(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n as i64 - 1)
    }

    #[test]
    fn test_activity_master_needs_all_ten_tags() {
        let mut store = EntryStore::new();
        let mut stats = UserStats::default();

        let first_nine = Activity::ALL[..9].iter().copied();
        submit(
            &mut store,
            &mut stats,
            MoodEntry::new(day(1), Mood::Neutral).with_activities(first_nine),
        );
        assert!(!unlocked(&stats, "activity_master"));

        submit(
            &mut store,
            &mut stats,
            MoodEntry::new(day(2), Mood::Neutral).with_activities([Activity::ALL[9]]),
        );
        assert!(unlocked(&stats, "activity_master"));
    }

    #[test]
    fn test_unlocked_achievements_stay_unlocked() {
        let mut store = EntryStore::new();
        let mut stats = UserStats::default();

        submit(&mut store, &mut stats, MoodEntry::new(day(1), Mood::Happy));
        let first_unlock = stats
            .achievements
            .iter()
            .find(|a| a.id == "first_step")
            .unwrap()
            .unlocked_at;

        // Clearing the store does not re-lock or re-stamp anything
        store.clear();
        let events = evaluate(&store, &mut stats, day(2), Utc::now());
        assert!(events.is_empty());
        let after = stats
            .achievements
            .iter()
            .find(|a| a.id == "first_step")
            .unwrap();
        assert!(after.is_unlocked);
        assert_eq!(after.unlocked_at, first_unlock);
    }
}
