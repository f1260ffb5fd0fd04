//! Moodlog CLI
//!
//! Command-line interface for recording daily moods and viewing streaks,
//! points, achievements, and history.

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use moodlog_core::{
    export::{ExportFormat, Exporter},
    report, Activity, EnergyLevel, Mood, MoodEntry, MoodJournal,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

#[derive(Parser)]
#[command(name = "moodlog")]
#[command(about = "Personal mood journal - one mood a day, streaks and all")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record today's mood (or another day's with --date)
    Log {
        /// Mood (happy, neutral, sad, angry, love)
        #[arg(short, long)]
        mood: String,

        /// Day to record (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note for the day
        #[arg(short, long)]
        comment: Option<String>,

        /// Activity tag, repeatable (exercise, meditation, reading, ...)
        #[arg(short, long = "activity")]
        activities: Vec<String>,

        /// Energy level, 1 (very low) to 5 (very high)
        #[arg(short, long)]
        energy: Option<u8>,

        /// Hours slept last night
        #[arg(short, long)]
        sleep: Option<f64>,
    },

    /// Show the trailing week's stats, streaks, and points
    Week,

    /// Show the mood distribution
    Moods {
        /// Restrict to a month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the most popular activity tags
    Activities {
        /// Number of tags to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show sleep and energy averages
    Sleep,

    /// Show the achievement catalog
    Achievements,

    /// List recorded entries
    History {
        /// Restrict to a month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export the journal to CSV or JSON
    Export {
        /// Output format (csv or json)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only the summary (no raw entries)
        #[arg(long)]
        summary: bool,
    },

    /// Erase all entries, stats, and unlocked achievements
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct MoodRow {
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Entries")]
    count: String,
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Times")]
    count: String,
}

#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Achievement")]
    title: String,
    #[tabled(rename = "Goal")]
    description: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Activities")]
    activities: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moodlog=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut journal = MoodJournal::open_default()?;

    match cli.command {
        Commands::Log {
            mood,
            date,
            comment,
            activities,
            energy,
            sleep,
        } => log_entry(&mut journal, mood, date, comment, activities, energy, sleep),

        Commands::Week => show_week(&journal),
        Commands::Moods { month } => show_moods(&journal, month),
        Commands::Activities { limit } => show_activities(&journal, limit),
        Commands::Sleep => show_sleep(&journal),
        Commands::Achievements => show_achievements(&journal),
        Commands::History { month } => show_history(&journal, month),

        Commands::Export {
            format,
            output,
            summary,
        } => {
            let export_format = ExportFormat::from_str(&format)
                .ok_or_else(|| anyhow!("Unknown format: {} (use csv or json)", format))?;
            let exporter = Exporter::new(journal.entries(), journal.stats());

            let writer: Box<dyn Write> = match output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::stdout()),
            };

            if summary {
                exporter.export_summary(writer, export_format)?;
            } else {
                exporter.export(writer, export_format)?;
            }

            Ok(())
        }

        Commands::Clear { yes } => clear_all(&mut journal, yes),
    }
}

fn log_entry(
    journal: &mut MoodJournal,
    mood: String,
    date: Option<String>,
    comment: Option<String>,
    activities: Vec<String>,
    energy: Option<u8>,
    sleep: Option<f64>,
) -> Result<()> {
    let mood = Mood::parse(&mood).ok_or_else(|| {
        anyhow!(
            "Unknown mood: {} (use one of: {})",
            mood,
            Mood::ALL
                .iter()
                .map(|m| m.label().to_lowercase())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let day = match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")?,
        None => Utc::now().date_naive(),
    };

    let mut entry = MoodEntry::new(day, mood);

    let mut tags = Vec::new();
    for name in &activities {
        let tag = Activity::parse(name).ok_or_else(|| anyhow!("Unknown activity: {}", name))?;
        tags.push(tag);
    }
    entry = entry.with_activities(tags);

    if let Some(level) = energy {
        let level = EnergyLevel::from_level(level)
            .ok_or_else(|| anyhow!("Energy must be 1 to 5, got {}", level))?;
        entry = entry.with_energy(level);
    }

    if let Some(hours) = sleep {
        if !(0.0..=24.0).contains(&hours) {
            bail!("Sleep hours must be between 0 and 24, got {}", hours);
        }
        entry = entry.with_sleep(hours);
    }

    if let Some(text) = comment {
        entry = entry.with_comment(text);
    }

    journal.submit(entry);

    let stats = journal.stats();
    println!(
        "\n{} {} logged for {}",
        mood.emoji(),
        mood.label().bold(),
        day
    );
    println!(
        "Streak: {}  Points: {}",
        stats.current_streak.to_string().cyan(),
        stats.total_points.to_string().cyan()
    );

    // Show every achievement this save unlocked
    for achievement in journal.take_unlocks() {
        println!(
            "{} {} {}",
            "🏆 Achievement unlocked:".yellow().bold(),
            achievement.icon,
            achievement.title.bold()
        );
    }

    Ok(())
}

fn show_week(journal: &MoodJournal) -> Result<()> {
    let today = Utc::now().date_naive();
    let weekly = report::weekly_stats(journal.entries(), today);
    let stats = journal.stats();

    println!("\n{}", "📊 This Week".bold().cyan());
    println!("{}", "─".repeat(40));

    let rows = vec![
        StatRow {
            metric: "Entries".to_string(),
            value: weekly.total_entries.to_string(),
        },
        StatRow {
            metric: "Avg Mood Points".to_string(),
            value: format!("{:.1}", weekly.average_mood_points),
        },
        StatRow {
            metric: "Most Active Day".to_string(),
            value: weekly
                .most_active_day
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        },
        StatRow {
            metric: "Current Streak".to_string(),
            value: format!("{} days", stats.current_streak),
        },
        StatRow {
            metric: "Longest Streak".to_string(),
            value: format!("{} days", stats.longest_streak),
        },
        StatRow {
            metric: "Total Points".to_string(),
            value: stats.total_points.to_string(),
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_moods(journal: &MoodJournal, month: Option<String>) -> Result<()> {
    let (entries, label) = scoped_entries(journal, month)?;

    println!("\n{}", format!("🎭 Mood Breakdown ({})", label).bold().cyan());
    println!("{}", "─".repeat(40));

    let distribution = report::mood_distribution(&entries);
    let rows: Vec<MoodRow> = distribution
        .iter()
        .map(|(mood, count)| MoodRow {
            mood: format!("{} {}", mood.emoji(), mood.label()),
            count: count.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_activities(journal: &MoodJournal, limit: usize) -> Result<()> {
    let ranked = report::activity_popularity(journal.entries());

    if ranked.is_empty() {
        println!("\n{}", "No activities tagged yet.".yellow());
        return Ok(());
    }

    println!("\n{}", "🏃 Top Activities".bold().cyan());
    println!("{}", "─".repeat(40));

    let rows: Vec<ActivityRow> = ranked
        .into_iter()
        .take(limit)
        .map(|(activity, count)| ActivityRow {
            activity: activity.label().to_string(),
            count: count.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_sleep(journal: &MoodJournal) -> Result<()> {
    let summary = report::energy_and_sleep_summary(journal.entries());

    println!("\n{}", "😴 Sleep & Energy".bold().cyan());
    println!("{}", "─".repeat(40));

    let rows = vec![
        StatRow {
            metric: "Avg Sleep".to_string(),
            value: summary
                .average_sleep_hours
                .map(|h| format!("{:.1}h", h))
                .unwrap_or_else(|| "-".to_string()),
        },
        StatRow {
            metric: "Typical Energy".to_string(),
            value: summary
                .typical_energy
                .map(|e| e.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_achievements(journal: &MoodJournal) -> Result<()> {
    let achievements = &journal.stats().achievements;
    let unlocked = achievements.iter().filter(|a| a.is_unlocked).count();

    println!(
        "\n{} {}",
        "🏆 Achievements".bold().cyan(),
        format!("({}/{})", unlocked, achievements.len()).bold()
    );
    println!("{}", "─".repeat(60));

    let rows: Vec<AchievementRow> = achievements
        .iter()
        .map(|a| AchievementRow {
            icon: a.icon.clone(),
            title: a.title.clone(),
            description: a.description.clone(),
            status: match a.unlocked_at {
                Some(when) => format!("Unlocked {}", when.format("%Y-%m-%d")),
                None => "Locked".to_string(),
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn show_history(journal: &MoodJournal, month: Option<String>) -> Result<()> {
    let (mut entries, label) = scoped_entries(journal, month)?;
    entries.sort_by_key(|e| e.day);

    if entries.is_empty() {
        println!("\n{}", "No entries recorded for this period.".yellow());
        return Ok(());
    }

    println!("\n{}", format!("📅 History ({})", label).bold().cyan());
    println!("{}", "─".repeat(60));

    let rows: Vec<HistoryRow> = entries
        .iter()
        .map(|e| HistoryRow {
            day: e.day.to_string(),
            mood: format!("{} {}", e.mood.emoji(), e.mood.label()),
            activities: e
                .activities
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join(", "),
            note: e.comment.clone().unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}

fn clear_all(journal: &mut MoodJournal, yes: bool) -> Result<()> {
    if !yes {
        print!("Erase all entries and stats? This cannot be undone. [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("{}", "Nothing erased.".yellow());
            return Ok(());
        }
    }

    journal.clear_all();
    println!("{}", "✓ Journal cleared".green());
    Ok(())
}

/// Entries scoped to a YYYY-MM month when given, the whole journal otherwise
fn scoped_entries(journal: &MoodJournal, month: Option<String>) -> Result<(Vec<MoodEntry>, String)> {
    match month {
        Some(s) => {
            let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
                .map_err(|_| anyhow!("Month must be YYYY-MM, got {}", s))?;
            let entries = journal
                .entries_for_month(first)
                .into_iter()
                .cloned()
                .collect();
            Ok((entries, format!("{}-{:02}", first.year(), first.month())))
        }
        None => Ok((journal.entries().to_vec(), "all time".to_string())),
    }
}
