//! Waste Progress - command line front end
//!
//! Stands in for the mobile UI: logs waste, starts sessions and prints
//! progress for a local user.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use waste_progress::gamification::{Celebration, ProgressSnapshot};
use waste_progress::storage::config::{get_config_path, load_config_from};
use waste_progress::{points_for, ProgressEngine, SqliteStore, UserContext, WasteType};

#[derive(Parser, Debug)]
#[command(name = "waste-progress", version, about = "Streaks, badges and challenges for waste logging")]
struct Cli {
    /// User id; defaults to the local profile
    #[arg(long, global = true)]
    user: Option<Uuid>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a session: seed badges and generate challenges
    Start,
    /// Log a waste entry
    Log {
        #[arg(long)]
        waste_type: WasteType,
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
    },
    /// Award a special badge
    Award { badge_id: String },
    /// Show badges, streak, challenges and recent achievements
    Status,
    /// Remove expired and old completed challenges
    Prune,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(get_config_path);
    let config = load_config_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let db_path = config.database_path();
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;
    let engine = ProgressEngine::new(Arc::new(store), &config);

    let user = UserContext::new(cli.user.unwrap_or_else(Uuid::nil));
    let now = Utc::now();

    tracing::debug!("Running {:?} for {}", cli.command, user.user_id);

    match cli.command {
        Command::Start => {
            let created = engine.start_session(&user, now).await?;
            println!("Session started, {created} new challenges");
        }
        Command::Log {
            waste_type,
            quantity,
        } => {
            let points = points_for(waste_type, quantity);

            let repo = engine.repository();
            let mut tally = repo.load_tally(&user).await?;
            tally.record(points);
            repo.save_tally(&user, &tally).await?;

            // Gamification is additive: the entry stays recorded even if
            // progress evaluation fails.
            match engine
                .on_waste_logged(
                    &user,
                    now,
                    tally.total_entries as f64,
                    tally.total_points as f64,
                )
                .await
            {
                Ok(outcome) => {
                    let celebration = Celebration::select(&outcome, points);
                    println!("{}", celebration.title);
                    println!("{}", celebration.message);
                }
                Err(e) => {
                    tracing::warn!("Progress update failed: {}", e);
                    println!("Logged {quantity} {waste_type} for {points} points");
                }
            }
        }
        Command::Award { badge_id } => {
            if engine.award_badge(&user, &badge_id, now).await? {
                println!("Awarded {badge_id}");
            } else {
                println!("{badge_id} was already earned");
            }
        }
        Command::Status => {
            let snapshot = engine.snapshot(&user, now).await?;
            print_snapshot(&snapshot);
        }
        Command::Prune => {
            let removed = engine.prune_challenges(&user, now).await?;
            println!("Removed {removed} challenges");
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &ProgressSnapshot) {
    let streak = &snapshot.streak;
    println!(
        "Streak: {} days (longest {}){}",
        streak.current_streak,
        streak.longest_streak,
        if streak.active { "" } else { ", inactive" }
    );

    println!("\nBadges:");
    for status in &snapshot.badges {
        let mark = if status.earned { "x" } else { " " };
        println!("  [{mark}] {} - {}", status.badge.name, status.badge.description);
    }

    println!("\nChallenges:");
    for c in &snapshot.challenges {
        let state = if c.completed { "done" } else { c.period.as_str() };
        println!(
            "  {} {}/{} ({}) +{} pts",
            c.name, c.progress, c.goal, state, c.reward
        );
    }

    if !snapshot.achievements.is_empty() {
        println!("\nRecent achievements:");
        for a in snapshot.achievements.iter().take(5) {
            println!("  {} {}", a.timestamp.format("%Y-%m-%d"), a.title);
        }
    }
}
