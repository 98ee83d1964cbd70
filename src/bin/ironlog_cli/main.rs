// ABOUTME: Ironlog CLI - drives the sync layer against the configured document store
// ABOUTME: Catalog seeding, schedule editing, workout start/finish/undo and history per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Seed the default exercise library for a user
//! ironlog-cli --uid alice seed-defaults
//!
//! # Show the catalog grouped by muscle category
//! ironlog-cli --uid alice catalog
//!
//! # Show only exercises for today's scheduled muscle groups
//! ironlog-cli --uid alice catalog --today
//!
//! # Build a two-day schedule
//! ironlog-cli --uid alice schedule add-day
//! ironlog-cli --uid alice schedule assign 1 Chest Triceps
//! ironlog-cli --uid alice schedule assign 2 "Lower Back" Quads
//!
//! # Finish today's workout with a rating, then undo it
//! ironlog-cli --uid alice workout finish --rating 4
//! ironlog-cli --uid alice workout undo
//!
//! # List every recorded workout
//! ironlog-cli --uid alice history
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use ironlog::{
    auth::AuthUser,
    config::{AppConfig, StoreUrl},
    logging::LoggingConfig,
    state::AppState,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "ironlog-cli",
    about = "Ironlog workout tracker CLI",
    long_about = "Command-line driver for the ironlog sync layer: catalog, schedule and workouts for one user."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// User id every path is scoped by
    #[arg(long, global = true, default_value = "local")]
    uid: String,

    /// Account email overlaid onto the profile
    #[arg(long, global = true)]
    email: Option<String>,

    /// Store URL override (`memory://`, `sqlite:<path>`, `sqlite::memory:`)
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Seed the default exercise library into an empty catalog
    SeedDefaults,

    /// Show the exercise catalog
    Catalog {
        /// Split around today's scheduled muscle groups
        #[arg(long)]
        today: bool,

        /// Keep only titles containing this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Muscle-tag schedule commands
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommand,
    },

    /// Workout record commands
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// List every workout, newest first
    History,
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// Show every day and its muscle groups
    Show,

    /// Append an empty day (at most 7)
    AddDay,

    /// Remove the last day (at least 1 remains)
    RemoveDay,

    /// Add muscle groups to a day
    Assign {
        /// Day number
        day: u8,

        /// Muscle-group labels; quote multi-word labels
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Remove one muscle group from a day
    Unassign {
        /// Day number
        day: u8,

        /// Muscle-group label
        tag: String,
    },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// Show a workout record and its tracked exercises
    Show {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<String>,
    },

    /// Mark a workout started
    Start {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<String>,
    },

    /// Finish a workout and advance the workout day
    Finish {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<String>,

        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Undo a finish and rewind the workout day
    Undo {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.store_url.as_deref() {
        config.store = StoreUrl::parse_url(url)?;
    }
    helpers::prepare_store_dir(&config.store).await?;

    info!(store = %config.store.to_connection_string(), uid = %cli.uid, "Ironlog CLI");
    let mut state = AppState::from_config(&config).await?;
    state.sign_in(AuthUser::new(cli.uid, cli.email)).await?;

    match cli.command {
        Command::SeedDefaults => commands::catalog::seed_defaults(&mut state).await?,
        Command::Catalog { today, filter } => {
            commands::catalog::show(&state, today, filter.as_deref());
        }
        Command::Schedule { action } => match action {
            ScheduleCommand::Show => commands::schedule::show(&state),
            ScheduleCommand::AddDay => commands::schedule::add_day(&mut state).await?,
            ScheduleCommand::RemoveDay => commands::schedule::remove_day(&mut state).await?,
            ScheduleCommand::Assign { day, tags } => {
                commands::schedule::assign(&mut state, day, &tags).await?;
            }
            ScheduleCommand::Unassign { day, tag } => {
                commands::schedule::unassign(&mut state, day, &tag).await?;
            }
        },
        Command::Workout { action } => match action {
            WorkoutCommand::Show { date } => {
                commands::workout::show(&mut state, date.as_deref()).await?;
            }
            WorkoutCommand::Start { date } => {
                commands::workout::start(&mut state, date.as_deref()).await?;
            }
            WorkoutCommand::Finish {
                date,
                rating,
                notes,
            } => {
                commands::workout::finish(&mut state, date.as_deref(), rating, notes).await?;
            }
            WorkoutCommand::Undo { date } => {
                commands::workout::undo(&mut state, date.as_deref()).await?;
            }
        },
        Command::History => commands::workout::history(&mut state).await?,
    }

    Ok(())
}
