/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use timetable::config::TimetableConfig;
use timetable::grid::Grid;
use timetable::render::{self, export};
use timetable::scheduler::{audit, Scheduler};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Weekly class timetable generator.
///
/// Example:
///   timetable -c demos/school.yaml -s 42 -o school_timetable
#[derive(Debug, Parser)]
#[command(
    name = "timetable",
    about = "Weekly class timetable generator",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML timetable configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed for the random choice between candidate courses.
    /// A random seed is drawn (and logged) when omitted.
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Override max_per_subject_per_day from the configuration.
    #[arg(short = 'm', long = "max-per-day")]
    max_per_day: Option<usize>,

    /// Directory receiving one CSV file per day.
    #[arg(short = 'o', long = "output", default_value = "school_timetable")]
    output: PathBuf,

    /// Skip the CSV export.
    #[arg(long = "no-export", default_value_t = false)]
    no_export: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);

    info!(
        config      = ?cli.config,
        seed        = seed,
        max_per_day = ?cli.max_per_day,
        output      = %cli.output.display(),
        no_export   = cli.no_export,
        "Configuration"
    );

    // ── Load and validate configuration ───────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => match TimetableConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load timetable configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No configuration file provided, using default timetable settings");
            TimetableConfig::default()
        }
    };
    if let Some(cap) = cli.max_per_day {
        config.max_per_subject_per_day = cap;
    }

    let layout = match config.layout() {
        Ok(layout) => layout,
        Err(e) => {
            error!("Invalid timetable configuration: {}", e);
            process::exit(1);
        }
    };

    // ── Fill ──────────────────────────────────────────────────────────────────
    info!("Step 1: creating empty timetable");
    let mut grid = Grid::new(layout);

    info!("Step 2: filling timetable with courses");
    let cap = config.max_per_subject_per_day;
    let mut scheduler = match Scheduler::seeded(config.courses.clone(), cap, seed) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!("Cannot build scheduler: {}", e);
            process::exit(1);
        }
    };
    let stats = scheduler.fill(&mut grid);
    if !stats.is_complete() {
        warn!(
            unfillable = stats.unfillable,
            seed = seed,
            "Timetable has slots without a qualifying course"
        );
    }

    // ── Report and export ─────────────────────────────────────────────────────
    println!();
    print!(
        "{}",
        render::render_subject_counts(&audit::subject_counts(&grid, &config.courses), cap)
    );

    if cli.no_export {
        info!("CSV export skipped");
    } else {
        match export::export_csv_dir(&grid, &cli.output) {
            Ok(paths) => info!(
                files = paths.len(),
                dir = %cli.output.display(),
                "Timetable saved"
            ),
            Err(e) => {
                error!("Failed to export timetable: {:#}", e);
                process::exit(1);
            }
        }
    }

    info!("Step 3: printing timetable");
    println!();
    print!("{}", render::render_text(&grid));
    println!();
    print!("{}", render::render_summary(&grid, config.courses.len(), cap));
}
