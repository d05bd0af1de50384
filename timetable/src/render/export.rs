/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Spreadsheet export: one CSV file per day, each shaped like
//! [`day_table`](super::day_table) (header `Period, <room>…`, then one row
//! per period).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;
use tracing::info;

use super::day_table;
use crate::grid::Grid;

/// Write day `day` of `grid` as CSV into `writer`.
pub fn write_day_csv<W: Write>(grid: &Grid, day: usize, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for row in day_table(grid, day) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// File name for day `day`: 1-based position plus a lowercase,
/// filesystem-safe form of the day label, e.g. `01_monday.csv`.
pub fn day_file_name(day: usize, name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{:02}_{}.csv", day + 1, slug)
}

/// Export every day of `grid` into `dir` (created if missing) and return the
/// written paths in day order.
///
/// # Errors
/// Returns an error if the directory or a file cannot be created or written.
pub fn export_csv_dir(grid: &Grid, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create export directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(grid.layout().days().len());
    for (day, name) in grid.layout().days().iter().enumerate() {
        let path = dir.join(day_file_name(day, name));
        let file = File::create(&path)
            .with_context(|| format!("Cannot create export file: {}", path.display()))?;
        write_day_csv(grid, day, file)
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;

        info!(day = %name, path = %path.display(), "Exported day");
        written.push(path);
    }
    Ok(written)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
