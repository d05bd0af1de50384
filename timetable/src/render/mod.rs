/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Human-readable output of a finished [`Grid`].
//!
//! Everything here is a pure function of its inputs: rendering the same grid
//! twice yields the same text.  [`day_table`] is the common tabular model
//! behind both the console view and the CSV export in [`export`].

pub mod export;

use crate::grid::{Grid, Slot, SlotPos, SlotState};
use crate::scheduler::audit::DaySubjectCounts;

pub const LUNCH_LABEL: &str = "LUNCH BREAK";
pub const EMPTY_LABEL: &str = "EMPTY";
pub const UNFILLABLE_LABEL: &str = "FREE";

const PERIOD_COLUMN_WIDTH: usize = 12;
const ROOM_COLUMN_WIDTH: usize = 25;

/// Display label of a single slot.
pub fn slot_label(slot: &Slot) -> String {
    match slot {
        Slot::Lunch => LUNCH_LABEL.to_string(),
        Slot::Empty => EMPTY_LABEL.to_string(),
        Slot::Unfillable(_) => UNFILLABLE_LABEL.to_string(),
        Slot::Assigned(course) => format!("{} - {}", course.code, course.teacher),
    }
}

/// One day as rows of cells: a `Period, <room>…` header, then one row per
/// period (lunch included).
pub fn day_table(grid: &Grid, day: usize) -> Vec<Vec<String>> {
    let layout = grid.layout();
    let mut rows = Vec::with_capacity(layout.periods().len() + 1);

    let mut header = vec![String::from("Period")];
    header.extend(layout.rooms().iter().cloned());
    rows.push(header);

    for (period, period_name) in layout.periods().iter().enumerate() {
        let mut row = vec![period_name.clone()];
        row.extend(
            (0..layout.rooms().len()).map(|room| slot_label(&grid[SlotPos::new(day, period, room)])),
        );
        rows.push(row);
    }
    rows
}

/// Left-align every cell to its column width, the last column included;
/// widths grow to fit the longest cell.  Returns the formatted lines and
/// the total width.
fn format_table(rows: &[Vec<String>]) -> (Vec<String>, usize) {
    let columns = rows.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            let floor = if col == 0 {
                PERIOD_COLUMN_WIDTH
            } else {
                ROOM_COLUMN_WIDTH
            };
            rows.iter()
                .map(|r| r[col].chars().count() + 1)
                .max()
                .unwrap_or(0)
                .max(floor)
        })
        .collect();

    let lines = rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<String>()
        })
        .collect();

    (lines, widths.iter().sum())
}

/// Render one day as a titled, column-aligned block.
pub fn render_day(grid: &Grid, day: usize) -> String {
    let (lines, width) = format_table(&day_table(grid, day));
    let rule = "-".repeat(width);
    let name = &grid.layout().days()[day];

    let mut out = format!("{}\n{rule}\n", name.to_uppercase());
    let mut lines = lines.into_iter();
    if let Some(header) = lines.next() {
        out.push_str(&format!("{header}\n{rule}\n"));
    }
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render the whole week, one block per day.
pub fn render_text(grid: &Grid) -> String {
    let banner = "=".repeat(90);
    let mut out = format!("{banner}\nCOMPLETE WEEKLY TIMETABLE\n{banner}\n");
    for day in 0..grid.layout().days().len() {
        out.push('\n');
        out.push_str(&render_day(grid, day));
    }
    out
}

/// Per-day subject occurrence report.
pub fn render_subject_counts(counts: &[DaySubjectCounts], cap: usize) -> String {
    let mut out = format!("SUBJECT COUNTS PER DAY (max {cap} per day)\n{}\n", "=".repeat(60));
    for day in counts {
        out.push_str(&format!("\n{}:\n", day.day));
        for (code, count) in &day.counts {
            out.push_str(&format!("  {code}: {count} times\n"));
        }
    }
    out
}

/// Closing summary: dimensions, rule, and how many slots were filled.
pub fn render_summary(grid: &Grid, course_count: usize, cap: usize) -> String {
    let layout = grid.layout();
    let lunch = &layout.periods()[layout.lunch_period()];
    format!(
        "Summary:\n\
         • {} days, {} periods per day\n\
         • {} classrooms, {} subjects\n\
         • Lunch break: {}\n\
         • Rule: max {} same subject per day\n\
         • {} slots assigned, {} unfillable\n",
        layout.days().len(),
        layout.periods().len(),
        layout.rooms().len(),
        course_count,
        lunch,
        cap,
        grid.count_state(SlotState::Assigned),
        grid.count_state(SlotState::Unfillable),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
