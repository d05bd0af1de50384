/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Post-fill inspection of a finished grid.
//!
//! Two read-only passes over a [`Grid`]:
//!
//! * [`subject_counts`] — how often each catalogue subject appears per day,
//!   for the console report.
//! * [`check_constraints`] — re-derives both scheduling rules from scratch and
//!   lists every breach.  A grid produced purely by
//!   [`Scheduler::fill`](super::Scheduler::fill) always comes back clean;
//!   breaches point at slots that were preset through
//!   [`Grid::set`](crate::grid::Grid::set).

use std::collections::BTreeMap;
use std::fmt;

use crate::grid::{Course, Grid, Slot};

// ── Subject counts ────────────────────────────────────────────────────────────

/// Occurrences of each subject on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySubjectCounts {
    pub day: String,
    /// `(subject code, count)` in first-appearance catalogue order.  A code
    /// taught by several teachers is listed once.
    pub counts: Vec<(String, usize)>,
}

/// Count every catalogue subject on every day of `grid`.
pub fn subject_counts(grid: &Grid, courses: &[Course]) -> Vec<DaySubjectCounts> {
    let mut codes: Vec<&str> = Vec::new();
    for course in courses {
        if !codes.contains(&course.code.as_str()) {
            codes.push(&course.code);
        }
    }

    grid.layout()
        .days()
        .iter()
        .enumerate()
        .map(|(day, name)| DaySubjectCounts {
            day: name.clone(),
            counts: codes
                .iter()
                .map(|code| (code.to_string(), grid.count_subject_in_day(day, code)))
                .collect(),
        })
        .collect()
}

// ── Constraint audit ──────────────────────────────────────────────────────────

/// A breach of one of the two scheduling rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `code` appears `count` times on `day`, more than `cap`.
    SubjectOverCap {
        day: String,
        code: String,
        count: usize,
        cap: usize,
    },
    /// `teacher` holds more than one room during `(day, period)`.
    TeacherDoubleBooked {
        day: String,
        period: String,
        teacher: String,
        rooms: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::SubjectOverCap {
                day,
                code,
                count,
                cap,
            } => write!(f, "{code} scheduled {count} times on {day} (cap {cap})"),

            Violation::TeacherDoubleBooked {
                day,
                period,
                teacher,
                rooms,
            } => write!(f, "{teacher} teaches in {rooms} rooms during {day} {period}"),
        }
    }
}

/// Scan `grid` for subjects over `cap` on a day and teachers booked twice in
/// one period.
///
/// Violations are returned day by day; within a day, cap breaches come first
/// (sorted by code), then double bookings (by period, then teacher).
pub fn check_constraints(grid: &Grid, cap: usize) -> Vec<Violation> {
    let layout = grid.layout();
    let mut violations = Vec::new();

    for (day, day_name) in layout.days().iter().enumerate() {
        let mut per_code: BTreeMap<&str, usize> = BTreeMap::new();
        for course in grid.day_slots(day).iter().filter_map(Slot::course) {
            *per_code.entry(course.code.as_str()).or_default() += 1;
        }
        for (code, count) in per_code {
            if count > cap {
                violations.push(Violation::SubjectOverCap {
                    day: day_name.clone(),
                    code: code.to_string(),
                    count,
                    cap,
                });
            }
        }

        for (period, period_name) in layout.periods().iter().enumerate() {
            let mut per_teacher: BTreeMap<&str, usize> = BTreeMap::new();
            for course in grid.period_slots(day, period).iter().filter_map(Slot::course) {
                *per_teacher.entry(course.teacher.as_str()).or_default() += 1;
            }
            for (teacher, rooms) in per_teacher {
                if rooms > 1 {
                    violations.push(Violation::TeacherDoubleBooked {
                        day: day_name.clone(),
                        period: period_name.clone(),
                        teacher: teacher.to_string(),
                        rooms,
                    });
                }
            }
        }
    }

    violations
}

// ── Tests ─────────────────────────────────────────────────────────────────────
