/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Greedy random timetable filling.
//!
//! [`Scheduler::fill`] walks a [`Grid`] once, in a fixed order, and decides
//! every `Empty` slot on the spot:
//!
//! ```text
//! for day in days                     (input order)
//!   for period in periods − lunch     (input order)
//!     for room in rooms               (input order)
//!       candidates = courses where
//!           teacher free in (day, period)
//!         ∧ count(day, subject) < max_per_subject_per_day
//!       Assigned(random candidate)  or  Unfillable(reason)
//! ```
//!
//! Constraints are evaluated against the grid *as already mutated by this
//! pass*, so the result depends on traversal order and is not globally
//! optimal.  There is no backtracking and no slot is revisited.
//!
//! # Randomness
//! The scheduler owns a single [`Rng`] stream.  Exactly one draw is taken per
//! slot that has at least one candidate, in traversal order, so a fixed seed
//! and fixed inputs always reproduce the same grid.
//!
//! # Example
//! ```rust,ignore
//! let config = TimetableConfig::default();
//! let mut grid = Grid::new(config.layout()?);
//! let mut scheduler = Scheduler::seeded(config.courses, config.max_per_subject_per_day, 42)?;
//! let stats = scheduler.fill(&mut grid);
//! ```

pub mod audit;
pub mod error;

pub use error::SchedulerError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::grid::{Course, Grid, Slot, SlotPos, UnfillableReason};

use audit::check_constraints;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default per-day cap on occurrences of one subject.
///
/// A subject stays eligible while its count for the day is *below* this value,
/// so with `3` it can appear up to three times a day.
pub const DEFAULT_MAX_PER_SUBJECT_PER_DAY: usize = 3;

// ── FillStats ─────────────────────────────────────────────────────────────────

/// Outcome counters of one [`Scheduler::fill`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillStats {
    /// Slots that received a course.
    pub assigned: usize,
    /// Slots marked unfillable.
    pub unfillable: usize,
    /// Non-lunch slots that were not `Empty` when visited and were left as is.
    pub preset: usize,
}

impl FillStats {
    /// `true` when the pass did not leave any slot unfillable.
    pub fn is_complete(&self) -> bool {
        self.unfillable == 0
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Fills timetable grids from a fixed course catalogue.
///
/// Generic over the random source so tests and callers can inject any
/// seedable [`Rng`]; [`Scheduler::seeded`] covers the common case.
pub struct Scheduler<R = StdRng> {
    courses: Vec<Course>,
    max_per_subject_per_day: usize,
    rng: R,
}

impl Scheduler<StdRng> {
    /// Scheduler drawing from `StdRng::seed_from_u64(seed)`.
    pub fn seeded(
        courses: Vec<Course>,
        max_per_subject_per_day: usize,
        seed: u64,
    ) -> Result<Self, SchedulerError> {
        Self::new(courses, max_per_subject_per_day, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Scheduler<R> {
    /// # Errors
    /// [`SchedulerError::NoCourses`] for an empty catalogue and
    /// [`SchedulerError::ZeroSubjectCap`] for a cap of zero.
    pub fn new(
        courses: Vec<Course>,
        max_per_subject_per_day: usize,
        rng: R,
    ) -> Result<Self, SchedulerError> {
        if courses.is_empty() {
            return Err(SchedulerError::NoCourses);
        }
        if max_per_subject_per_day == 0 {
            return Err(SchedulerError::ZeroSubjectCap);
        }
        Ok(Self {
            courses,
            max_per_subject_per_day,
            rng,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn max_per_subject_per_day(&self) -> usize {
        self.max_per_subject_per_day
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Decide every `Empty` slot of `grid` in place.
    ///
    /// Lunch slots are skipped.  Slots that already hold a course or an
    /// unfillable marker are left untouched but still count towards the
    /// teacher and subject checks of later slots.
    pub fn fill(&mut self, grid: &mut Grid) -> FillStats {
        let layout = grid.layout().clone();
        let mut stats = FillStats::default();

        info!(
            days = layout.days().len(),
            periods = layout.periods().len(),
            rooms = layout.rooms().len(),
            courses = self.courses.len(),
            cap = self.max_per_subject_per_day,
            "=== Scheduler::fill() ==="
        );

        for (day, day_name) in layout.days().iter().enumerate() {
            info!(day = %day_name, "Filling day");

            for (period, period_name) in layout.periods().iter().enumerate() {
                if period == layout.lunch_period() {
                    continue;
                }

                for (room, room_name) in layout.rooms().iter().enumerate() {
                    let pos = SlotPos::new(day, period, room);
                    if !matches!(grid[pos], Slot::Empty) {
                        stats.preset += 1;
                        continue;
                    }

                    match collect_candidates(&self.courses, self.max_per_subject_per_day, grid, pos) {
                        Ok(candidates) => {
                            let course = candidates[self.rng.gen_range(0..candidates.len())].clone();
                            debug!(
                                day     = %day_name,
                                period  = %period_name,
                                room    = %room_name,
                                code    = %course.code,
                                teacher = %course.teacher,
                                "✓ assigned"
                            );
                            grid.decide(pos, Slot::Assigned(course));
                            stats.assigned += 1;
                        }
                        Err(reason) => {
                            warn!(
                                day    = %day_name,
                                period = %period_name,
                                room   = %room_name,
                                teacher_busy   = reason.teacher_busy,
                                subject_capped = reason.subject_capped,
                                "✗ no qualifying course — slot left unfillable"
                            );
                            grid.decide(pos, Slot::Unfillable(reason));
                            stats.unfillable += 1;
                        }
                    }
                }
            }
        }

        self.run_constraint_audit(grid);

        info!(
            assigned = stats.assigned,
            unfillable = stats.unfillable,
            preset = stats.preset,
            "=== Fill complete ==="
        );

        stats
    }

    // ── Post-fill audit ───────────────────────────────────────────────────────

    /// Re-check the finished grid and log any violation.
    ///
    /// Violations can only come from slots preset before the pass; the pass
    /// itself never produces one.  Warning only, the grid is returned as is.
    fn run_constraint_audit(&self, grid: &Grid) {
        let violations = check_constraints(grid, self.max_per_subject_per_day);
        if violations.is_empty() {
            debug!("Constraint audit passed");
            return;
        }
        for violation in &violations {
            warn!(%violation, "Constraint audit");
        }
    }
}

// ── Candidate selection ───────────────────────────────────────────────────────

/// Courses eligible for `pos` given the grid's current state, in catalogue
/// order.  `Err` carries the rejection tally when none qualify.
fn collect_candidates<'c>(
    courses: &'c [Course],
    cap: usize,
    grid: &Grid,
    pos: SlotPos,
) -> Result<Vec<&'c Course>, UnfillableReason> {
    let candidates: Vec<&Course> = courses
        .iter()
        .filter(|c| {
            grid.is_teacher_free(&c.teacher, pos.day, pos.period)
                && grid.count_subject_in_day(pos.day, &c.code) < cap
        })
        .collect();

    if candidates.is_empty() {
        Err(unfillable_reason(courses, cap, grid, pos))
    } else {
        Ok(candidates)
    }
}

/// Tally which rule rejected each course for `pos`.
fn unfillable_reason(courses: &[Course], cap: usize, grid: &Grid, pos: SlotPos) -> UnfillableReason {
    let mut reason = UnfillableReason::default();
    for course in courses {
        if !grid.is_teacher_free(&course.teacher, pos.day, pos.period) {
            reason.teacher_busy += 1;
        } else if grid.count_subject_in_day(pos.day, &course.code) >= cap {
            reason.subject_capped += 1;
        }
    }
    reason
}

// ── Tests ─────────────────────────────────────────────────────────────────────
