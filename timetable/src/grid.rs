/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core timetable data structures.
//!
//! A week is modelled as a flat [`Grid`] of [`Slot`]s addressed by
//! `(day, period, room)`:
//!
//! ```text
//! offset(day, period, room) = (day × |periods| + period) × |rooms| + room
//! ```
//!
//! The flat order is also the fill order used by the scheduler (day, then
//! period, then room), so walking `slots` front to back visits slots exactly
//! the way [`Scheduler::fill`](crate::scheduler::Scheduler::fill) does.
//!
//! # Slot lifecycle
//!
//! ```text
//!            Grid::new                 Scheduler::fill
//! lunch   ──────────────►  Lunch   (never changes)
//! other   ──────────────►  Empty  ───►  Assigned(course)
//!                                  └──►  Unfillable(reason)
//! ```

use std::ops::Index;

use serde::Deserialize;
use thiserror::Error;

// ── Course ────────────────────────────────────────────────────────────────────

/// A fixed (subject code, teacher) pairing that may be placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Course {
    pub code: String,
    pub teacher: String,
}

impl Course {
    pub fn new(code: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            teacher: teacher.into(),
        }
    }
}

// ── Slot ──────────────────────────────────────────────────────────────────────

/// Why a slot ended up with no candidate course.
///
/// Each catalogue course is counted against exactly one rule: a course whose
/// teacher was busy is counted under `teacher_busy` even if its subject had
/// also reached the daily cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnfillableReason {
    /// Courses rejected because their teacher already teaches in another
    /// room during the same period.
    pub teacher_busy: usize,
    /// Courses rejected because their subject already reached the per-day cap.
    pub subject_capped: usize,
}

/// State of a single `(day, period, room)` cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Lunch break. Fixed at construction.
    Lunch,
    /// Not yet visited by a fill pass.
    Empty,
    /// A course was placed here.
    Assigned(Course),
    /// No course qualified when the slot was visited. Terminal.
    Unfillable(UnfillableReason),
}

impl Slot {
    pub fn state(&self) -> SlotState {
        match self {
            Slot::Lunch => SlotState::Lunch,
            Slot::Empty => SlotState::Empty,
            Slot::Assigned(_) => SlotState::Assigned,
            Slot::Unfillable(_) => SlotState::Unfillable,
        }
    }

    /// The assigned course, if any.
    pub fn course(&self) -> Option<&Course> {
        match self {
            Slot::Assigned(course) => Some(course),
            _ => None,
        }
    }
}

/// Payload-free discriminant of [`Slot`], handy for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    Lunch,
    Empty,
    Assigned,
    Unfillable,
}

/// Position of a slot inside a [`Grid`], as indices into the layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotPos {
    pub day: usize,
    pub period: usize,
    pub room: usize,
}

impl SlotPos {
    pub fn new(day: usize, period: usize, room: usize) -> Self {
        Self { day, period, room }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Validated axes of a timetable.
///
/// Only produced by [`TimetableConfig::layout`](crate::config::TimetableConfig::layout),
/// which guarantees every axis is non-empty, labels are unique per axis and
/// `lunch_period` indexes into `periods`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    days: Vec<String>,
    periods: Vec<String>,
    rooms: Vec<String>,
    lunch_period: usize,
}

impl Layout {
    pub(crate) fn new(
        days: Vec<String>,
        periods: Vec<String>,
        rooms: Vec<String>,
        lunch_period: usize,
    ) -> Self {
        Self {
            days,
            periods,
            rooms,
            lunch_period,
        }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Index of the lunch period within [`periods`](Self::periods).
    pub fn lunch_period(&self) -> usize {
        self.lunch_period
    }

    /// `|days| × |periods| × |rooms|`.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods.len() * self.rooms.len()
    }

    fn contains(&self, pos: SlotPos) -> bool {
        pos.day < self.days.len() && pos.period < self.periods.len() && pos.room < self.rooms.len()
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Rejected direct slot mutation through [`Grid::set`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("slot {0:?} is outside the grid")]
    OutOfRange(SlotPos),

    /// Lunch slots never transition, and no other slot may become lunch.
    #[error("slot {0:?} is a lunch slot or would become one; lunch slots are fixed")]
    LunchImmutable(SlotPos),
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// The week: one [`Slot`] per `(day, period, room)`, stored flat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    layout: Layout,
    slots: Vec<Slot>,
}

impl Grid {
    /// Build a grid with every lunch-period slot set to [`Slot::Lunch`] and
    /// every other slot [`Slot::Empty`].
    pub fn new(layout: Layout) -> Self {
        let mut slots = Vec::with_capacity(layout.slot_count());
        for _day in 0..layout.days.len() {
            for period in 0..layout.periods.len() {
                let initial = if period == layout.lunch_period {
                    Slot::Lunch
                } else {
                    Slot::Empty
                };
                slots.extend(std::iter::repeat(initial).take(layout.rooms.len()));
            }
        }
        Self { layout, slots }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Flat offset of `pos`. Does not bounds-check.
    pub fn offset(&self, pos: SlotPos) -> usize {
        (pos.day * self.layout.periods.len() + pos.period) * self.layout.rooms.len() + pos.room
    }

    fn pos_of(&self, index: usize) -> SlotPos {
        let rooms = self.layout.rooms.len();
        let periods = self.layout.periods.len();
        SlotPos {
            day: index / (rooms * periods),
            period: (index / rooms) % periods,
            room: index % rooms,
        }
    }

    pub fn get(&self, pos: SlotPos) -> Option<&Slot> {
        if self.layout.contains(pos) {
            self.slots.get(self.offset(pos))
        } else {
            None
        }
    }

    /// Overwrite a non-lunch slot and return its previous state.
    ///
    /// # Errors
    /// [`GridError::OutOfRange`] for a position outside the layout and
    /// [`GridError::LunchImmutable`] when either the target or the new value
    /// is [`Slot::Lunch`].
    pub fn set(&mut self, pos: SlotPos, slot: Slot) -> Result<Slot, GridError> {
        if !self.layout.contains(pos) {
            return Err(GridError::OutOfRange(pos));
        }
        let idx = self.offset(pos);
        if matches!(self.slots[idx], Slot::Lunch) || matches!(slot, Slot::Lunch) {
            return Err(GridError::LunchImmutable(pos));
        }
        Ok(std::mem::replace(&mut self.slots[idx], slot))
    }

    /// Record the fill decision for an `Empty` slot.
    pub(crate) fn decide(&mut self, pos: SlotPos, slot: Slot) {
        let idx = self.offset(pos);
        debug_assert!(matches!(self.slots[idx], Slot::Empty));
        self.slots[idx] = slot;
    }

    /// All slots in traversal order (day, period, room).
    pub fn iter(&self) -> impl Iterator<Item = (SlotPos, &Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(move |(idx, slot)| (self.pos_of(idx), slot))
    }

    /// The `|periods| × |rooms|` slots of one day, period-major.
    ///
    /// # Panics
    /// If `day` lies outside the layout.
    pub fn day_slots(&self, day: usize) -> &[Slot] {
        assert!(day < self.layout.days.len(), "day {day} is outside the grid");
        let per_day = self.layout.periods.len() * self.layout.rooms.len();
        &self.slots[day * per_day..(day + 1) * per_day]
    }

    /// The `|rooms|` slots of one `(day, period)`.
    ///
    /// # Panics
    /// If `day` or `period` lies outside the layout; an unchecked period
    /// would otherwise spill into the next day.
    pub fn period_slots(&self, day: usize, period: usize) -> &[Slot] {
        assert!(
            day < self.layout.days.len() && period < self.layout.periods.len(),
            "day {day} period {period} is outside the grid"
        );
        let start = self.offset(SlotPos::new(day, period, 0));
        &self.slots[start..start + self.layout.rooms.len()]
    }

    /// `true` iff no room in `(day, period)` is assigned to `teacher`.
    pub fn is_teacher_free(&self, teacher: &str, day: usize, period: usize) -> bool {
        !self
            .period_slots(day, period)
            .iter()
            .filter_map(Slot::course)
            .any(|course| course.teacher == teacher)
    }

    /// Number of slots on `day` currently assigned to subject `code`.
    pub fn count_subject_in_day(&self, day: usize, code: &str) -> usize {
        self.day_slots(day)
            .iter()
            .filter_map(Slot::course)
            .filter(|course| course.code == code)
            .count()
    }

    pub fn count_state(&self, state: SlotState) -> usize {
        self.slots.iter().filter(|s| s.state() == state).count()
    }

    pub fn unfillable_slots(&self) -> impl Iterator<Item = (SlotPos, UnfillableReason)> + '_ {
        self.iter().filter_map(|(pos, slot)| match slot {
            Slot::Unfillable(reason) => Some((pos, *reason)),
            _ => None,
        })
    }

    /// `true` when every non-lunch slot holds a course.
    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .all(|s| matches!(s, Slot::Lunch | Slot::Assigned(_)))
    }
}

impl Index<SlotPos> for Grid {
    type Output = Slot;

    /// # Panics
    /// If `pos` lies outside the layout.
    fn index(&self, pos: SlotPos) -> &Slot {
        assert!(self.layout.contains(pos), "slot {pos:?} is outside the grid");
        &self.slots[self.offset(pos)]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix} {i}")).collect()
    }

    /// 2 days × 3 periods × 2 rooms, lunch at the second period.
    fn small_grid() -> Grid {
        Grid::new(Layout::new(
            vec!["Mon".into(), "Tue".into()],
            labels("Period", 3),
            vec!["A".into(), "B".into()],
            1,
        ))
    }

    #[test]
    fn new_grid_has_one_slot_per_cell() {
        let grid = small_grid();
        assert_eq!(grid.layout().slot_count(), 12);
        assert_eq!(grid.iter().count(), 12);
        assert_eq!(grid.count_state(SlotState::Lunch), 4);
        assert_eq!(grid.count_state(SlotState::Empty), 8);
    }

    #[test]
    fn lunch_period_is_lunch_for_every_day_and_room() {
        let grid = small_grid();
        for (pos, slot) in grid.iter() {
            if pos.period == 1 {
                assert_eq!(slot, &Slot::Lunch, "{pos:?}");
            } else {
                assert_eq!(slot, &Slot::Empty, "{pos:?}");
            }
        }
    }

    #[test]
    fn iteration_order_is_day_then_period_then_room() {
        let grid = small_grid();
        let positions: Vec<SlotPos> = grid.iter().map(|(p, _)| p).collect();
        assert_eq!(positions[0], SlotPos::new(0, 0, 0));
        assert_eq!(positions[1], SlotPos::new(0, 0, 1));
        assert_eq!(positions[2], SlotPos::new(0, 1, 0));
        assert_eq!(positions[6], SlotPos::new(1, 0, 0));
        for (idx, pos) in positions.iter().enumerate() {
            assert_eq!(grid.offset(*pos), idx);
        }
    }

    #[test]
    fn set_returns_previous_state() {
        let mut grid = small_grid();
        let pos = SlotPos::new(1, 2, 1);
        let prev = grid
            .set(pos, Slot::Assigned(Course::new("MATH", "Dr. Smith")))
            .unwrap();
        assert_eq!(prev, Slot::Empty);
        assert_eq!(grid[pos].course().unwrap().code, "MATH");
    }

    #[test]
    fn set_refuses_lunch_transitions() {
        let mut grid = small_grid();
        let lunch = SlotPos::new(0, 1, 0);
        assert_eq!(
            grid.set(lunch, Slot::Empty),
            Err(GridError::LunchImmutable(lunch))
        );
        let normal = SlotPos::new(0, 0, 0);
        assert_eq!(
            grid.set(normal, Slot::Lunch),
            Err(GridError::LunchImmutable(normal))
        );
        assert_eq!(grid[lunch], Slot::Lunch);
        assert_eq!(grid[normal], Slot::Empty);
    }

    #[test]
    fn set_and_get_reject_out_of_range() {
        let mut grid = small_grid();
        let outside = SlotPos::new(0, 0, 2);
        assert!(grid.get(outside).is_none());
        assert_eq!(
            grid.set(outside, Slot::Empty),
            Err(GridError::OutOfRange(outside))
        );
    }

    #[test]
    fn teacher_free_looks_only_at_the_same_period() {
        let mut grid = small_grid();
        grid.set(
            SlotPos::new(0, 0, 1),
            Slot::Assigned(Course::new("PHY", "Dr. Johnson")),
        )
        .unwrap();

        assert!(!grid.is_teacher_free("Dr. Johnson", 0, 0));
        assert!(grid.is_teacher_free("Dr. Johnson", 0, 2));
        assert!(grid.is_teacher_free("Dr. Johnson", 1, 0));
        assert!(grid.is_teacher_free("Dr. John", 0, 0), "exact match only");
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn teacher_free_rejects_period_past_the_day() {
        let mut grid = small_grid();
        grid.set(
            SlotPos::new(1, 0, 0),
            Slot::Assigned(Course::new("MATH", "Dr. Smith")),
        )
        .unwrap();
        // Period 3 on day 0 would alias day 1, period 0.
        grid.is_teacher_free("Dr. Smith", 0, 3);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn count_subject_rejects_unknown_day() {
        small_grid().count_subject_in_day(2, "MATH");
    }

    #[test]
    fn last_period_and_day_are_in_range() {
        let grid = small_grid();
        assert_eq!(grid.period_slots(1, 2).len(), 2);
        assert_eq!(grid.day_slots(1).len(), 6);
        assert!(grid.is_teacher_free("Dr. Smith", 1, 2));
    }

    #[test]
    fn count_subject_uses_exact_codes_and_one_day() {
        let mut grid = small_grid();
        grid.set(SlotPos::new(0, 0, 0), Slot::Assigned(Course::new("CS", "Dr. Davis")))
            .unwrap();
        grid.set(SlotPos::new(0, 2, 1), Slot::Assigned(Course::new("CS", "Dr. Davis")))
            .unwrap();
        grid.set(SlotPos::new(0, 0, 1), Slot::Assigned(Course::new("CSE", "Dr. Lee")))
            .unwrap();
        grid.set(SlotPos::new(1, 0, 0), Slot::Assigned(Course::new("CS", "Dr. Davis")))
            .unwrap();

        assert_eq!(grid.count_subject_in_day(0, "CS"), 2);
        assert_eq!(grid.count_subject_in_day(0, "CSE"), 1);
        assert_eq!(grid.count_subject_in_day(1, "CS"), 1);
        assert_eq!(grid.count_subject_in_day(1, "MATH"), 0);
    }

    #[test]
    fn completeness_and_unfillable_scan() {
        let mut grid = small_grid();
        assert!(!grid.is_complete());

        let reason = UnfillableReason {
            teacher_busy: 1,
            subject_capped: 0,
        };
        grid.set(SlotPos::new(1, 2, 0), Slot::Unfillable(reason)).unwrap();

        let found: Vec<_> = grid.unfillable_slots().collect();
        assert_eq!(found, vec![(SlotPos::new(1, 2, 0), reason)]);
        assert_eq!(grid.count_state(SlotState::Unfillable), 1);
    }
}
