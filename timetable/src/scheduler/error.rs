/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the timetable scheduler.
//!
//! A fill pass itself never fails: a slot with no qualifying course becomes
//! [`Slot::Unfillable`](crate::grid::Slot::Unfillable).  The only errors are
//! the preconditions checked when a [`Scheduler`](super::Scheduler) is
//! built, which matter for callers that bypass
//! [`TimetableConfig::layout`](crate::config::TimetableConfig::layout).

use thiserror::Error;

/// Error returned by [`Scheduler::new`](super::Scheduler::new).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The course catalogue is empty, so every slot would be unfillable.
    #[error("no courses provided — course catalogue is empty")]
    NoCourses,

    /// `max_per_subject_per_day == 0` excludes every course from every slot.
    #[error("max_per_subject_per_day must be at least 1")]
    ZeroSubjectCap,
}
