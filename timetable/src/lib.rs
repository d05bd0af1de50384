/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Weekly class timetable generator.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/         – YAML configuration, defaults, validation into a Layout
//! ├── grid            – Slot / Course / Grid data model (flat indexed array)
//! ├── scheduler/      – greedy random fill pass + post-fill audit
//! └── render/         – console tables and per-day CSV export
//! ```
//!
//! Pipeline:
//!
//! ```text
//! TimetableConfig ──layout()──► Layout ──Grid::new──► Grid ──Scheduler::fill──► Grid ──render──► text / CSV
//! ```

pub mod config;
pub mod grid;
pub mod render;
pub mod scheduler;
