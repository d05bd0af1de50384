//! Timetable configuration loading and validation.
//!
//! The expected YAML structure is:
//! ```yaml
//! days: [Monday, Tuesday, Wednesday, Thursday, Friday]
//! periods: ["Period 1", "Period 2", "Period 3", "Period 4",
//!           "Period 5", "Period 6", "Period 7", "Period 8"]
//! rooms: ["Room A", "Room B", "Room C"]
//! lunch_period: "Period 5"
//! max_per_subject_per_day: 3
//! courses:
//!   - code: MATH
//!     teacher: Dr. Smith
//!   - code: PHY
//!     teacher: Dr. Johnson
//! ```
//!
//! Every key is optional; a missing key falls back to the matching field of
//! [`TimetableConfig::default`].  Loading never validates: call
//! [`TimetableConfig::layout`] before building a grid.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::grid::{Course, Layout};
use crate::scheduler::DEFAULT_MAX_PER_SUBJECT_PER_DAY;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private – callers work with [`TimetableConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimetableConfigFile {
    days: Option<Vec<String>>,
    periods: Option<Vec<String>>,
    rooms: Option<Vec<String>>,
    lunch_period: Option<String>,
    max_per_subject_per_day: Option<usize>,
    courses: Option<Vec<Course>>,
}

// ── Validation errors ─────────────────────────────────────────────────────────

/// Which axis of the timetable a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Day,
    Period,
    Room,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Day => write!(f, "day"),
            Axis::Period => write!(f, "period"),
            Axis::Room => write!(f, "room"),
        }
    }
}

/// Fatal configuration problems, reported before any scheduling starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no days configured")]
    NoDays,

    #[error("no periods configured")]
    NoPeriods,

    #[error("no rooms configured")]
    NoRooms,

    #[error("course catalogue is empty")]
    NoCourses,

    /// `lunch_period` does not name one of the configured periods.
    #[error("lunch period '{0}' is not one of the configured periods")]
    UnknownLunchPeriod(String),

    /// Labels must be unique per axis, otherwise rendered tables are ambiguous.
    #[error("duplicate {axis} label '{label}'")]
    DuplicateLabel { axis: Axis, label: String },

    /// Course `index` (0-based, catalogue order) has a blank code or teacher.
    #[error("course #{index} has a blank subject code or teacher name")]
    BlankCourseField { index: usize },

    /// A cap of zero would make every slot unfillable.
    #[error("max_per_subject_per_day must be at least 1")]
    ZeroSubjectCap,
}

// ── TimetableConfig ───────────────────────────────────────────────────────────

/// Everything a timetable run needs: the axes, the lunch period, the course
/// catalogue and the per-day subject cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableConfig {
    pub days: Vec<String>,
    pub periods: Vec<String>,
    pub rooms: Vec<String>,
    /// Label of the lunch period; must appear in `periods`.
    pub lunch_period: String,
    /// A subject is excluded once it reaches this many slots on one day.
    pub max_per_subject_per_day: usize,
    pub courses: Vec<Course>,
}

impl Default for TimetableConfig {
    /// Five school days, eight periods with lunch in the fifth, three rooms
    /// and six subjects each taught by a different teacher.
    fn default() -> Self {
        let days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
        let rooms = ["Room A", "Room B", "Room C"];
        let courses = [
            ("MATH", "Dr. Smith"),
            ("PHY", "Dr. Johnson"),
            ("CHEM", "Dr. Brown"),
            ("BIO", "Dr. Wilson"),
            ("CS", "Dr. Davis"),
            ("ENG", "Dr. Miller"),
        ];

        Self {
            days: days.iter().map(|d| d.to_string()).collect(),
            periods: (1..=8).map(|i| format!("Period {i}")).collect(),
            rooms: rooms.iter().map(|r| r.to_string()).collect(),
            lunch_period: String::from("Period 5"),
            max_per_subject_per_day: DEFAULT_MAX_PER_SUBJECT_PER_DAY,
            courses: courses
                .iter()
                .map(|(code, teacher)| Course::new(*code, *teacher))
                .collect(),
        }
    }
}

impl TimetableConfig {
    /// Parse the YAML file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is
    /// structurally invalid (including unknown keys).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading timetable configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
    }

    /// Parse a YAML document.  An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: TimetableConfigFile = if content.trim().is_empty() {
            TimetableConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let defaults = Self::default();
        let config = Self {
            days: file.days.unwrap_or(defaults.days),
            periods: file.periods.unwrap_or(defaults.periods),
            rooms: file.rooms.unwrap_or(defaults.rooms),
            lunch_period: file.lunch_period.unwrap_or(defaults.lunch_period),
            max_per_subject_per_day: file
                .max_per_subject_per_day
                .unwrap_or(defaults.max_per_subject_per_day),
            courses: file.courses.unwrap_or(defaults.courses),
        };

        debug!(
            days = config.days.len(),
            periods = config.periods.len(),
            rooms = config.rooms.len(),
            courses = config.courses.len(),
            lunch = %config.lunch_period,
            cap = config.max_per_subject_per_day,
            "Parsed timetable configuration"
        );

        Ok(config)
    }

    /// Validate the configuration and return the grid [`Layout`] it describes.
    ///
    /// # Errors
    /// The first [`ConfigError`] found, checked in this order: empty axes,
    /// empty catalogue, duplicate labels, unknown lunch period, blank course
    /// fields, zero cap.
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        if self.days.is_empty() {
            return Err(ConfigError::NoDays);
        }
        if self.periods.is_empty() {
            return Err(ConfigError::NoPeriods);
        }
        if self.rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }
        if self.courses.is_empty() {
            return Err(ConfigError::NoCourses);
        }

        check_unique(Axis::Day, &self.days)?;
        check_unique(Axis::Period, &self.periods)?;
        check_unique(Axis::Room, &self.rooms)?;

        let lunch = self
            .periods
            .iter()
            .position(|p| *p == self.lunch_period)
            .ok_or_else(|| ConfigError::UnknownLunchPeriod(self.lunch_period.clone()))?;

        if let Some(index) = self
            .courses
            .iter()
            .position(|c| c.code.trim().is_empty() || c.teacher.trim().is_empty())
        {
            return Err(ConfigError::BlankCourseField { index });
        }

        if self.max_per_subject_per_day == 0 {
            return Err(ConfigError::ZeroSubjectCap);
        }

        Ok(Layout::new(
            self.days.clone(),
            self.periods.clone(),
            self.rooms.clone(),
            lunch,
        ))
    }
}

fn check_unique(axis: Axis, labels: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(ConfigError::DuplicateLabel {
                axis,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn default_config_has_expected_values() {
        let cfg = TimetableConfig::default();
        assert_eq!(cfg.days.len(), 5);
        assert_eq!(cfg.periods.len(), 8);
        assert_eq!(cfg.periods[0], "Period 1");
        assert_eq!(cfg.rooms, vec!["Room A", "Room B", "Room C"]);
        assert_eq!(cfg.lunch_period, "Period 5");
        assert_eq!(cfg.max_per_subject_per_day, 3);
        assert_eq!(cfg.courses.len(), 6);
        assert_eq!(cfg.courses[0], Course::new("MATH", "Dr. Smith"));
    }

    #[test]
    fn default_config_is_valid() {
        let layout = TimetableConfig::default().layout().unwrap();
        assert_eq!(layout.lunch_period(), 4);
        assert_eq!(layout.slot_count(), 5 * 8 * 3);
    }

    // ── load_from_file ────────────────────────────────────────────────────────

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
days: [Mon, Tue]
periods: [P1, P2, Lunch, P3]
rooms: [Lab]
lunch_period: Lunch
max_per_subject_per_day: 2
courses:
  - code: MATH
    teacher: Dr. Smith
  - code: ART
    teacher: Ms. Kahlo
"#;
        let f = yaml_tempfile(yaml);
        let cfg = TimetableConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.days, vec!["Mon", "Tue"]);
        assert_eq!(cfg.periods, vec!["P1", "P2", "Lunch", "P3"]);
        assert_eq!(cfg.rooms, vec!["Lab"]);
        assert_eq!(cfg.max_per_subject_per_day, 2);
        assert_eq!(cfg.courses[1], Course::new("ART", "Ms. Kahlo"));

        let layout = cfg.layout().unwrap();
        assert_eq!(layout.lunch_period(), 2);
    }

    #[test]
    fn bundled_demo_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/school.yaml");
        let cfg = TimetableConfig::load_from_file(&path).unwrap();
        assert_eq!(cfg, TimetableConfig::default());
    }

    #[test]
    fn missing_keys_use_defaults() {
        let f = yaml_tempfile("rooms: [North, South]\n");
        let cfg = TimetableConfig::load_from_file(f.path()).unwrap();

        let defaults = TimetableConfig::default();
        assert_eq!(cfg.rooms, vec!["North", "South"]);
        assert_eq!(cfg.days, defaults.days);
        assert_eq!(cfg.courses, defaults.courses);
        assert_eq!(cfg.max_per_subject_per_day, 3);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let f = yaml_tempfile("");
        let cfg = TimetableConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, TimetableConfig::default());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = TimetableConfig::load_from_file(Path::new("/nonexistent/timetable.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(TimetableConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_key_returns_error() {
        let f = yaml_tempfile("classrooms: [A]\n");
        assert!(TimetableConfig::load_from_file(f.path()).is_err());
    }

    // ── layout() validation ───────────────────────────────────────────────────

    #[test]
    fn empty_axes_are_rejected() {
        let cfg = TimetableConfig {
            days: vec![],
            ..Default::default()
        };
        assert_eq!(cfg.layout(), Err(ConfigError::NoDays));

        let cfg = TimetableConfig {
            periods: vec![],
            ..Default::default()
        };
        assert_eq!(cfg.layout(), Err(ConfigError::NoPeriods));

        let cfg = TimetableConfig {
            rooms: vec![],
            ..Default::default()
        };
        assert_eq!(cfg.layout(), Err(ConfigError::NoRooms));
    }

    #[test]
    fn empty_catalogue_is_rejected() {
        let cfg = TimetableConfig {
            courses: vec![],
            ..Default::default()
        };
        assert_eq!(cfg.layout(), Err(ConfigError::NoCourses));
    }

    #[test]
    fn unknown_lunch_period_is_rejected() {
        let cfg = TimetableConfig {
            lunch_period: "Period 9".into(),
            ..Default::default()
        };
        assert_eq!(
            cfg.layout(),
            Err(ConfigError::UnknownLunchPeriod("Period 9".into()))
        );
    }

    #[test]
    fn duplicate_room_is_rejected() {
        let cfg = TimetableConfig {
            rooms: vec!["Room A".into(), "Room B".into(), "Room A".into()],
            ..Default::default()
        };
        let err = cfg.layout().unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateLabel {
                axis: Axis::Room,
                label: "Room A".into()
            }
        );
        assert_eq!(err.to_string(), "duplicate room label 'Room A'");
    }

    #[test]
    fn blank_course_field_is_rejected() {
        let mut cfg = TimetableConfig::default();
        cfg.courses.push(Course::new("ART", "  "));
        assert_eq!(cfg.layout(), Err(ConfigError::BlankCourseField { index: 6 }));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let cfg = TimetableConfig {
            max_per_subject_per_day: 0,
            ..Default::default()
        };
        assert_eq!(cfg.layout(), Err(ConfigError::ZeroSubjectCap));
    }
}
