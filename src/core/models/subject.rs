//! Subject model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest grade point on the scale.
pub const MAX_GRADE_POINT: f64 = 10.0;

/// Letter grades and their points, best first.
pub const GRADE_SCALE: [(&str, f64, &str); 8] = [
    ("O", 10.0, "Outstanding"),
    ("A+", 9.0, "Excellent"),
    ("A", 8.0, "Very Good"),
    ("B+", 7.0, "Good"),
    ("B", 6.0, "Above Average"),
    ("C", 5.0, "Average"),
    ("P", 4.0, "Pass"),
    ("F", 0.0, "Fail"),
];

/// Grade of a subject
///
/// Stored as a bare number where `-1` means the subject has not been graded yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum Grade {
    /// Grade point in `[0, 10]`
    Graded(f64),
    /// No grade yet; excluded from every average
    #[default]
    Ungraded,
}

impl Grade {
    /// Build a grade from a raw point value.
    ///
    /// Negative or NaN values mean "ungraded"; values above the scale are clamped to it.
    #[must_use]
    pub fn new(point: f64) -> Self {
        if point.is_nan() || point < 0.0 {
            Self::Ungraded
        } else {
            Self::Graded(point.min(MAX_GRADE_POINT))
        }
    }

    /// The grade point, if graded
    #[must_use]
    pub const fn point(self) -> Option<f64> {
        match self {
            Self::Graded(point) => Some(point),
            Self::Ungraded => None,
        }
    }

    /// Whether the subject has been graded
    #[must_use]
    pub const fn is_graded(self) -> bool {
        matches!(self, Self::Graded(_))
    }

    /// Letter for an exact scale point (e.g. `9.0` -> `"A+"`)
    #[must_use]
    pub fn letter(self) -> Option<&'static str> {
        let point = self.point()?;
        GRADE_SCALE
            .iter()
            .find(|(_, p, _)| (p - point).abs() < f64::EPSILON)
            .map(|(letter, _, _)| *letter)
    }

    /// Grade for a letter on the scale (case-insensitive)
    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Self> {
        GRADE_SCALE
            .iter()
            .find(|(l, _, _)| l.eq_ignore_ascii_case(letter.trim()))
            .map(|(_, point, _)| Self::Graded(*point))
    }
}

impl From<f64> for Grade {
    fn from(point: f64) -> Self {
        Self::new(point)
    }
}

impl From<Grade> for f64 {
    fn from(grade: Grade) -> Self {
        grade.point().unwrap_or(-1.0)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graded(point) => write!(f, "{point}"),
            Self::Ungraded => write!(f, "N/A"),
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    /// Accepts a number, a scale letter, or `N/A`/`-1` for ungraded
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("n/a") || trimmed.eq_ignore_ascii_case("na") {
            return Ok(Self::Ungraded);
        }
        if let Ok(point) = trimmed.parse::<f64>() {
            return Ok(Self::new(point));
        }
        Self::from_letter(trimmed).ok_or_else(|| format!("Invalid grade: '{s}'"))
    }
}

/// Class attendance counters. `attended <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attendance {
    /// Classes attended
    pub attended: u32,
    /// Classes held
    pub total: u32,
}

impl Attendance {
    /// Create attendance counters, clamping `attended` down to `total`
    #[must_use]
    pub fn new(attended: u32, total: u32) -> Self {
        Self {
            attended: attended.min(total),
            total,
        }
    }

    /// Classes missed
    #[must_use]
    pub const fn missed(&self) -> u32 {
        self.total.saturating_sub(self.attended)
    }
}

/// A subject (course) taken in a semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Opaque identifier, unique within the data set
    pub id: String,

    /// Subject name (e.g., "Data Structures")
    pub name: String,

    /// Credit weight
    pub credits: u32,

    /// Grade, or ungraded
    #[serde(rename = "gradePoint", default)]
    pub grade: Grade,

    /// Attendance counters
    #[serde(default)]
    pub attendance: Attendance,
}

/// Field values for a subject that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewSubject {
    /// Subject name
    pub name: String,
    /// Credit weight
    pub credits: u32,
    /// Initial grade
    pub grade: Grade,
    /// Initial attendance (normally zero)
    pub attendance: Attendance,
}

impl NewSubject {
    /// Create subject data with zeroed attendance
    #[must_use]
    pub fn new(name: impl Into<String>, credits: u32, grade: Grade) -> Self {
        Self {
            name: name.into(),
            credits,
            grade,
            attendance: Attendance::default(),
        }
    }

    /// Attach an id, producing a stored subject
    #[must_use]
    pub fn with_id(self, id: String) -> Subject {
        Subject {
            id,
            name: self.name,
            credits: self.credits,
            grade: self.grade,
            attendance: Attendance::new(self.attendance.attended, self.attendance.total),
        }
    }
}
