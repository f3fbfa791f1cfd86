//! Grade-average and attendance derivations
//!
//! Everything here is a pure function of the stored records. Ungraded subjects are
//! excluded from both the weighted sum and the credit total of every average, and
//! every division is guarded so an empty input yields `0` rather than NaN.

use crate::core::models::{AppData, Attendance, Semester, SemesterId, Subject};
use serde::Serialize;
use std::collections::BTreeMap;

/// Attendance percentage at or above which a subject is in good standing.
pub const SAFE_ATTENDANCE: f64 = 75.0;

/// Attendance percentage below which a subject is in danger.
pub const WARNING_ATTENDANCE: f64 = 60.0;

/// A credit-weighted grade average
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAverage {
    /// Weighted mean of grade points (0 when nothing is graded)
    pub average: f64,
    /// Credits of the graded subjects that contributed
    pub total_credits: u32,
}

impl GradeAverage {
    /// Average over an arbitrary set of subjects
    #[must_use]
    pub fn over<'a>(subjects: impl IntoIterator<Item = &'a Subject>) -> Self {
        let mut weighted = 0.0;
        let mut credits = 0u64;

        for subject in subjects {
            if let Some(point) = subject.grade.point() {
                weighted += f64::from(subject.credits) * point;
                credits += u64::from(subject.credits);
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let average = if credits > 0 { weighted / credits as f64 } else { 0.0 };

        Self {
            average,
            total_credits: u32::try_from(credits).unwrap_or(u32::MAX),
        }
    }
}

/// Semester grade average over the semester's graded subjects
#[must_use]
pub fn semester_average(semester: &Semester) -> GradeAverage {
    GradeAverage::over(&semester.subjects)
}

/// Cumulative grade average over the graded subjects of every semester
#[must_use]
pub fn cumulative_average(semesters: &BTreeMap<SemesterId, Semester>) -> GradeAverage {
    GradeAverage::over(semesters.values().flat_map(|s| s.subjects.iter()))
}

/// Attendance percentage of a subject
///
/// No recorded classes counts as full attendance. The value is not clamped.
#[must_use]
pub fn attendance_percentage(subject: &Subject) -> f64 {
    percentage_of(subject.attendance)
}

/// Attendance percentage of raw counters, with the same `total == 0 -> 100` rule
#[must_use]
pub fn percentage_of(attendance: Attendance) -> f64 {
    if attendance.total == 0 {
        100.0
    } else {
        f64::from(attendance.attended) / f64::from(attendance.total) * 100.0
    }
}

/// Standing of an attendance percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// `>= 75%`
    Success,
    /// `60% ..< 75%`
    Warning,
    /// `< 60%`
    Danger,
}

impl AttendanceStatus {
    /// Lowercase label (`success`, `warning`, `danger`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Classify a percentage; boundaries belong to the higher tier
#[must_use]
pub fn attendance_status(percentage: f64) -> AttendanceStatus {
    if percentage >= SAFE_ATTENDANCE {
        AttendanceStatus::Success
    } else if percentage >= WARNING_ATTENDANCE {
        AttendanceStatus::Warning
    } else {
        AttendanceStatus::Danger
    }
}

/// Attendance summed over every subject of a semester
#[must_use]
pub fn semester_attendance(semester: &Semester) -> Attendance {
    semester
        .subjects
        .iter()
        .fold(Attendance::default(), |acc, s| Attendance {
            attended: acc.attended.saturating_add(s.attendance.attended),
            total: acc.total.saturating_add(s.attendance.total),
        })
}

/// Subjects whose attendance is below the safe threshold
#[must_use]
pub fn subjects_at_risk(semester: &Semester) -> Vec<&Subject> {
    semester
        .subjects
        .iter()
        .filter(|s| attendance_percentage(s) < SAFE_ATTENDANCE)
        .collect()
}

/// Consecutive classes that must be attended to reach `threshold` percent
///
/// Returns `None` when the threshold is 100% or more and a class has already been
/// missed, since no number of classes can recover it.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn classes_needed(attendance: Attendance, threshold: f64) -> Option<u32> {
    if percentage_of(attendance) >= threshold {
        return Some(0);
    }
    if threshold >= 100.0 {
        return None;
    }
    // (a + x) / (t + x) >= p  <=>  x >= (p*t - a) / (1 - p)
    let p = threshold / 100.0;
    let needed = (p * f64::from(attendance.total) - f64::from(attendance.attended)) / (1.0 - p);
    Some(needed.ceil().max(0.0) as u32)
}

/// Classes that can be missed in a row while staying at or above `threshold` percent
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn classes_can_skip(attendance: Attendance, threshold: f64) -> u32 {
    if threshold <= 0.0 {
        return u32::MAX;
    }
    // a / (t + x) >= p  <=>  x <= a/p - t
    let p = threshold / 100.0;
    let room = f64::from(attendance.attended) / p - f64::from(attendance.total);
    room.floor().max(0.0) as u32
}

/// Graded subjects bucketed by grade point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GradeDistribution {
    /// Points in `[9, 10]`
    pub excellent: usize,
    /// Points in `[8, 9)`
    pub very_good: usize,
    /// Points in `[7, 8)`
    pub good: usize,
    /// Points below 7
    pub below: usize,
}

impl GradeDistribution {
    /// Buckets as `(label, count)`, best first
    #[must_use]
    pub const fn buckets(&self) -> [(&'static str, usize); 4] {
        [
            ("9-10", self.excellent),
            ("8-9", self.very_good),
            ("7-8", self.good),
            ("<7", self.below),
        ]
    }
}

/// Distribution of graded subjects across all semesters
#[must_use]
pub fn grade_distribution(data: &AppData) -> GradeDistribution {
    let mut dist = GradeDistribution::default();
    for point in data.subjects().filter_map(|s| s.grade.point()) {
        match point {
            p if p >= 9.0 => dist.excellent += 1,
            p if p >= 8.0 => dist.very_good += 1,
            p if p >= 7.0 => dist.good += 1,
            _ => dist.below += 1,
        }
    }
    dist
}

/// One point on the average trend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Semester id
    pub semester: SemesterId,
    /// Semester name
    pub name: String,
    /// That semester's average
    pub semester_average: GradeAverage,
    /// Cumulative average up to and including this semester
    pub cumulative_average: GradeAverage,
    /// Number of subjects (graded or not)
    pub subjects: usize,
}

/// Semester and running cumulative averages, in semester order
#[must_use]
pub fn average_trend(data: &AppData) -> Vec<TrendPoint> {
    let mut seen: Vec<&Subject> = Vec::new();
    data.semesters
        .values()
        .map(|semester| {
            seen.extend(semester.subjects.iter());
            TrendPoint {
                semester: semester.id,
                name: semester.name.clone(),
                semester_average: semester_average(semester),
                cumulative_average: GradeAverage::over(seen.iter().copied()),
                subjects: semester.subjects.len(),
            }
        })
        .collect()
}

/// Cumulative average as a percentage of the target (0 when the target is 0)
#[must_use]
pub fn target_progress(cumulative: f64, target: f64) -> f64 {
    if target > 0.0 {
        cumulative / target * 100.0
    } else {
        0.0
    }
}

/// Average needed over the next `remaining_credits` graded credits to reach the target
///
/// The result may exceed 10 (target unreachable) or be negative (already secured).
/// `None` when there are no remaining credits.
#[must_use]
pub fn required_average(data: &AppData, remaining_credits: u32) -> Option<f64> {
    if remaining_credits == 0 {
        return None;
    }
    let current = cumulative_average(&data.semesters);
    let earned = f64::from(current.total_credits);
    let remaining = f64::from(remaining_credits);
    Some((data.target_cgpa * (earned + remaining) - current.average * earned) / remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Grade, NewSubject};

    fn subject(credits: u32, grade: Grade) -> Subject {
        NewSubject::new("S", credits, grade).with_id(format!("s{credits}"))
    }

    fn semester_with(id: SemesterId, subjects: Vec<Subject>) -> Semester {
        let mut semester = Semester::new(id);
        semester.subjects = subjects;
        semester
    }

    fn with_attendance(attended: u32, total: u32) -> Subject {
        let mut s = subject(3, Grade::Ungraded);
        s.attendance = Attendance::new(attended, total);
        s
    }

    #[test]
    fn test_empty_semester_average_is_zero() {
        let avg = semester_average(&Semester::new(1));
        assert_eq!(avg, GradeAverage { average: 0.0, total_credits: 0 });
    }

    #[test]
    fn test_ungraded_subjects_are_excluded() {
        let sem = semester_with(1, vec![subject(4, Grade::Graded(10.0)), subject(2, Grade::Ungraded)]);
        let avg = semester_average(&sem);
        assert!((avg.average - 10.0).abs() < f64::EPSILON);
        assert_eq!(avg.total_credits, 4);
    }

    #[test]
    fn test_all_ungraded_is_zero() {
        let sem = semester_with(1, vec![subject(4, Grade::Ungraded), subject(2, Grade::Ungraded)]);
        assert_eq!(semester_average(&sem), GradeAverage::default());
    }

    #[test]
    fn test_zero_credit_graded_subject_does_not_divide_by_zero() {
        let sem = semester_with(1, vec![subject(0, Grade::Graded(9.0))]);
        assert_eq!(semester_average(&sem), GradeAverage::default());
    }

    #[test]
    fn test_weighted_average() {
        let sem = semester_with(1, vec![subject(3, Grade::Graded(8.0)), subject(1, Grade::Graded(4.0))]);
        let avg = semester_average(&sem);
        assert!((avg.average - 7.0).abs() < 1e-9);
        assert_eq!(avg.total_credits, 4);
    }

    #[test]
    fn test_cumulative_spans_semesters() {
        let mut map = BTreeMap::new();
        map.insert(1, semester_with(1, vec![subject(4, Grade::Graded(10.0))]));
        map.insert(2, semester_with(2, vec![subject(4, Grade::Graded(6.0)), subject(3, Grade::Ungraded)]));
        let avg = cumulative_average(&map);
        assert!((avg.average - 8.0).abs() < 1e-9);
        assert_eq!(avg.total_credits, 8);
    }

    #[test]
    fn test_huge_credits_saturate() {
        let sem = semester_with(
            1,
            vec![subject(3_000_000_000, Grade::Graded(8.0)), subject(3_000_000_001, Grade::Graded(8.0))],
        );
        let avg = semester_average(&sem);
        assert!((avg.average - 8.0).abs() < 1e-9);
        assert_eq!(avg.total_credits, u32::MAX);

        let sem = semester_with(1, vec![with_attendance(u32::MAX, u32::MAX), with_attendance(5, 10)]);
        assert_eq!(semester_attendance(&sem), Attendance { attended: u32::MAX, total: u32::MAX });
    }

    #[test]
    fn test_attendance_percentage() {
        assert!((attendance_percentage(&with_attendance(0, 0)) - 100.0).abs() < f64::EPSILON);
        assert!((attendance_percentage(&with_attendance(3, 4)) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attendance_status_boundaries() {
        assert_eq!(attendance_status(75.0), AttendanceStatus::Success);
        assert_eq!(attendance_status(74.9), AttendanceStatus::Warning);
        assert_eq!(attendance_status(60.0), AttendanceStatus::Warning);
        assert_eq!(attendance_status(59.9), AttendanceStatus::Danger);
        assert_eq!(attendance_status(100.0).label(), "success");
    }

    #[test]
    fn test_semester_attendance_and_risk() {
        let sem = semester_with(1, vec![with_attendance(3, 4), with_attendance(1, 4), with_attendance(0, 0)]);
        assert_eq!(semester_attendance(&sem), Attendance { attended: 4, total: 8 });
        assert_eq!(subjects_at_risk(&sem).len(), 1);
    }

    #[test]
    fn test_classes_needed() {
        assert_eq!(classes_needed(Attendance::new(3, 4), 75.0), Some(0));
        // 5/10 -> needs 10 more to reach 15/20
        assert_eq!(classes_needed(Attendance::new(5, 10), 75.0), Some(10));
        assert_eq!(classes_needed(Attendance::new(4, 5), 100.0), None);
    }

    #[test]
    fn test_classes_can_skip() {
        // 9/10: can drop to 9/12 = 75%
        assert_eq!(classes_can_skip(Attendance::new(9, 10), 75.0), 2);
        assert_eq!(classes_can_skip(Attendance::new(1, 4), 75.0), 0);
    }

    #[test]
    fn test_grade_distribution_skips_ungraded() {
        let data = AppData::with_semesters(
            [semester_with(
                1,
                vec![
                    subject(1, Grade::Graded(10.0)),
                    subject(2, Grade::Graded(8.5)),
                    subject(3, Grade::Graded(7.0)),
                    subject(4, Grade::Graded(5.0)),
                    subject(5, Grade::Ungraded),
                ],
            )],
            8,
        );
        let dist = grade_distribution(&data);
        assert_eq!(dist, GradeDistribution { excellent: 1, very_good: 1, good: 1, below: 1 });
    }

    #[test]
    fn test_average_trend_is_running() {
        let data = AppData::with_semesters(
            [
                semester_with(1, vec![subject(4, Grade::Graded(10.0))]),
                semester_with(2, vec![subject(4, Grade::Graded(6.0))]),
            ],
            8,
        );
        let trend = average_trend(&data);
        assert_eq!(trend.len(), 2);
        assert!((trend[0].cumulative_average.average - 10.0).abs() < 1e-9);
        assert!((trend[1].semester_average.average - 6.0).abs() < 1e-9);
        assert!((trend[1].cumulative_average.average - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_progress_and_required_average() {
        assert!((target_progress(4.5, 9.0) - 50.0).abs() < 1e-9);
        assert!(target_progress(4.5, 0.0).abs() < f64::EPSILON);

        let mut data = AppData::with_semesters([semester_with(1, vec![subject(10, Grade::Graded(8.0))])], 8);
        data.target_cgpa = 9.0;
        let needed = required_average(&data, 10).unwrap();
        assert!((needed - 10.0).abs() < 1e-9);
        assert!(required_average(&data, 0).is_none());
    }
}
