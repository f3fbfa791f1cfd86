//! Printable progress reports
//!
//! [`ReportContext`] computes every figure a report shows once, as display-ready
//! rows; the reporters in [`formats`] only lay it out.

pub mod formats;

use crate::core::metrics::{
    attendance_percentage, attendance_status, average_trend, cumulative_average, grade_distribution,
    percentage_of, semester_attendance, semester_average, target_progress, GradeDistribution,
    TrendPoint, SAFE_ATTENDANCE,
};
use crate::core::models::{AppData, Day, Semester, SemesterId, Subject};
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// A subject as shown in a report
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRow {
    /// Subject name
    pub name: String,
    /// Credit weight
    pub credits: u32,
    /// Grade point or "N/A"
    pub grade: String,
    /// Scale letter or "-"
    pub letter: String,
    /// "attended/total"
    pub attendance: String,
    /// Attendance percentage, one decimal
    pub percentage: String,
    /// `success`, `warning` or `danger`
    pub status: &'static str,
}

impl From<&Subject> for SubjectRow {
    fn from(subject: &Subject) -> Self {
        let pct = attendance_percentage(subject);
        Self {
            name: subject.name.clone(),
            credits: subject.credits,
            grade: subject.grade.to_string(),
            letter: subject.grade.letter().unwrap_or("-").to_string(),
            attendance: format!("{}/{}", subject.attendance.attended, subject.attendance.total),
            percentage: format!("{pct:.1}"),
            status: attendance_status(pct).label(),
        }
    }
}

/// A semester section of a report
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterSection {
    /// Semester id
    pub id: SemesterId,
    /// Display name
    pub name: String,
    /// Semester average, two decimals
    pub average: String,
    /// Credits that count towards the average
    pub graded_credits: u32,
    /// Credits of every subject
    pub registered_credits: u32,
    /// Overall attendance percentage, one decimal
    pub attendance: String,
    /// Whether this is the current semester
    pub is_current: bool,
    /// Subjects in insertion order
    pub subjects: Vec<SubjectRow>,
}

impl SemesterSection {
    fn new(semester: &Semester, current: SemesterId) -> Self {
        let average = semester_average(semester);
        Self {
            id: semester.id,
            name: semester.name.clone(),
            average: format!("{:.2}", average.average),
            graded_credits: average.total_credits,
            registered_credits: semester.registered_credits(),
            attendance: format!("{:.1}", percentage_of(semester_attendance(semester))),
            is_current: semester.id == current,
            subjects: semester.subjects.iter().map(SubjectRow::from).collect(),
        }
    }
}

/// One class in the weekly schedule table
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRow {
    /// Display time
    pub time: String,
    /// Abbreviation
    pub short_name: String,
    /// Full name
    pub full_name: String,
    /// Room
    pub room: String,
}

/// A day of the weekly schedule
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    /// Day name
    pub day: &'static str,
    /// Classes by start time
    pub classes: Vec<ClassRow>,
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Source data
    pub data: &'a AppData,
    /// Generation timestamp, preformatted
    pub generated_at: String,
    /// Cumulative average, two decimals
    pub cumulative: String,
    /// Graded credits overall
    pub graded_credits: u32,
    /// Target average, two decimals
    pub target: String,
    /// Progress towards the target, percent with no decimals
    pub progress: String,
    /// Semester sections in id order
    pub semesters: Vec<SemesterSection>,
    /// Average trend per semester
    pub trend: Vec<TrendPoint>,
    /// Grade buckets
    pub distribution: GradeDistribution,
    /// Current-semester subjects below the safe attendance threshold
    pub at_risk: Vec<SubjectRow>,
    /// Weekly schedule, days without classes omitted
    pub schedule: Vec<DaySchedule>,
}

impl<'a> ReportContext<'a> {
    /// Build a context stamped with the local time
    #[must_use]
    pub fn new(data: &'a AppData) -> Self {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        Self::with_timestamp(data, stamp)
    }

    /// Build a context with an explicit timestamp
    #[must_use]
    pub fn with_timestamp(data: &'a AppData, generated_at: String) -> Self {
        let cumulative = cumulative_average(&data.semesters);
        let at_risk = data
            .active_semester()
            .map(|sem| {
                sem.subjects
                    .iter()
                    .filter(|s| attendance_percentage(s) < SAFE_ATTENDANCE)
                    .map(SubjectRow::from)
                    .collect()
            })
            .unwrap_or_default();
        let schedule = Day::ALL
            .into_iter()
            .filter(|day| !data.entries(*day).is_empty())
            .map(|day| DaySchedule {
                day: day.name(),
                classes: data
                    .entries(day)
                    .iter()
                    .map(|e| ClassRow {
                        time: e.time.clone(),
                        short_name: e.short_name.clone(),
                        full_name: e.full_name.clone(),
                        room: e.room.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            data,
            generated_at,
            cumulative: format!("{:.2}", cumulative.average),
            graded_credits: cumulative.total_credits,
            target: format!("{:.2}", data.target_cgpa),
            progress: format!("{:.0}", target_progress(cumulative.average, data.target_cgpa)),
            semesters: data
                .semesters
                .values()
                .map(|s| SemesterSection::new(s, data.current_semester))
                .collect(),
            trend: average_trend(data),
            distribution: grade_distribution(data),
            at_risk,
            schedule,
        }
    }

    /// Name of the current semester
    #[must_use]
    pub fn current_semester_name(&self) -> &str {
        self.data.active_semester().map_or("-", |s| s.name.as_str())
    }

    /// Number of subjects across all semesters
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.data.subjects().count()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the report as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Render the report and write it to `output_path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        Ok(())
    }
}
