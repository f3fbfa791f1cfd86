//! Markdown report generator
//!
//! Renders the report as GitHub-flavoured Markdown tables by placeholder
//! substitution into an embedded template.

use crate::core::report::{ReportContext, ReportGenerator, SemesterSection};
use crate::core::schedule::format_hour;
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{generated_at}}", &ctx.generated_at);
        output = output.replace("{{current_semester}}", ctx.current_semester_name());
        output = output.replace("{{cumulative}}", &ctx.cumulative);
        output = output.replace("{{graded_credits}}", &ctx.graded_credits.to_string());
        output = output.replace("{{target}}", &ctx.target);
        output = output.replace("{{progress}}", &ctx.progress);
        output = output.replace("{{subject_count}}", &ctx.subject_count().to_string());

        output = output.replace("{{trend}}", &Self::trend_table(ctx));
        output = output.replace("{{distribution}}", &Self::distribution_table(ctx));
        output = output.replace("{{at_risk}}", &Self::at_risk_list(ctx));
        output = output.replace("{{semesters}}", &Self::semester_sections(ctx));
        output = output.replace("{{schedule}}", &Self::schedule_table(ctx));

        output
    }

    fn trend_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Semester | Average | Cumulative | Subjects |\n");
        table.push_str("|---|---|---|---|\n");
        for point in &ctx.trend {
            let _ = writeln!(
                table,
                "| {} | {:.2} | {:.2} | {} |",
                point.name,
                point.semester_average.average,
                point.cumulative_average.average,
                point.subjects
            );
        }
        table
    }

    fn distribution_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Grade points | Subjects |\n");
        table.push_str("|---|---|\n");
        for (label, count) in ctx.distribution.buckets() {
            let _ = writeln!(table, "| {label} | {count} |");
        }
        table
    }

    fn at_risk_list(ctx: &ReportContext) -> String {
        if ctx.at_risk.is_empty() {
            return "No subject is below 75% attendance.\n".to_string();
        }
        let mut list = String::new();
        for row in &ctx.at_risk {
            let _ = writeln!(
                list,
                "- ⚠️ **{}**: {}% ({}, {})",
                row.name, row.percentage, row.attendance, row.status
            );
        }
        list
    }

    fn semester_table(section: &SemesterSection) -> String {
        let mut out = String::new();
        let marker = if section.is_current { " (current)" } else { "" };
        let _ = writeln!(out, "### {}{marker}\n", section.name);
        let _ = writeln!(
            out,
            "Average **{}** over {} graded credits ({} registered), attendance {}%\n",
            section.average, section.graded_credits, section.registered_credits, section.attendance
        );
        if section.subjects.is_empty() {
            out.push_str("_No subjects._\n");
            return out;
        }
        out.push_str("| Subject | Credits | Grade | Letter | Attendance | % |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for row in &section.subjects {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                row.name, row.credits, row.grade, row.letter, row.attendance, row.percentage
            );
        }
        out
    }

    fn semester_sections(ctx: &ReportContext) -> String {
        ctx.semesters
            .iter()
            .map(Self::semester_table)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn schedule_table(ctx: &ReportContext) -> String {
        if ctx.schedule.is_empty() {
            return "_No classes scheduled._\n".to_string();
        }
        let mut table = String::new();
        table.push_str("| Day | Time | Class | Room |\n");
        table.push_str("|---|---|---|---|\n");
        for day in &ctx.schedule {
            for class in &day.classes {
                let _ = writeln!(
                    table,
                    "| {} | {} | {} ({}) | {} |",
                    day.day, class.time, class.full_name, class.short_name, class.room
                );
            }
        }
        let first = ctx
            .data
            .timetable
            .values()
            .flatten()
            .map(|e| e.start_hour)
            .fold(f64::INFINITY, f64::min);
        if first.is_finite() {
            let _ = writeln!(table, "\nEarliest class of the week starts at {}.", format_hour(first));
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AppData;

    #[test]
    fn test_render_fills_every_placeholder() {
        let data = AppData::default();
        let ctx = ReportContext::with_timestamp(&data, "2026-01-05 09:00".into());
        let md = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(!md.contains("{{"));
        assert!(md.contains("2026-01-05 09:00"));
        assert!(md.contains("### Semester 6 (current)"));
        assert!(md.contains("| MONDAY | 08:00-09:00 | Applied Data Analytics (ADA) | AB5-306 |"));
        assert!(md.contains("Earliest class of the week starts at 08:00."));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.md");
        let data = AppData::default();
        let ctx = ReportContext::with_timestamp(&data, "t".into());
        MarkdownReporter::new().generate(&ctx, &path).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().starts_with("# Academic Progress Report"));
    }
}
