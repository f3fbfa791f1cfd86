//! Report command handler
//!
//! Renders the progress report (HTML or Markdown) for the stored data.

use super::{CommandResult, Session};
use academic_navigator::config::Config;
use academic_navigator::core::report::{ReportContext, ReportFormat};
use academic_navigator::{error, info};
use std::path::{Path, PathBuf};

/// Generate a report
///
/// Without `--output` the report goes to the configured reports directory as
/// `academic-report-<date>.<ext>`.
///
/// # Errors
/// The reports directory cannot be created or the report cannot be written.
pub fn run(
    session: &Session,
    format: ReportFormat,
    output: Option<&Path>,
    config: &Config,
) -> CommandResult {
    let path = output.map_or_else(
        || default_path(&config.paths.reports_dir, format, &chrono::Local::now().format("%Y%m%d-%H%M").to_string()),
        Path::to_path_buf,
    );

    let ctx = ReportContext::new(&session.data);
    format.reporter().generate(&ctx, &path).map_err(|e| {
        error!("Report generation failed for {}: {e}", path.display());
        format!("Failed to generate {format} report: {e}")
    })?;

    info!("Report exported to: {}", path.display());
    println!("✓ Report generated: {}", path.display());
    print_summary(&ctx);
    Ok(())
}

/// `<reports_dir>/academic-report-<stamp>.<ext>`
fn default_path(reports_dir: &str, format: ReportFormat, stamp: &str) -> PathBuf {
    let dir = if reports_dir.is_empty() {
        Config::get_navigator_dir().join("reports")
    } else {
        PathBuf::from(reports_dir)
    };
    dir.join(format!("academic-report-{stamp}.{}", format.extension()))
}

fn print_summary(ctx: &ReportContext) {
    println!("\n=== Summary ===");
    println!("Current semester: {}", ctx.current_semester_name());
    println!("Cumulative average: {} over {} graded credits", ctx.cumulative, ctx.graded_credits);
    println!("Target: {} ({}% reached)", ctx.target, ctx.progress);
    if !ctx.at_risk.is_empty() {
        println!("⚠️  {} subjects below 75% attendance", ctx.at_risk.len());
    }
}
