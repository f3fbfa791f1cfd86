//! HTML report generator
//!
//! Renders a self-contained, printable HTML page with embedded CSS. Every value is
//! HTML-escaped by the template engine.

use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

/// Template binding for `report.html`
#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReport<'a> {
    ctx: &'a ReportContext<'a>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(HtmlReport { ctx }.render()?)
    }
}
