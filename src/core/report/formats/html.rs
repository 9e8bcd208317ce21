//! HTML report generator
//!
//! The generated page is self-contained with embedded CSS.

use crate::core::input::{format_date, format_grade};
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/transcript.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let output = HTML_TEMPLATE
            .replace("{{completed_table}}", &Self::completed_html(ctx))
            .replace("{{pending_table}}", &Self::pending_html(ctx));
        ctx.substitute_summary(&output)
    }

    fn completed_html(ctx: &ReportContext) -> String {
        let completed = ctx.completed();
        if completed.is_empty() {
            return "<p><em>No completed exams.</em></p>".to_string();
        }

        let mut html = String::from("<table>\n    <tr><th>#</th><th>Name</th><th>CFU</th><th>Grade</th><th>Date</th></tr>\n");
        for (i, exam) in completed.iter().enumerate() {
            let class = if exam.is_honors() { " class=\"honors\"" } else { "" };
            let _ = writeln!(
                html,
                "    <tr><td>{}</td><td>{}</td><td>{}</td><td{class}>{}</td><td>{}</td></tr>",
                i + 1,
                escape_html(&exam.name),
                exam.credits,
                format_grade(exam.grade),
                format_date(exam.date)
            );
        }
        html.push_str("  </table>");
        html
    }

    fn pending_html(ctx: &ReportContext) -> String {
        let pending = ctx.pending();
        if pending.is_empty() {
            return "<p><em>No pending exams.</em></p>".to_string();
        }

        let mut html = String::from("<table>\n    <tr><th>#</th><th>Name</th><th>CFU</th></tr>\n");
        for (i, exam) in pending.iter().enumerate() {
            let _ = writeln!(
                html,
                "    <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                i + 1,
                escape_html(&exam.name),
                exam.credits
            );
        }
        html.push_str("  </table>");
        html
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
