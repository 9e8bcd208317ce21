//! Markdown report generator

use crate::core::input::{format_date, format_grade};
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/transcript.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let output = MARKDOWN_TEMPLATE
            .replace("{{completed_table}}", &Self::completed_table(ctx))
            .replace("{{pending_table}}", &Self::pending_table(ctx));
        ctx.substitute_summary(&output)
    }

    fn completed_table(ctx: &ReportContext) -> String {
        let completed = ctx.completed();
        if completed.is_empty() {
            return "_No completed exams._".to_string();
        }

        let mut table = String::from("| # | Name | CFU | Grade | Date |\n|---|---|---|---|---|\n");
        for (i, exam) in completed.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} |",
                i + 1,
                escape_cell(&exam.name),
                exam.credits,
                format_grade(exam.grade),
                format_date(exam.date)
            );
        }
        table
    }

    fn pending_table(ctx: &ReportContext) -> String {
        let pending = ctx.pending();
        if pending.is_empty() {
            return "_No pending exams._".to_string();
        }

        let mut table = String::from("| # | Name | CFU |\n|---|---|---|\n");
        for (i, exam) in pending.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} |",
                i + 1,
                escape_cell(&exam.name),
                exam.credits
            );
        }
        table
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::{compute_starting_grade, Scale};
    use crate::core::models::exam::HONORS;
    use crate::core::models::{ExamRecord, Parameters, RecordState};

    #[test]
    fn test_render_contains_tables_and_result() {
        let state = RecordState::new(
            vec![
                ExamRecord::graded("Analisi | I".to_string(), 9, HONORS, None),
                ExamRecord::new("Fisica".to_string(), 6),
            ],
            Parameters::default(),
        );
        let starting = compute_starting_grade(&state.exams, &state.parameters, Scale::default());
        let ctx = ReportContext::new(&state, starting, Scale::default());

        let md = MarkdownReporter::new().render(&ctx).unwrap();
        assert!(md.contains("| 1 | Analisi \\| I | 9 | 30L | N/A |"));
        assert!(md.contains("| 1 | Fisica | 6 |"));
        assert!(md.contains("**Credits completed:** 9 CFU"));
        assert!(!md.contains("{{"));
    }
}
