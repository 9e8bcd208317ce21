//! Transcript report generation
//!
//! Renders the exam record and the starting-grade breakdown as a
//! standalone Markdown or HTML document.

pub mod formats;

use crate::core::aggregator::{Scale, StartingGrade};
use crate::core::models::{ExamRecord, RecordState};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Record being reported
    pub state: &'a RecordState,
    /// Starting grade computed from `state`
    pub starting: StartingGrade,
    /// Scale used for `starting`
    pub scale: Scale,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(state: &'a RecordState, starting: StartingGrade, scale: Scale) -> Self {
        Self {
            state,
            starting,
            scale,
        }
    }

    /// Exams with a grade
    #[must_use]
    pub fn completed(&self) -> Vec<&'a ExamRecord> {
        let state: &'a RecordState = self.state;
        state.graded().collect()
    }

    /// Exams without a grade
    #[must_use]
    pub fn pending(&self) -> Vec<&'a ExamRecord> {
        let state: &'a RecordState = self.state;
        state.pending().collect()
    }

    /// Fill the placeholders shared by every format
    #[must_use]
    pub fn substitute_summary(&self, template: &str) -> String {
        let s = &self.starting;
        let params = &self.state.parameters;
        let pairs: [(&str, String); 19] = [
            ("{{exam_count}}", self.state.exams.len().to_string()),
            ("{{completed_count}}", self.completed().len().to_string()),
            ("{{pending_count}}", self.pending().len().to_string()),
            ("{{completed_credits}}", self.state.completed_credits().to_string()),
            ("{{average}}", format!("{:.2}", s.averages.raw)),
            ("{{average_scaled}}", format!("{:.2}", s.scaled.raw)),
            ("{{average_filtered}}", format!("{:.2}", s.averages.filtered)),
            ("{{average_filtered_scaled}}", format!("{:.2}", s.scaled.filtered)),
            ("{{target_scale}}", format!("{}", self.scale.target)),
            ("{{discount_credits}}", params.discount_credits.to_string()),
            ("{{delay_years}}", params.delay_years.to_string()),
            ("{{honors_count}}", s.honors_count.to_string()),
            ("{{alpha}}", s.coefficients.alpha.to_string()),
            ("{{gamma}}", s.coefficients.gamma.to_string()),
            ("{{delta}}", s.coefficients.delta.to_string()),
            ("{{k}}", format!("{:.3}", s.coefficients.k())),
            ("{{starting_grade}}", format!("{:.2}", s.raw)),
            ("{{starting_grade_filtered}}", format!("{:.2}", s.filtered)),
            ("{{version}}", crate::core::get_version().to_string()),
        ];

        let mut output = template.to_string();
        for (placeholder, value) in &pairs {
            output = output.replace(placeholder, value);
        }
        output
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
