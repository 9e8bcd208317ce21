//! Report command handler
//!
//! Writes the transcript with the starting-grade breakdown as Markdown or HTML.

use libretto::config::Config;
use libretto::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use libretto::core::session::Session;
use libretto::core::store::RecordStore;
use libretto::info;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Base name of the report file when no output path is given
const DEFAULT_REPORT_STEM: &str = "transcript";

/// Run the report command.
///
/// # Arguments
/// * `session` - Session holding the exams to report
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `config` - Configuration providing the scale and the records location
///
/// # Errors
/// Returns an error message if the format is unknown or the file cannot be written
pub fn run<S: RecordStore>(
    session: &Session<S>,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<(), String> {
    let format =
        ReportFormat::from_str(format_str).map_err(|e| format!("{e}. Use: markdown or html"))?;

    let output_path = output_file.map_or_else(|| default_output_path(config, format), Path::to_path_buf);

    let scale = config.scale();
    let ctx = ReportContext::new(session.state(), session.starting_grade(scale), scale);
    write_report(&ctx, format, &output_path)?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());
    Ok(())
}

/// `transcript.<ext>` next to the records file
fn default_output_path(config: &Config, format: ReportFormat) -> PathBuf {
    let records = config.records_path();
    let dir = records.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{DEFAULT_REPORT_STEM}.{}", format.extension()))
}

/// Write the report to a file in the specified format
fn write_report(ctx: &ReportContext, format: ReportFormat, output_path: &Path) -> Result<(), String> {
    match format {
        ReportFormat::Markdown => MarkdownReporter::new()
            .generate(ctx, output_path)
            .map_err(|e| format!("Failed to generate Markdown report: {e}")),
        ReportFormat::Html => HtmlReporter::new()
            .generate(ctx, output_path)
            .map_err(|e| format!("Failed to generate HTML report: {e}")),
    }
}
