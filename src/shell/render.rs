//! Text rendering for the interactive shell and the `list`/`start` commands

use crate::core::aggregator::{compute_weighted_averages, StartingGrade};
use crate::core::input::{format_date, format_grade};
use crate::core::models::{ExamRecord, Parameters, RecordState};
use std::fmt::Write;

const MIN_NAME_WIDTH: usize = 20;

/// Main menu text
pub const MENU: &str = "1) Add an exam grade
2) Update an exam grade
3) Remove exam
4) Compute your starting grade
5) Reset exams
6) Simulate a grade
7) Modify parameters
8) List all exams
[0] Exit
";

/// Section banner, e.g. `═══ ADD EXAM ═══`
#[must_use]
pub fn banner(title: &str) -> String {
    let bar = "═".repeat(22);
    format!("\n{bar} {title} {bar}\n")
}

/// Numbered selection list: `     1) Name (6 CFU)`
#[must_use]
pub fn exam_choices(exams: &[&ExamRecord]) -> String {
    let mut out = String::new();
    for (i, exam) in exams.iter().enumerate() {
        let _ = writeln!(out, "     {}) {} ({} CFU)", i + 1, exam.name, exam.credits);
    }
    out
}

/// Full listing with completed and pending tables and a summary line
#[must_use]
pub fn transcript(state: &RecordState) -> String {
    if state.exams.is_empty() {
        return "[!] No exams registered yet.\n".to_string();
    }

    let completed: Vec<&ExamRecord> = state.graded().collect();
    let pending: Vec<&ExamRecord> = state.pending().collect();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "[*] Total exams: {} | Completed: {} | Pending: {}",
        state.exams.len(),
        completed.len(),
        pending.len()
    );

    if !completed.is_empty() {
        let width = name_width(&completed);
        let rule = "─".repeat(width + 30);
        let _ = writeln!(out, "\n🎓 COMPLETED EXAMS:\n{rule}");
        push_row(
            &mut out,
            format!("{:<3} {:<width$} {:<5} {:<7} {:<12}", "#", "Name", "CFU", "Grade", "Date"),
        );
        let _ = writeln!(out, "{rule}");
        for (i, exam) in completed.iter().enumerate() {
            push_row(
                &mut out,
                format!(
                    "{:<3} {:<width$} {:<5} {:<7} {:<12}",
                    i + 1,
                    exam.name,
                    exam.credits,
                    format_grade(exam.grade),
                    format_date(exam.date)
                ),
            );
        }
    }

    if !pending.is_empty() {
        let width = name_width(&pending);
        let rule = "─".repeat(width + 10);
        let _ = writeln!(out, "\n📝 PENDING EXAMS:\n{rule}");
        push_row(&mut out, format!("{:<3} {:<width$} {:<5}", "#", "Name", "CFU"));
        let _ = writeln!(out, "{rule}");
        for (i, exam) in pending.iter().enumerate() {
            push_row(
                &mut out,
                format!("{:<3} {:<width$} {:<5}", i + 1, exam.name, exam.credits),
            );
        }
    }

    if !completed.is_empty() {
        let average = compute_weighted_averages(&state.exams, 0).raw;
        let _ = writeln!(
            out,
            "\n📊 SUMMARY: {} CFU completed | Average: {average:.2}",
            state.completed_credits()
        );
    }

    out
}

fn name_width(exams: &[&ExamRecord]) -> usize {
    let longest = exams
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);
    (longest + 2).max(MIN_NAME_WIDTH)
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

/// Starting-grade breakdown, rounded to 2 decimals
#[must_use]
pub fn starting_grade(result: &StartingGrade) -> String {
    let c = &result.coefficients;
    let mut out = String::new();
    let _ = writeln!(out, "[*] Parameters:");
    let _ = writeln!(
        out,
        "     > alpha = {}  |  gamma = {}  |  delta = {}",
        c.alpha, c.gamma, c.delta
    );
    let _ = writeln!(
        out,
        "     > Weighted Average: {:.2} --> {:.2}",
        result.averages.raw, result.scaled.raw
    );
    let _ = writeln!(
        out,
        "     > Weighted Average (FILTERED): {:.2} --> {:.2}\n",
        result.averages.filtered, result.scaled.filtered
    );
    let _ = writeln!(out, "[*] Starting grade: {:.2}", result.raw);
    let _ = writeln!(out, "[*] Starting grade (FILTERED): {:.2}", result.filtered);
    out
}

/// Current parameter values
#[must_use]
pub fn parameters(params: &Parameters) -> String {
    format!(
        "     > fuori_corso: {}\n     > cfu_off: {}\n     > alpha: {}\n",
        params.delay_years, params.discount_credits, params.bonus_coefficient
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::{compute_starting_grade, Scale};
    use crate::core::models::exam::HONORS;

    #[test]
    fn test_empty_transcript() {
        assert_eq!(
            transcript(&RecordState::default()),
            "[!] No exams registered yet.\n"
        );
    }

    #[test]
    fn test_transcript_sections() {
        let state = RecordState::new(
            vec![
                ExamRecord::graded("Algebra".to_string(), 6, HONORS, None),
                ExamRecord::graded("Analisi".to_string(), 9, 24, None),
                ExamRecord::new("Fisica".to_string(), 6),
            ],
            Parameters::default(),
        );

        let text = transcript(&state);
        assert!(text.starts_with("[*] Total exams: 3 | Completed: 2 | Pending: 1"));
        assert!(text.contains("🎓 COMPLETED EXAMS:"));
        assert!(text.contains("30L"));
        assert!(text.contains("📝 PENDING EXAMS:"));
        assert!(text.contains("📊 SUMMARY: 15 CFU completed | Average: 26.40"));
    }

    #[test]
    fn test_transcript_rows_are_aligned() {
        let state = RecordState::new(
            vec![ExamRecord::graded("Reti".to_string(), 6, 27, None)],
            Parameters::default(),
        );
        let text = transcript(&state);
        let row = text.lines().find(|l| l.starts_with("1 ")).unwrap();
        assert_eq!(row, format!("1   {:<20} 6     27      N/A", "Reti"));
    }

    #[test]
    fn test_starting_grade_rounding() {
        let exams = vec![
            ExamRecord::graded("A".to_string(), 6, 30, None),
            ExamRecord::graded("B".to_string(), 9, 24, None),
        ];
        let params = Parameters {
            delay_years: 0,
            discount_credits: 6,
            bonus_coefficient: 0.0,
        };
        let result = compute_starting_grade(&exams, &params, Scale::default());
        let text = starting_grade(&result);

        assert!(text.contains("Weighted Average: 26.40 --> 96.80"));
        assert!(text.contains("Weighted Average (FILTERED): 28.00 --> 102.67"));
        assert!(text.contains("[*] Starting grade: 97.77"));
    }
}
