//! Starting grade commands: `start` and `simulate`

use libretto::core::aggregator::Scale;
use libretto::core::input::{parse_credits, parse_grade};
use libretto::core::session::Session;
use libretto::core::store::RecordStore;
use libretto::shell::render;

/// Print the starting grade breakdown
///
/// # Errors
/// Returns an error message if there are no exams
pub fn start<S: RecordStore>(session: &Session<S>, scale: Scale) -> Result<(), String> {
    if session.state().exams.is_empty() {
        return Err("No exams found. Please add exams first.".to_string());
    }
    print!("{}", render::starting_grade(&session.starting_grade(scale)));
    Ok(())
}

/// Print the starting grade with one hypothetical extra exam
///
/// # Errors
/// Returns an error message if the grade or credits are invalid
pub fn simulate<S: RecordStore>(
    session: &Session<S>,
    grade: &str,
    credits: &str,
    scale: Scale,
) -> Result<(), String> {
    let grade = parse_grade(grade).map_err(|e| e.to_string())?;
    let credits = parse_credits(credits).map_err(|e| e.to_string())?;
    print!(
        "{}",
        render::starting_grade(&session.simulate(grade, credits, scale))
    );
    Ok(())
}
