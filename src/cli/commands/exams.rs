//! Exam list editing commands: `list`, `add`, `record`, `update`, `remove`, `reset`

use libretto::core::input::{is_affirmative, parse_credits, parse_date, parse_grade, parse_name};
use libretto::core::models::ExamRecord;
use libretto::core::session::Session;
use libretto::core::store::RecordStore;
use libretto::shell::render;
use libretto::{info, verbose};
use std::io::{self, Write};

/// Print the completed and pending tables
pub fn list<S: RecordStore>(session: &Session<S>) {
    print!("{}", render::transcript(session.state()));
}

/// Add a new exam, graded when `grade` is given
///
/// # Errors
/// Returns an error message if an argument is invalid or saving fails
pub fn add<S: RecordStore>(
    session: &mut Session<S>,
    name: &str,
    credits: &str,
    grade: Option<&str>,
    date: Option<&str>,
) -> Result<(), String> {
    let name = parse_name(name).map_err(|e| e.to_string())?;
    let credits = parse_credits(credits).map_err(|e| e.to_string())?;

    let exam = match grade {
        Some(raw) => {
            let grade = parse_grade(raw).map_err(|e| e.to_string())?;
            let date = parse_date(date.unwrap_or_default()).map_err(|e| e.to_string())?;
            ExamRecord::graded(name.clone(), credits, grade, date)
        }
        None => ExamRecord::new(name.clone(), credits),
    };

    let graded = exam.is_graded();
    session.add_exam(exam).map_err(|e| e.to_string())?;
    if graded {
        println!("✓ Exam added: {name}");
    } else {
        println!("✓ Exam added: {name} (no grade yet)");
    }
    Ok(())
}

/// Grade the `index`-th pending exam
///
/// # Errors
/// Returns an error message if an argument is invalid, the index is out of
/// range, or saving fails
pub fn record<S: RecordStore>(
    session: &mut Session<S>,
    index: usize,
    grade: &str,
    date: Option<&str>,
) -> Result<(), String> {
    let grade = parse_grade(grade).map_err(|e| e.to_string())?;
    let date = parse_date(date.unwrap_or_default()).map_err(|e| e.to_string())?;

    let exam = session
        .record_grade(index, grade, date)
        .map_err(|e| e.to_string())?;
    println!("✓ Exam updated: {} - Grade {}", exam.name, exam.grade);
    Ok(())
}

/// Change grade and date of the `index`-th graded exam
///
/// # Errors
/// Returns an error message if an argument is invalid, the index is out of
/// range, or saving fails
pub fn update<S: RecordStore>(
    session: &mut Session<S>,
    index: usize,
    grade: &str,
    date: Option<&str>,
) -> Result<(), String> {
    let grade = parse_grade(grade).map_err(|e| e.to_string())?;
    let date = parse_date(date.unwrap_or_default()).map_err(|e| e.to_string())?;

    let exam = session
        .update_grade(index, grade, date)
        .map_err(|e| e.to_string())?;
    println!("✓ Exam updated: {} - Grade {}", exam.name, exam.grade);
    Ok(())
}

/// Remove the `index`-th exam of the full list
///
/// # Errors
/// Returns an error message if the index is out of range or saving fails
pub fn remove<S: RecordStore>(session: &mut Session<S>, index: usize) -> Result<(), String> {
    let exam = session.remove_exam(index).map_err(|e| e.to_string())?;
    println!("✓ Exam removed: {}", exam.name);
    Ok(())
}

/// Clear every grade and date, asking first unless `yes` is set
///
/// # Errors
/// Returns an error message if saving fails
pub fn reset<S: RecordStore>(session: &mut Session<S>, yes: bool) -> Result<(), String> {
    if !yes {
        print!("Are you sure you want to reset all exams? (y/n): ");
        io::stdout().flush().ok();

        let mut response = String::new();
        io::stdin().read_line(&mut response).ok();

        if !is_affirmative(&response) {
            println!("✗ Reset cancelled");
            return Ok(());
        }
    }

    session.reset().map_err(|e| e.to_string())?;
    info!("Transcript reset");
    verbose!("{} exams kept without grade", session.state().exams.len());
    println!("✓ All exams have been reset");
    Ok(())
}
