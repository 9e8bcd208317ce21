//! Validated-input producers
//!
//! Turn raw text typed by the user into exam grades, dates, credits and
//! parameter values. Everything reaching the aggregator has passed through here.

use crate::core::error::InputError;
use crate::core::models::exam::{DATE_FORMAT, HONORS, MIN_PASSING};
use chrono::NaiveDate;

/// Textual token for maximum honors
pub const HONORS_TOKEN: &str = "30L";

/// Parse a grade: `30L` or `31` for honors, otherwise an integer in 18..=31
///
/// # Errors
/// Returns an error if the value is not a number or out of range
pub fn parse_grade(raw: &str) -> Result<u8, InputError> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case(HONORS_TOKEN) {
        return Ok(HONORS);
    }
    let grade = parse_integer(value)?;
    u8::try_from(grade)
        .ok()
        .filter(|g| (MIN_PASSING..=HONORS).contains(g))
        .ok_or(InputError::GradeOutOfRange { grade })
}

/// Parse an optional `DD-MM-YYYY` date; blank input means no date
///
/// # Errors
/// Returns an error if the text is not a valid calendar date in that form
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| InputError::InvalidDate {
            value: value.to_string(),
        })
}

/// Parse an exam name; surrounding whitespace is dropped
///
/// # Errors
/// Returns an error if the name is blank
pub fn parse_name(raw: &str) -> Result<String, InputError> {
    let name = raw.trim();
    if name.is_empty() {
        Err(InputError::EmptyName)
    } else {
        Ok(name.to_string())
    }
}

/// Parse a strictly positive credit value
///
/// # Errors
/// Returns an error if the value is not a positive integer
pub fn parse_credits(raw: &str) -> Result<u32, InputError> {
    match parse_count(raw)? {
        0 => Err(InputError::NonPositiveCredits),
        credits => Ok(credits),
    }
}

/// Parse a non-negative integer (delay years, discount credits)
///
/// # Errors
/// Returns an error if the value is not a non-negative integer
pub fn parse_count(raw: &str) -> Result<u32, InputError> {
    let value = raw.trim();
    value.parse::<u32>().map_err(|_| InputError::InvalidNumber {
        value: value.to_string(),
    })
}

/// Parse a finite real coefficient
///
/// # Errors
/// Returns an error if the value is not a number or is NaN/infinite
pub fn parse_coefficient(raw: &str) -> Result<f64, InputError> {
    let value = raw.trim();
    let parsed = value.parse::<f64>().map_err(|_| InputError::InvalidNumber {
        value: value.to_string(),
    })?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(InputError::NonFiniteCoefficient {
            value: value.to_string(),
        })
    }
}

/// Parse a menu-style selection within `min..=max`
///
/// # Errors
/// Returns an error if the value is not a number or out of range
pub fn parse_choice(raw: &str, min: usize, max: usize) -> Result<usize, InputError> {
    let choice = parse_integer(raw.trim())?;
    usize::try_from(choice)
        .ok()
        .filter(|c| (min..=max).contains(c))
        .ok_or(InputError::ChoiceOutOfRange { choice, min, max })
}

/// Whether an answer means yes (`y` or `yes`, any case)
#[must_use]
pub fn is_affirmative(raw: &str) -> bool {
    let answer = raw.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Display form of a grade: `30L` for honors
#[must_use]
pub fn format_grade(grade: u8) -> String {
    if grade == HONORS {
        HONORS_TOKEN.to_string()
    } else {
        grade.to_string()
    }
}

/// Display form of an optional date
#[must_use]
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_string(), |d| d.format(DATE_FORMAT).to_string())
}

fn parse_integer(value: &str) -> Result<i64, InputError> {
    value.parse::<i64>().map_err(|_| InputError::InvalidNumber {
        value: value.to_string(),
    })
}
