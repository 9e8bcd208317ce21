//! Grading parameters command

use libretto::core::error::InputError;
use libretto::core::input::{parse_coefficient, parse_count};
use libretto::core::models::ParameterUpdate;
use libretto::core::session::Session;
use libretto::core::store::RecordStore;
use libretto::shell::render;

/// Show the parameters, or change the ones given
///
/// # Errors
/// Returns an error message if a value is invalid or saving fails
pub fn run<S: RecordStore>(
    session: &mut Session<S>,
    delay_years: Option<&str>,
    discount_credits: Option<&str>,
    alpha: Option<&str>,
) -> Result<(), String> {
    let update = build_update(delay_years, discount_credits, alpha).map_err(|e| e.to_string())?;

    if update.is_empty() {
        println!("[*] Current parameters:");
        print!("{}", render::parameters(session.parameters()));
        return Ok(());
    }

    let params = session
        .set_parameters(&update)
        .map_err(|e| e.to_string())?;
    println!("✓ Parameters updated:");
    print!("{}", render::parameters(params));
    Ok(())
}

fn build_update(
    delay_years: Option<&str>,
    discount_credits: Option<&str>,
    alpha: Option<&str>,
) -> Result<ParameterUpdate, InputError> {
    Ok(ParameterUpdate {
        delay_years: delay_years.map(parse_count).transpose()?,
        discount_credits: discount_credits.map(parse_count).transpose()?,
        bonus_coefficient: alpha.map(parse_coefficient).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_update_partial() {
        let update = build_update(Some("1"), None, Some("0.5")).unwrap();
        assert_eq!(update.delay_years, Some(1));
        assert!(update.discount_credits.is_none());
        assert_eq!(update.bonus_coefficient, Some(0.5));
    }

    #[test]
    fn test_build_update_rejects_bad_value() {
        assert!(build_update(None, Some("-3"), None).is_err());
        assert!(build_update(None, None, None).unwrap().is_empty());
    }
}
