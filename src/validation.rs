//! Calendar and mood rules for diary entries.
//!
//! The calendar is fixed and non-leap: February always has 28 days.

use validator::ValidationError;

use crate::error::{AppError, AppResult};
use crate::models::mood::Mood;

pub fn is_valid_month(month: i32) -> bool {
    (1..=12).contains(&month)
}

/// Days in `month`. Months outside 1..=12 fall through to 31; callers check
/// the month first.
pub fn days_in_month(month: i32) -> i32 {
    match month {
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn is_valid_day(day: i32, month: i32) -> bool {
    day >= 1 && day <= days_in_month(month)
}

pub fn is_valid_mood(mood: &str) -> bool {
    Mood::from_label(mood).is_some()
}

/// `validator` hook for request bodies carrying a mood label.
pub fn validate_mood(mood: &str) -> Result<(), ValidationError> {
    if is_valid_mood(mood) {
        Ok(())
    } else {
        let mut err = ValidationError::new("mood");
        err.message = Some(format!("Invalid mood '{}'", mood).into());
        Err(err)
    }
}

pub fn check_month(month: i32) -> AppResult<()> {
    if !is_valid_month(month) {
        return Err(AppError::Validation(format!(
            "Invalid month {}: must be between 1 and 12",
            month
        )));
    }
    Ok(())
}

pub fn check_date(day: i32, month: i32) -> AppResult<()> {
    check_month(month)?;
    if !is_valid_day(day, month) {
        return Err(AppError::Validation(format!(
            "Invalid day {} for month {}: must be between 1 and {}",
            day,
            month,
            days_in_month(month)
        )));
    }
    Ok(())
}

pub fn parse_mood(mood: &str) -> AppResult<Mood> {
    Mood::from_label(mood).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid mood '{}': expected one of {}",
            mood,
            Mood::labels().join(", ")
        ))
    })
}
