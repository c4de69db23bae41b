//! Form field rules shared by the login, patient, and profile forms.
//!
//! Each check returns `Err(CoreError::Validation)` carrying the message staff
//! see next to the field.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Date;

/// Minimum length for a person's name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum length for a password (login and password change).
pub const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
const PHONE_PATTERN: &str = r"^\+?[0-9]{10,15}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::validation("Name is required"));
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(CoreError::validation(format!(
            "Name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().is_empty() {
        return Err(CoreError::validation("Email is required"));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(CoreError::validation("Invalid email address"));
    }
    Ok(())
}

/// Optional leading `+`, then 10 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if phone.trim().is_empty() {
        return Err(CoreError::validation("Phone number is required"));
    }
    if !PHONE_RE.is_match(phone.trim()) {
        return Err(CoreError::validation("Please enter a valid phone number"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::validation("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Appointments may be booked for today or later.
pub fn validate_appointment_date(date: Date, today: Date) -> Result<(), CoreError> {
    if date < today {
        return Err(CoreError::validation("Date cannot be in the past"));
    }
    Ok(())
}
