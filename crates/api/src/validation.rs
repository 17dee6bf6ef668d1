//! Request field validation rules.
//!
//! Every rule trims its input before checking, matching the trim (and, for
//! email, lowercase) normalization applied when the value is stored. A padded
//! value that is valid after trimming passes.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateEmail, ValidationError};

/// Phone numbers: `+` followed by 10 to 15 digits.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\d{10,15}$").expect("valid regex"));

/// Client name: non-empty after trimming, at most 50 characters.
pub fn client_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 50 {
        return Err(ValidationError::new("client_name"));
    }
    Ok(())
}

/// Client email: well-formed address after trimming.
pub fn client_email(value: &str) -> Result<(), ValidationError> {
    if !value.trim().validate_email() {
        return Err(ValidationError::new("client_email"));
    }
    Ok(())
}

/// Client phone: `+` followed by 10 to 15 digits after trimming.
pub fn client_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(value.trim()) {
        return Err(ValidationError::new("client_phone"));
    }
    Ok(())
}
