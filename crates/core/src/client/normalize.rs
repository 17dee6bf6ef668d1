//! Input normalization applied before any client record is written.
//!
//! Email uniqueness is checked against the normalized form, so two inputs
//! differing only by case or surrounding whitespace collide on the same
//! stored value.

/// Normalizes an email address: trim surrounding whitespace, lowercase.
///
/// Idempotent: normalizing an already-normalized value is a no-op.
#[must_use]
pub fn email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalizes a client name: trim surrounding whitespace.
#[must_use]
pub fn name(raw: &str) -> String {
    raw.trim().to_string()
}

/// Normalizes a phone number: trim surrounding whitespace.
///
/// Format validation (`+` followed by 10-15 digits) happens at the request
/// boundary; this only strips what validation already tolerates.
#[must_use]
pub fn phone(raw: &str) -> String {
    raw.trim().to_string()
}
