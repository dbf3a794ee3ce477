use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid")
    })
}

/// Trims and lower-cases an email address, rejecting anything that is not
/// shaped like `local@domain.tld`.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let normalized = email.trim().to_lowercase();
    if !email_pattern().is_match(&normalized) {
        return Err(ValidationError(format!("'{}' is not a valid email address", email.trim())));
    }
    Ok(normalized)
}

pub fn require_non_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{} must not be empty", field)));
    }
    Ok(())
}
