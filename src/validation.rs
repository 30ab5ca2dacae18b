use regex::Regex;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("domain is empty")]
    Empty,
    #[error("domain label too long (max 63 characters)")]
    LabelTooLong,
    #[error("domain contains invalid characters (only a-z, 0-9, '-', '_' and '.' allowed)")]
    InvalidCharacters,
    #[error("domain label must not start or end with '-'")]
    LeadingOrTrailingHyphen,
    #[error("SRV value must have 4 fields (priority weight port target), got {0}")]
    SrvFieldCount(usize),
    #[error("SRV {field} is not a valid integer: '{value}'")]
    SrvField { field: &'static str, value: String },
    #[error("endpoint {0} has no targets")]
    NoTargets(String),
}

lazy_static::lazy_static! {
    /// Only lowercase letters, digits, '-' and '_'
    static ref LABEL_RE: Regex = Regex::new(r"^[a-z0-9_-]+$").unwrap();
}

/// Normalize a domain-filter entry: trimmed, lower-case, no trailing dot.
pub fn normalize_domain(input: &str) -> String {
    input.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Validate a normalized domain-filter entry label by label.
pub fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    if domain.is_empty() {
        return Err(ValidationError::Empty);
    }
    for label in domain.split('.') {
        if label.is_empty() {
            return Err(ValidationError::Empty);
        }
        if label.len() > 63 {
            return Err(ValidationError::LabelTooLong);
        }
        if !LABEL_RE.is_match(label) {
            return Err(ValidationError::InvalidCharacters);
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(ValidationError::LeadingOrTrailingHyphen);
        }
    }

    Ok(())
}
