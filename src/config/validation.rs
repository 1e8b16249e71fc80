//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts ≥ 1, intervals > 0, multiplier ≥ 1)
//! - Check the RPC URL is an http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SdkConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::SdkConfig;

/// A single semantic problem with a config value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `rpc.url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "rpc.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("rpc.url", format!("invalid URL: {}", e))),
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.timeout_secs", "must be greater than 0"));
    }

    let submission = &config.submission;
    if submission.max_attempts == 0 {
        errors.push(ValidationError::new("submission.max_attempts", "must be at least 1"));
    }
    if submission.initial_interval_ms == 0 {
        errors.push(ValidationError::new(
            "submission.initial_interval_ms",
            "must be greater than 0",
        ));
    }
    if !(submission.backoff_multiplier >= 1.0 && submission.backoff_multiplier.is_finite()) {
        errors.push(ValidationError::new(
            "submission.backoff_multiplier",
            "must be a finite number of at least 1.0",
        ));
    }

    let confirmation = &config.confirmation;
    if confirmation.max_attempts == 0 {
        errors.push(ValidationError::new("confirmation.max_attempts", "must be at least 1"));
    }
    if confirmation.interval_ms == 0 {
        errors.push(ValidationError::new("confirmation.interval_ms", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
