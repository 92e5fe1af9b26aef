//! Field checks applied at the request boundary, before anything reaches the
//! store.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::model::{NewStudent, StudentPatch, MAX_SCORE};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;

pub const DEFAULT_LIST_LIMIT: usize = 100;
pub const MAX_LIST_LIMIT: usize = 1000;

/// Rejected input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be 3-50 characters, got {0}")]
    NameLength(usize),

    #[error("name may only contain letters and spaces: {0:?}")]
    NameCharacters(String),

    #[error("score must be between 0 and 100, got {0}")]
    ScoreOutOfRange(u8),

    #[error("limit must be between 1 and 1000, got {0}")]
    LimitOutOfRange(usize),

    #[error("malformed request: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        422
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z ]+$").expect("static pattern"))
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::NameLength(len));
    }
    if !name_pattern().is_match(name) {
        return Err(ValidationError::NameCharacters(name.to_string()));
    }
    Ok(())
}

pub fn validate_score(score: u8) -> Result<(), ValidationError> {
    if score > MAX_SCORE {
        return Err(ValidationError::ScoreOutOfRange(score));
    }
    Ok(())
}

/// Resolve the `limit` query parameter of a listing
pub fn resolve_limit(limit: Option<usize>) -> Result<usize, ValidationError> {
    match limit {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(n) if (1..=MAX_LIST_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(ValidationError::LimitOutOfRange(n)),
    }
}

impl NewStudent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_score(self.score)
    }
}

impl StudentPatch {
    /// Check the fields that are present. Emptiness is not a validation
    /// failure; callers reject empty patches separately.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(score) = self.score {
            validate_score(score)?;
        }
        Ok(())
    }
}
