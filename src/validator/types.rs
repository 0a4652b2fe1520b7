use thiserror::Error;

/// Characters that turn a package pattern into a glob
pub const WILDCARD_CHARS: [char; 3] = ['*', '?', '['];

/// Delimiters that separate tokens inside a package name
pub const TOKEN_DELIMITERS: [char; 2] = ['-', '_'];

/// Minimum number of literal characters required before the first wildcard
pub const MIN_PREFIX_LEN: usize = 3;

/// Minimum length of the token preceding a trailing delimiter
pub const MIN_TOKEN_LEN: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid package pattern '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

impl PatternError {
    pub fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        PatternError::Invalid {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            PatternError::Invalid { pattern, .. } => pattern,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            PatternError::Invalid { reason, .. } => reason,
        }
    }
}
