mod types;

pub use types::*;

use tracing::debug;

/// Rejects package patterns broad enough to sweep up unrelated packages.
///
/// Stateless; construct it wherever a pattern needs checking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternValidator;

impl PatternValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, pattern: &str) -> Result<(), PatternError> {
        validate_pattern(pattern)
    }
}

/// Returns true if the pattern contains any glob metacharacter
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARD_CHARS)
}

/// Validate a package-name pattern before any filesystem work happens
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::invalid(pattern, "pattern cannot be empty"));
    }

    let Some(wildcard_at) = pattern.find(WILDCARD_CHARS) else {
        debug!(pattern = %pattern, "Exact package name, no wildcard");
        return Ok(());
    };

    if pattern == "*" || pattern == "?" {
        return Err(PatternError::invalid(
            pattern,
            "pattern is too broad and would match every package",
        ));
    }

    let prefix = &pattern[..wildcard_at];
    let prefix_len = prefix.chars().count();

    if prefix_len < MIN_PREFIX_LEN {
        return Err(PatternError::invalid(
            pattern,
            format!(
                "must have at least {} characters before wildcards (found {})",
                MIN_PREFIX_LEN, prefix_len
            ),
        ));
    }

    if let Some(token_part) = prefix.strip_suffix(TOKEN_DELIMITERS) {
        let last_token = token_part
            .rsplit(TOKEN_DELIMITERS)
            .next()
            .unwrap_or(token_part);

        if last_token.chars().count() < MIN_TOKEN_LEN {
            return Err(PatternError::invalid(
                pattern,
                format!(
                    "must have at least one complete token of {}+ characters before wildcards",
                    MIN_TOKEN_LEN
                ),
            ));
        }
    }

    debug!(pattern = %pattern, prefix = %prefix, "Pattern accepted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_rejected() {
        let err = validate_pattern("").unwrap_err();
        assert!(err.reason().contains("cannot be empty"));
    }

    #[test]
    fn test_exact_names_always_accepted() {
        for name in ["a", "go", "hello", "x-y", "lib_z"] {
            assert!(validate_pattern(name).is_ok(), "{} should be accepted", name);
        }
    }

    #[test]
    fn test_bare_wildcards_rejected() {
        assert!(validate_pattern("*").is_err());
        assert!(validate_pattern("?").is_err());
    }

    #[test]
    fn test_short_prefix_rejected() {
        for pattern in ["g*", "go*", "*foo", "a?", "ab[cd]*", "[ab]*"] {
            let err = validate_pattern(pattern).unwrap_err();
            assert!(
                err.reason().contains("at least 3 characters"),
                "{} gave {}",
                pattern,
                err.reason()
            );
            assert_eq!(err.pattern(), pattern);
        }
    }

    #[test]
    fn test_single_char_token_before_delimiter_rejected() {
        for pattern in ["ab-x-*", "a-_*", "foo-b-*", "x_y_*"] {
            let err = validate_pattern(pattern).unwrap_err();
            assert!(
                err.reason().contains("complete token"),
                "{} gave {}",
                pattern,
                err.reason()
            );
        }
    }

    #[test]
    fn test_valid_prefixes_accepted() {
        for pattern in ["gcc*", "lib-*", "py_*", "hello?", "foo-bar-*", "qt5[a-z]*", "go-*"] {
            assert!(validate_pattern(pattern).is_ok(), "{} should be accepted", pattern);
        }
    }

    #[test]
    fn test_has_wildcard() {
        assert!(has_wildcard("foo*"));
        assert!(has_wildcard("fo?"));
        assert!(has_wildcard("f[ab]"));
        assert!(!has_wildcard("foo-bar"));
    }

    #[test]
    fn test_validator_value_type() {
        let validator = PatternValidator::new();
        assert!(validator.validate("hello").is_ok());
        assert!(validator.validate("h*").is_err());
    }
}
