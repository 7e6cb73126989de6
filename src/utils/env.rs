//! Environment variable helpers
//!
//! Configuration reads the process environment through these helpers so
//! that empty values behave like unset ones.

use std::env;

/// Environment variable utilities
#[derive(Debug)]
pub struct EnvUtils;

impl EnvUtils {
    /// Get a non-empty environment variable
    pub fn get_var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.trim().is_empty())
    }

    /// Interpret a flag-like variable value
    pub fn is_truthy(value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_var_for_missing_var() {
        assert_eq!(EnvUtils::get_var("CREATE_TURBO_NONEXISTENT_VAR_12345"), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(EnvUtils::is_truthy("1"));
        assert!(EnvUtils::is_truthy("TRUE"));
        assert!(EnvUtils::is_truthy(" yes "));
        assert!(EnvUtils::is_truthy("on"));

        assert!(!EnvUtils::is_truthy("0"));
        assert!(!EnvUtils::is_truthy("false"));
        assert!(!EnvUtils::is_truthy(""));
    }
}
