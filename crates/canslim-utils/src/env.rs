//! Environment configuration helpers

use std::path::PathBuf;

/// Load variables from a `.env` file in the current directory or its parents
///
/// Returns the path that was loaded, or `None` when no file exists.
/// Variables already set in the process environment take precedence.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Failed to read .env file: {}", e);
            None
        }
    }
}

/// Return the value of the first variable in `names` that is set and non-empty
pub fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_var_prefers_earlier_names() {
        unsafe {
            std::env::set_var("CANSLIM_TEST_FIRST_A", "alpha");
            std::env::set_var("CANSLIM_TEST_FIRST_B", "beta");
        }

        assert_eq!(
            first_var(&["CANSLIM_TEST_FIRST_A", "CANSLIM_TEST_FIRST_B"]),
            Some("alpha".to_string())
        );

        unsafe {
            std::env::remove_var("CANSLIM_TEST_FIRST_A");
            std::env::remove_var("CANSLIM_TEST_FIRST_B");
        }
    }

    #[test]
    fn test_first_var_skips_empty_values() {
        unsafe {
            std::env::set_var("CANSLIM_TEST_EMPTY_A", "   ");
            std::env::set_var("CANSLIM_TEST_EMPTY_B", "value");
        }

        assert_eq!(
            first_var(&["CANSLIM_TEST_EMPTY_A", "CANSLIM_TEST_EMPTY_B"]),
            Some("value".to_string())
        );

        unsafe {
            std::env::remove_var("CANSLIM_TEST_EMPTY_A");
            std::env::remove_var("CANSLIM_TEST_EMPTY_B");
        }
    }

    #[test]
    fn test_first_var_none_when_unset() {
        assert_eq!(first_var(&["CANSLIM_TEST_NEVER_SET_1234"]), None);
    }
}
