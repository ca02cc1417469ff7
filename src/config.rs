//! Runtime settings read from the environment.

use std::time::Duration;
use tracing::warn;

/// Public CSV export of the Washington State EV population dataset.
pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/SudiptaPaul-31/analytics-dashboard-assessment/refs/heads/main/data-to-visualize/Electric_Vehicle_Population_Data.csv";

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/ev_population_stats.log";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Used when no source is given on the command line.
    pub dataset_url: String,
    pub http_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// Log file location from `LOG_FILE_PATH`.
///
/// Kept apart from [`Settings`] because it is needed before logging is set
/// up, while [`Settings`] logs its own fallbacks.
pub fn log_file_path() -> String {
    log_file_path_from(|key| std::env::var(key).ok())
}

fn log_file_path_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_FILE_PATH")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string())
}

impl Settings {
    /// Reads `EV_DATASET_URL` and `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Invalid HTTP_TIMEOUT_SECS, using default");
                    defaults.http_timeout
                }
            },
            None => defaults.http_timeout,
        };

        Self {
            dataset_url: lookup("EV_DATASET_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.dataset_url),
            http_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("EV_DATASET_URL", "data/ev.csv"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(settings.dataset_url, "data/ev.csv");
        assert_eq!(settings.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_log_file_path() {
        assert_eq!(log_file_path_from(lookup(&[])), DEFAULT_LOG_FILE_PATH);
        assert_eq!(log_file_path_from(lookup(&[("LOG_FILE_PATH", "")])), DEFAULT_LOG_FILE_PATH);
        assert_eq!(
            log_file_path_from(lookup(&[("LOG_FILE_PATH", "/tmp/ev.log")])),
            "/tmp/ev.log"
        );
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let settings = Settings::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "soon")]));
        assert_eq!(settings.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        let settings = Settings::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "0")]));
        assert_eq!(settings.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    }
}
