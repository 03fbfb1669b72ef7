//! Runtime settings read from the environment.

use std::time::Duration;

use rickandmorty_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::controller::DEFAULT_DEBOUNCE;

/// Settings for the search client and controller.
///
/// | Variable | Default |
/// |---|---|
/// | `RICKANDMORTY_BASE_URL` | `https://rickandmortyapi.com/api` |
/// | `RICKANDMORTY_DEBOUNCE_MS` | `1000` |
/// | `RICKANDMORTY_TIMEOUT_SECS` | `30` |
///
/// Unparsable values fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub debounce: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup("RICKANDMORTY_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.base_url),
            debounce: Duration::from_millis(parse_u64(
                lookup("RICKANDMORTY_DEBOUNCE_MS"),
                defaults.debounce.as_millis() as u64,
            )),
            request_timeout: Duration::from_secs(parse_u64(
                lookup("RICKANDMORTY_TIMEOUT_SECS"),
                defaults.request_timeout.as_secs(),
            )),
        }
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("RICKANDMORTY_BASE_URL", "http://localhost:8080/api"),
            ("RICKANDMORTY_DEBOUNCE_MS", "250"),
            ("RICKANDMORTY_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(settings.base_url, "http://localhost:8080/api");
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("RICKANDMORTY_DEBOUNCE_MS", "soon"),
            ("RICKANDMORTY_TIMEOUT_SECS", "-3"),
            ("RICKANDMORTY_BASE_URL", "  "),
        ]));
        assert_eq!(settings, Settings::default());
    }
}
