use crate::catalog::api::DEFAULT_MAX_RETRIES;
use crate::config::model::{Config, ListingConfig, SourcesConfig};
use crate::listing::DEFAULT_PAGE_SIZE;
use crate::view::DEFAULT_LOW_AVAILABILITY_THRESHOLD;
use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid config '{name}': expected {expected}, found '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

/// Same as [`load_config`], reading variables through `lookup`
pub fn load_config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let page_size = load_number_config(&lookup, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;

    if page_size == 0 {
        return Err(ConfigError::Invalid {
            name: "PAGE_SIZE",
            expected: "a positive number",
            value: page_size.to_string(),
        });
    }

    Ok(Config {
        sources: SourcesConfig {
            events: load_string_config(&lookup, "EVENTS_SOURCE", "data/events.json"),
            members: load_string_config(&lookup, "MEMBERS_SOURCE", "data/members.json"),
            courses: load_string_config(&lookup, "COURSES_SOURCE", "data/courses.json"),
        },
        listing: ListingConfig {
            page_size,
            low_availability_threshold: load_number_config(
                &lookup,
                "LOW_AVAILABILITY_THRESHOLD",
                DEFAULT_LOW_AVAILABILITY_THRESHOLD,
            )?,
        },
        load_max_retries: load_number_config(&lookup, "LOAD_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
        loki_url: lookup("LOKI_URL").filter(|url| !url.trim().is_empty()),
    })
}

fn load_string_config<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn load_number_config<F, N>(lookup: &F, name: &'static str, default: N) -> Result<N, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    N: FromStr,
{
    match lookup(name) {
        Some(value) => {
            let parsed = value.trim().parse();

            parsed.map_err(|_| ConfigError::Invalid {
                name,
                expected: "a non-negative integer number",
                value,
            })
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        load_config_from(|name| vars.get(name).cloned())
    }

    #[test_log::test]
    fn missing_variables_should_use_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.sources.events, "data/events.json");
        assert_eq!(config.listing.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(
            config.listing.low_availability_threshold,
            DEFAULT_LOW_AVAILABILITY_THRESHOLD
        );
        assert_eq!(config.load_max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.loki_url, None);
    }

    #[test_log::test]
    fn variables_should_override_defaults() {
        let config = load(&[
            ("EVENTS_SOURCE", "https://example.com/data/events.json"),
            ("PAGE_SIZE", " 9 "),
            ("LOAD_MAX_RETRIES", "0"),
            ("LOKI_URL", "http://localhost:3100"),
        ])
        .unwrap();

        assert_eq!(config.sources.events, "https://example.com/data/events.json");
        assert_eq!(config.listing.page_size, 9);
        assert_eq!(config.load_max_retries, 0);
        assert_eq!(config.loki_url.as_deref(), Some("http://localhost:3100"));
    }

    #[test_log::test]
    fn invalid_numbers_should_name_the_variable() {
        let err = load(&[("LOW_AVAILABILITY_THRESHOLD", "few")]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid config 'LOW_AVAILABILITY_THRESHOLD': expected a non-negative integer number, found 'few'"
        );
    }

    #[test_log::test]
    fn zero_page_size_should_be_rejected() {
        assert!(matches!(
            load(&[("PAGE_SIZE", "0")]),
            Err(ConfigError::Invalid {
                name: "PAGE_SIZE",
                ..
            })
        ));
    }
}
