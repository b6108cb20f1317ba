use std::{env, path::PathBuf, str::FromStr};

use dotenvy::dotenv;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_file: PathBuf,
    pub redis_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub store: StoreConfig,

    // Rate limiting
    pub rate_api_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_raw = lookup("STORE_BACKEND").unwrap_or_else(|| "memory".to_string());
        let backend = StoreBackend::from_str(&backend_raw.trim().to_lowercase()).map_err(|_| {
            ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: backend_raw.clone(),
            }
        })?;

        let rate_api_per_min: u32 = parse_or(&lookup, "RATE_API_PER_MIN", 1000)?;
        if rate_api_per_min == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_API_PER_MIN",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            api_prefix: normalize_prefix(
                &lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            ),
            store: StoreConfig {
                backend,
                data_file: lookup("DATA_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data/pto-tracker.json")),
                redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            },
            rate_api_per_min,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

/// `api/` and `/api/` both become `/api`; an empty prefix stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.data_file, PathBuf::from("data/pto-tracker.json"));
        assert_eq!(config.store.redis_url, None);
        assert_eq!(config.rate_api_per_min, 1000);
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn backend_and_prefix_are_normalized() {
        let config = config_from(&[
            ("STORE_BACKEND", " File "),
            ("API_PREFIX", "v1/"),
            ("DATA_FILE", "/tmp/pto.json"),
        ])
        .unwrap();
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.api_prefix, "/v1");
        assert_eq!(config.store.data_file, PathBuf::from("/tmp/pto.json"));
    }

    #[test]
    fn bad_values_are_reported_with_their_key() {
        let err = config_from(&[("STORE_BACKEND", "postgres")]).unwrap_err();
        assert_eq!(err.to_string(), "STORE_BACKEND has an invalid value `postgres`");

        let err = config_from(&[("RATE_API_PER_MIN", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RATE_API_PER_MIN", .. }));

        assert!(config_from(&[("RATE_API_PER_MIN", "0")]).is_err());
    }
}
