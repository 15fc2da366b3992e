use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

const DEFAULT_PORT: &str = "5000";
const DEFAULT_PREDICTION_URL: &str = "http://django:8000/api/predict/";
const DEFAULT_TIMEOUT_MS: &str = "10000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub prediction_url: Url,
    pub timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_ms: u64 = try_load(&lookup, "PREDICTION_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;

        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "PREDICTION_TIMEOUT_MS",
                value: timeout_ms.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", DEFAULT_PORT)?,
            prediction_url: try_load(&lookup, "PREDICTION_API_URL", DEFAULT_PREDICTION_URL)?,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty()).or_else(|| {
        warn!("Environment variable {key} not found, using default");
        None
    })
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(lookup, key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
