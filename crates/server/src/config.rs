//! Process configuration, read once from the environment at startup.

use std::time::Duration;

use cinedex_upstream::config::{DEFAULT_BASE_URL, DEFAULT_HOST, UpstreamConfig};
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:3001";

const BIND_VAR: &str = "CINEDEX_BIND";
const BASE_URL_VAR: &str = "RAPIDAPI_BASE_URL";
const HOST_VAR: &str = "RAPIDAPI_HOST";
const KEY_VAR: &str = "RAPIDAPI_KEY";
const TIMEOUT_VAR: &str = "CINEDEX_UPSTREAM_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid ({value:?}): {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// Blank values count as unset, except for the base URL, where a blank
    /// value is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(KEY_VAR).ok_or(ConfigError::Missing(KEY_VAR))?;
        let base_url = match lookup(BASE_URL_VAR) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    var: BASE_URL_VAR,
                    value: raw,
                    reason: "must not be empty",
                });
            }
            Some(raw) => raw.trim().to_string(),
            None => DEFAULT_BASE_URL.to_string(),
        };
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: BASE_URL_VAR,
                value: base_url,
                reason: "expected an http(s) URL",
            });
        }

        let mut upstream = UpstreamConfig::new(base_url, api_key)
            .with_host(get(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string()));

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: "expected a positive number of seconds",
                })?;
            upstream = upstream.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            bind_addr: get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            upstream,
        })
    }
}
