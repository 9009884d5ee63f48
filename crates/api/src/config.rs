//! Process configuration, read from the environment at startup.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;

use autoflex_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "AUTOFLEX_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "AUTOFLEX_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)),
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    /// Read the configuration from process environment variables.
    ///
    /// Unset or blank variables fall back to the defaults; malformed ones are errors.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(BIND_ADDR_VAR) {
            config.bind_addr = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {BIND_ADDR_VAR}: {raw:?}"))?;
        }

        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }

        Ok(config)
    }
}
