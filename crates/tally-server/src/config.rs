use std::time::Duration;

use anyhow::{Context, Result, bail};

const DEFAULT_API_URL: &str = "https://api.xsolla.com";

/// Webhook demo server settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub secret_key: String,
    pub merchant_id: String,
    pub api_key: String,
    pub project_id: u64,
    pub api_url: String,
    pub api_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("TALLY_SECRET_KEY").unwrap_or_default();
        if secret_key.is_empty() {
            bail!("TALLY_SECRET_KEY is unset; it must match the project's webhook secret");
        }

        let port = lookup("TALLY_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("TALLY_PORT is not a valid port")?;
        let project_id = lookup("TALLY_PROJECT_ID")
            .unwrap_or_else(|| "0".into())
            .parse()
            .context("TALLY_PROJECT_ID is not a number")?;
        let api_timeout_secs: u64 = lookup("TALLY_API_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".into())
            .parse()
            .context("TALLY_API_TIMEOUT_SECS is not a number")?;
        if api_timeout_secs == 0 {
            bail!("TALLY_API_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            host: lookup("TALLY_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            secret_key,
            merchant_id: lookup("TALLY_MERCHANT_ID").unwrap_or_default(),
            api_key: lookup("TALLY_API_KEY").unwrap_or_default(),
            project_id,
            api_url: lookup("TALLY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            api_timeout: Duration::from_secs(api_timeout_secs),
        })
    }
}
