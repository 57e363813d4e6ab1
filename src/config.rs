use crate::{display::DisplayOptions, services::ETHERSCAN_GAS_ORACLE_URL};
use anyhow::{bail, Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub oracle_url: String,
    pub refresh_interval_ms: u64,
    pub show_tooltip: bool,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            oracle_url: get("GAS_ORACLE_URL")
                .unwrap_or_else(|| ETHERSCAN_GAS_ORACLE_URL.to_string()),
            refresh_interval_ms: get("GAS_REFRESH_INTERVAL_MS")
                .unwrap_or_else(|| "60000".to_string())
                .parse()
                .context("Invalid GAS_REFRESH_INTERVAL_MS")?,
            show_tooltip: match get("GAS_SHOW_TOOLTIP") {
                Some(raw) => parse_bool(&raw)
                    .with_context(|| format!("Invalid GAS_SHOW_TOOLTIP: {}", raw))?,
                None => false,
            },
            request_timeout_secs: get("GAS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("Invalid GAS_REQUEST_TIMEOUT_SECS")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.oracle_url.starts_with("http") {
            bail!("GAS_ORACLE_URL must be HTTP(S) URL");
        }
        if self.refresh_interval_ms == 0 {
            bail!("GAS_REFRESH_INTERVAL_MS must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            bail!("GAS_REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        tracing::info!(
            oracle_url = %self.oracle_url,
            refresh_interval_ms = self.refresh_interval_ms,
            show_tooltip = self.show_tooltip,
            "Configuration validated"
        );

        Ok(())
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::default()
            .with_tooltip(self.show_tooltip)
            .with_refresh_interval_ms(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("expected a boolean, got {:?}", other),
    }
}
