use crate::{
    error::GasTickerError,
    models::{GasOracleResponse, GasOracleResult},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const ETHERSCAN_GAS_ORACLE_URL: &str =
    "https://api.etherscan.io/api?module=gastracker&action=gasoracle";

/// Source of gas price tiers.
///
/// `Ok(None)` means the oracle answered but carried no usable `result`.
#[async_trait]
pub trait GasOracle: Send + Sync {
    async fn fetch_gas_prices(&self) -> Result<Option<GasOracleResult>, GasTickerError>;
}

pub struct EtherscanOracle {
    client: Client,
    url: String,
}

impl EtherscanOracle {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GasTickerError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GasOracle for EtherscanOracle {
    async fn fetch_gas_prices(&self) -> Result<Option<GasOracleResult>, GasTickerError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GasTickerError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: GasOracleResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            status = envelope.status.as_deref().unwrap_or("-"),
            message = envelope.message.as_deref().unwrap_or("-"),
            "Gas oracle responded"
        );

        let prices = envelope.into_result();
        if let Some(prices) = &prices {
            tracing::debug!(
                last_block = ?prices.last_block,
                base_fee = ?prices.suggest_base_fee,
                gas_used_ratio = ?prices.gas_used_ratio,
                "Gas oracle block info"
            );
        }

        Ok(prices)
    }
}
