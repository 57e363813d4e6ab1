use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A gas price in Gwei. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Gwei(f64);

impl Gwei {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Accepts both the string form the oracle sends (`"12"`) and plain JSON numbers.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().and_then(Self::new),
            Value::String(s) => s.trim().parse::<f64>().ok().and_then(Self::new),
            _ => None,
        }
    }
}

impl fmt::Display for Gwei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn de_gwei<'de, D>(deserializer: D) -> Result<Option<Gwei>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Gwei::from_json))
}

/// Only runs when the key is present, so a `null` or garbage value becomes
/// `Some(None)` while a missing key stays `None` through `#[serde(default)]`.
fn de_tier<'de, D>(deserializer: D) -> Result<Option<Option<Gwei>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(Some(Gwei::from_json(&raw)))
}

/// Envelope returned by the `gastracker/gasoracle` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GasOracleResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl GasOracleResponse {
    /// The tier prices, if `result` is an object. Etherscan puts an error string
    /// in `result` when it rejects a request.
    pub fn into_result(self) -> Option<GasOracleResult> {
        match self.result {
            Some(value @ Value::Object(_)) => match serde_json::from_value(value) {
                Ok(prices) => Some(prices),
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed gas oracle result");
                    None
                }
            },
            _ => None,
        }
    }
}

/// Tier prices from one oracle answer.
///
/// Outer `None`: the key was absent. `Some(None)`: present but null or not a
/// valid price. `Some(Some(_))`: a usable price.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GasOracleResult {
    #[serde(rename = "SafeGasPrice", default, deserialize_with = "de_tier")]
    pub safe_gas_price: Option<Option<Gwei>>,
    #[serde(rename = "ProposeGasPrice", default, deserialize_with = "de_tier")]
    pub propose_gas_price: Option<Option<Gwei>>,
    #[serde(rename = "FastGasPrice", default, deserialize_with = "de_tier")]
    pub fast_gas_price: Option<Option<Gwei>>,

    // Informational only, never rendered.
    #[serde(rename = "LastBlock", default)]
    pub last_block: Option<Value>,
    #[serde(rename = "suggestBaseFee", default, deserialize_with = "de_gwei")]
    pub suggest_base_fee: Option<Gwei>,
    #[serde(rename = "gasUsedRatio", default)]
    pub gas_used_ratio: Option<Value>,
}

/// Current tier prices. `None` until a valid value has been fetched, or after
/// the oracle sent an invalid one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GasPriceSnapshot {
    pub slow: Option<Gwei>,
    pub standard: Option<Gwei>,
    pub fast: Option<Gwei>,
}

impl GasPriceSnapshot {
    /// Applies one oracle result and returns whether anything changed.
    ///
    /// Slow and standard are only taken when both keys are present and their
    /// values differ; an equal pair is treated as unexpected data and dropped.
    /// Fast is applied on its own whenever its key is present. A present but
    /// invalid value resets the tier to unknown.
    pub fn apply(&mut self, prices: &GasOracleResult) -> bool {
        let before = *self;

        match (prices.safe_gas_price, prices.propose_gas_price) {
            (Some(safe), Some(propose)) if safe != propose => {
                self.slow = safe;
                self.standard = propose;
            }
            _ => {
                tracing::warn!(
                    safe = ?prices.safe_gas_price,
                    propose = ?prices.propose_gas_price,
                    fast = ?prices.fast_gas_price,
                    "Unexpected gas price values from oracle"
                );
            }
        }

        if let Some(fast) = prices.fast_gas_price {
            self.fast = fast;
        }

        *self != before
    }

    pub fn is_empty(&self) -> bool {
        self.slow.is_none() && self.standard.is_none() && self.fast.is_none()
    }
}
