use crate::models::{GasPriceSnapshot, Gwei};
use serde::Serialize;
use std::fmt;

pub const GAS_ICON: &str = "⛽";
pub const LABEL: &str = "ETH Gas: ";
pub const LOADING: &str = "Loading...";

/// One frame of the widget: icon, label, standard price and optional hover text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGasPrice {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl RenderedGasPrice {
    pub fn from_snapshot(snapshot: &GasPriceSnapshot, show_tooltip: bool) -> Self {
        let value = match snapshot.standard {
            Some(standard) => format!("{} Gwei", standard),
            None => LOADING.to_string(),
        };

        let tooltip = show_tooltip.then(|| {
            format!(
                "Slow: {} Gwei | Medium: {} Gwei | Fast: {} Gwei",
                tier(snapshot.slow),
                tier(snapshot.standard),
                tier(snapshot.fast),
            )
        });

        Self {
            icon: GAS_ICON,
            label: LABEL,
            value,
            tooltip,
        }
    }
}

fn tier(price: Option<Gwei>) -> String {
    price.map_or_else(|| LOADING.to_string(), |p| p.to_string())
}

impl fmt::Display for RenderedGasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.icon, self.label, self.value)
    }
}
