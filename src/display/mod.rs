//! The polling gas price widget.
//!
//! [`GasPriceDisplay::mount`] starts a timer task that fetches from a
//! [`GasOracle`] right away and then once per refresh interval. Each tick runs
//! as its own task, so a slow request never holds up the next tick. Results land
//! in a `watch` channel that renderers subscribe to.

pub mod render;

pub use render::{RenderedGasPrice, GAS_ICON, LABEL, LOADING};

use crate::{error::GasTickerError, models::GasPriceSnapshot, services::GasOracle};
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(60_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_tooltip: bool,
    pub refresh_interval: Duration,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_tooltip: false,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl DisplayOptions {
    pub fn with_tooltip(mut self, show_tooltip: bool) -> Self {
        self.show_tooltip = show_tooltip;
        self
    }

    pub fn with_refresh_interval_ms(mut self, millis: u64) -> Self {
        self.refresh_interval = Duration::from_millis(millis);
        self
    }

    pub fn validate(&self) -> Result<(), GasTickerError> {
        if self.refresh_interval.is_zero() {
            return Err(GasTickerError::Config(
                "refresh interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// A mounted widget. Polling stops on [`unmount`](Self::unmount) or drop.
pub struct GasPriceDisplay {
    state: Arc<watch::Sender<GasPriceSnapshot>>,
    options: DisplayOptions,
    cancel: CancellationToken,
    timer: Option<JoinHandle<()>>,
}

impl GasPriceDisplay {
    /// Starts polling. Must be called from within a Tokio runtime.
    pub fn mount(
        oracle: Arc<dyn GasOracle>,
        options: DisplayOptions,
    ) -> Result<Self, GasTickerError> {
        options.validate()?;

        let (state, _) = watch::channel(GasPriceSnapshot::default());
        let state = Arc::new(state);
        let cancel = CancellationToken::new();

        let timer = tokio::spawn(run_timer(
            oracle,
            state.clone(),
            cancel.clone(),
            options.refresh_interval,
        ));

        tracing::info!(
            refresh_interval_ms = options.refresh_interval.as_millis() as u64,
            show_tooltip = options.show_tooltip,
            "Gas price display mounted"
        );

        Ok(Self {
            state,
            options,
            cancel,
            timer: Some(timer),
        })
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn snapshot(&self) -> GasPriceSnapshot {
        *self.state.borrow()
    }

    pub fn render(&self) -> RenderedGasPrice {
        RenderedGasPrice::from_snapshot(&self.state.borrow(), self.options.show_tooltip)
    }

    /// Receiver notified each time a tick changes the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GasPriceSnapshot> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();

        // Wait out any update holding the lock; later ones see the cancelled token.
        self.state.send_if_modified(|_| false);

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        tracing::info!("Gas price display unmounted");
    }
}

impl Drop for GasPriceDisplay {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn run_timer(
    oracle: Arc<dyn GasOracle>,
    state: Arc<watch::Sender<GasPriceSnapshot>>,
    cancel: CancellationToken,
    period: Duration,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let oracle = oracle.clone();
                let state = state.clone();
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    run_fetch_cycle(oracle.as_ref(), &state, &cancel).await;
                });
            }
        }
    }

    tracing::debug!("Gas price timer stopped");
}

/// One poll: fetch, validate, apply. Returns whether the snapshot changed.
///
/// Failures are logged and leave the snapshot as it was.
pub async fn run_fetch_cycle(
    oracle: &dyn GasOracle,
    state: &watch::Sender<GasPriceSnapshot>,
    cancel: &CancellationToken,
) -> bool {
    let prices = match oracle.fetch_gas_prices().await {
        Ok(Some(prices)) => prices,
        Ok(None) => {
            tracing::warn!("Gas oracle returned no result");
            return false;
        }
        Err(e) => {
            tracing::error!(error = %e, error_code = e.code(), "Error fetching gas prices");
            return false;
        }
    };

    let changed = state.send_if_modified(|snapshot| {
        if cancel.is_cancelled() {
            return false;
        }
        snapshot.apply(&prices)
    });

    if cancel.is_cancelled() {
        tracing::debug!("Dropped gas price result that arrived after unmount");
    } else {
        tracing::debug!(changed, "Gas price tick applied");
    }

    changed
}
