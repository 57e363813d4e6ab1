use anyhow::Result;
use gas_ticker::{config::Config, display::GasPriceDisplay, services::EtherscanOracle};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting gas-ticker v{}", env!("CARGO_PKG_VERSION"));

    let oracle = Arc::new(EtherscanOracle::new(
        config.oracle_url.clone(),
        config.request_timeout(),
    )?);
    tracing::info!("Polling gas oracle at {}", oracle.url());

    let display = GasPriceDisplay::mount(oracle, config.display_options())?;
    let mut updates = display.subscribe();

    print_frame(&display);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print_frame(&display);
            }
        }
    }

    display.unmount();
    Ok(())
}

fn print_frame(display: &GasPriceDisplay) {
    let frame = display.render();
    println!("{}", frame);
    if let Some(tooltip) = &frame.tooltip {
        println!("    {}", tooltip);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully...");
}
