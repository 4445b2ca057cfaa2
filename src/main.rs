use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ebay_inventory_sync::{ItemTarget, PollLoop, SyncConfig, TokenCache, TradingClient};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "[FATAL] Invalid configuration");
            std::process::exit(1);
        }
    };

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout {
        http = http.timeout(timeout);
    }
    let http = http.build().context("failed to build HTTP client")?;

    info!(
        environment = %config.environment,
        items = config.item_ids.len(),
        quantity = config.target_quantity,
        interval_ms = config.poll_interval.as_millis() as u64,
        "[SYNC] Starting inventory sync"
    );

    let token_cache = TokenCache::new(
        http.clone(),
        config.token_url(),
        config.credentials.clone(),
    );
    let client = TradingClient::new(http, config.trading_url(), config.site_id);
    let items = ItemTarget::from_ids(config.item_ids.iter().cloned(), config.target_quantity);

    PollLoop::new(token_cache, client, items, config.poll_interval)
        .run()
        .await;

    Ok(())
}
