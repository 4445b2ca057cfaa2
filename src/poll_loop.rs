// Fixed-interval sync loop: token -> build -> call -> interpret

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::api_client::TradingApi;
use crate::error::CycleError;
use crate::inventory_request::{build_request, ItemTarget, REVISE_INVENTORY_STATUS};
use crate::inventory_response::{interpret, InventoryUpdateResult};
use crate::token_cache::TokenCache;

pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub struct PollLoop<A: TradingApi> {
    token_cache: TokenCache,
    api: A,
    items: Vec<ItemTarget>,
    poll_interval: Duration,
    cycles_run: u64,
}

impl<A: TradingApi> PollLoop<A> {
    // A zero interval is raised to MIN_POLL_INTERVAL
    pub fn new(
        token_cache: TokenCache,
        api: A,
        items: Vec<ItemTarget>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            token_cache,
            api,
            items,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            cycles_run: 0,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }

    // One full cycle. Ok(None) means the response could not be interpreted,
    // which is logged but does not fail the cycle.
    pub async fn run_cycle(&mut self) -> Result<Option<InventoryUpdateResult>, CycleError> {
        let token = self.token_cache.access_token().await?;
        let body = build_request(&self.items)?;
        let response = self
            .api
            .call(REVISE_INVENTORY_STATUS, body, &token)
            .await?;
        Ok(interpret(&response))
    }

    // Run a cycle and log its outcome; never fails
    pub async fn tick(&mut self) -> Option<InventoryUpdateResult> {
        self.cycles_run += 1;
        let cycle = self.cycles_run;
        info!(cycle, items = self.items.len(), "[SYNC] Cycle started");

        let outcome = match self.run_cycle().await {
            Ok(result) => result,
            Err(e) => {
                error!(cycle, error = %e, "[ERROR] Cycle aborted");
                None
            }
        };

        info!(cycle, "[SYNC] Cycle finished");
        outcome
    }

    // Run until the process is killed
    pub async fn run(mut self) {
        self.run_cycles(None).await;
    }

    // Each cycle is awaited before the next tick is taken, so cycles never overlap.
    // Ticks missed while a slow cycle was running are skipped, not replayed.
    pub async fn run_cycles(&mut self, limit: Option<u64>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut completed = 0u64;
        while limit.map_or(true, |max| completed < max) {
            ticker.tick().await;
            self.tick().await;
            completed += 1;
        }
    }
}
