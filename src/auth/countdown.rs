use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::trace;

use crate::auth::token_state::TokenStore;

/// Spawn the background task that counts the access-token lifetime down.
pub fn start_expiry_countdown(store: TokenStore) -> JoinHandle<()> {
    tokio::spawn(run_expiry_countdown(store))
}

/// Decrement the countdown by exactly one per elapsed second, forever.
pub async fn run_expiry_countdown(store: TokenStore) {
    let mut ticker = interval(Duration::from_secs(1));
    // late ticks are caught up so the count always matches wall-clock seconds
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let remaining = store.tick().await;
        trace!("access token expires in {} seconds", remaining);
    }
}
