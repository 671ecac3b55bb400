use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Fire `on_tick` every `period` until cancelled or until `on_tick` returns
/// false. The first tick lands one full period after start. Returns the
/// number of ticks delivered.
pub async fn run_ticker<F>(period: Duration, cancel: CancellationToken, mut on_tick: F) -> u64
where
    F: FnMut() -> bool,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval() completes its first tick immediately.
    ticker.tick().await;

    let mut delivered = 0;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if !on_tick() {
                    break;
                }
                delivered += 1;
            }
        }
    }
    delivered
}
