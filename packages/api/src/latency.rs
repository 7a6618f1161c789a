//! Simulated network round trip.

use std::time::Duration;

/// Sleep for `delay`, or return immediately when it is zero.
pub async fn simulate(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(delay).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(delay).await;
}
