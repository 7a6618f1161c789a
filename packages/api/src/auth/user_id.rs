//! Timestamp-derived user ids for newly registered accounts.

use std::sync::atomic::{AtomicU64, Ordering};

static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Milliseconds since the Unix epoch, bumped past the last id handed out so
/// two registrations in the same millisecond still get distinct ids.
pub fn next_user_id() -> String {
    let now = current_timestamp_millis();
    let mut last = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ISSUED.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(actual) => last = actual,
        }
    }
}

fn current_timestamp_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
