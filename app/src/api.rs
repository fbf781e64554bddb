//! Server functions backing the showcase page.
//!
//! The showcase needs real asynchronous work to put its buttons into the busy
//! state. `simulate_operation` provides it by sleeping on the server for a
//! bounded amount of time.

use leptos::prelude::{ServerFnError, server};

#[cfg(feature = "ssr")]
use std::time::Duration;

/// Longest operation the showcase may request.
pub const MAX_SIMULATED_MS: u64 = 10_000;

/// Clamps a requested operation length to [`MAX_SIMULATED_MS`].
#[must_use]
pub const fn clamp_duration(duration_ms: u64) -> u64 {
    if duration_ms > MAX_SIMULATED_MS {
        MAX_SIMULATED_MS
    } else {
        duration_ms
    }
}

/// Sleeps for the requested number of milliseconds (clamped) and returns how
/// long it actually slept.
///
/// # Returns
///
/// The slept duration in milliseconds, or a `ServerFnError` if the request
/// could not be processed.
#[server(endpoint = "/simulate")]
pub async fn simulate_operation(duration_ms: u64) -> Result<u64, ServerFnError> {
    let slept = clamp_duration(duration_ms);
    if slept != duration_ms {
        tracing::warn!(requested = duration_ms, slept, "Simulated operation clamped");
    }

    tokio::time::sleep(Duration::from_millis(slept)).await;
    tracing::debug!(slept, "Simulated operation finished");
    Ok(slept)
}
