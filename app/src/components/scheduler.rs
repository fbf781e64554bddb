//! Browser-backed [`Scheduler`] for the loading-text state machines.
//!
//! Wraps Leptos' `set_interval_with_handle` / `set_timeout_with_handle`. A
//! timer the browser refuses to create is logged and treated as never
//! scheduled, which leaves the indicator on its current frame. Durations are
//! clamped to what `setTimeout` can represent.

use core::cell::RefCell;
use core::time::Duration;

use leptos::logging;
use leptos::prelude::{IntervalHandle, TimeoutHandle, set_interval_with_handle, set_timeout_with_handle};
use loading_text::{Scheduler, TimerHandle};

/// Largest delay `setTimeout` and `setInterval` accept (a signed 32-bit
/// millisecond count).
pub const MAX_BROWSER_DELAY: Duration = Duration::from_millis(i32::MAX as u64);

/// Clamps `duration` to [`MAX_BROWSER_DELAY`].
#[must_use]
pub fn browser_duration(duration: Duration) -> Duration {
    duration.min(MAX_BROWSER_DELAY)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

enum BrowserTimer {
    Interval(Option<IntervalHandle>),
    Timeout(Option<TimeoutHandle>),
}

impl TimerHandle for BrowserTimer {
    fn cancel(&mut self) {
        match self {
            Self::Interval(handle) => {
                if let Some(handle) = handle.take() {
                    handle.clear();
                }
            }
            Self::Timeout(handle) => {
                if let Some(handle) = handle.take() {
                    handle.clear();
                }
            }
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        let tick = RefCell::new(tick);
        let handle = set_interval_with_handle(move || (&mut *tick.borrow_mut())(), browser_duration(period))
            .map_err(|err| logging::warn!("failed to start loading-text interval: {err:?}"))
            .ok();
        Box::new(BrowserTimer::Interval(handle))
    }

    fn once(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
        let handle = set_timeout_with_handle(fire, browser_duration(delay))
            .map_err(|err| logging::warn!("failed to schedule busy reveal: {err:?}"))
            .ok();
        Box::new(BrowserTimer::Timeout(handle))
    }
}
