//! This module defines the `CyclingText` component, the terminal-style loading
//! label shown inside a busy [`Button`](super::button::Button).
//!
//! The component renders the base text followed by a growing run of periods,
//! advancing one dot per `speed` milliseconds and wrapping after `max_dots`.
//! All timing lives in [`loading_text::CyclingTextIndicator`]; this module only
//! connects it to Leptos: props resolve into a memoized config, frames land
//! in a signal, and the owner's cleanup stops the timer.

use leptos::prelude::*;
use loading_text::{Accessibility, CyclingTextIndicator, IndicatorOptions, render_frame};

use super::scheduler::BrowserScheduler;

/// Renders cycling dot-suffixed text with status and polite live-region
/// semantics.
///
/// Out-of-range props are coerced rather than rejected: empty `text` falls back
/// to `"Loading"`, a non-positive `speed` to 500ms and a negative `max_dots` to
/// static text. Re-rendering with the same props never restarts the cycle.
#[component]
pub fn CyclingText(
    /// Text shown with zero trailing dots.
    #[prop(into, optional)]
    text: MaybeProp<String>,
    /// Milliseconds per frame.
    #[prop(into, optional)]
    speed: MaybeProp<i32>,
    /// Highest dot count before the cycle wraps.
    #[prop(into, optional)]
    max_dots: MaybeProp<i32>,
    /// Accessible name override, used verbatim instead of the frame text.
    #[prop(into, optional)]
    extra_label: MaybeProp<String>,
) -> impl IntoView {
    let options = Memo::new(move |_| IndicatorOptions {
        text: text.get(),
        speed: speed.get().map(i64::from),
        max_dots: max_dots.get().map(i64::from),
        extra_label: extra_label.get(),
    });
    // Memo equality keeps identical re-renders away from the indicator.
    let config = Memo::new(move |_| options.with(IndicatorOptions::resolve));

    let frame = RwSignal::new(config.with_untracked(|config| render_frame(config.base_text(), 0)));

    let indicator = StoredValue::new_local(CyclingTextIndicator::new(BrowserScheduler));
    indicator.update_value(|indicator| {
        indicator.on_frame(move |current| {
            _ = frame.try_set(current.to_owned());
        });
    });

    // Effects only run in the browser, so SSR output is always frame 0.
    Effect::new(move |_| {
        let config = config.get();
        indicator.update_value(|indicator| indicator.configure(config));
    });

    on_cleanup(move || {
        _ = indicator.try_update_value(|indicator| indicator.deactivate());
    });

    let a11y = Memo::new(move |_| {
        frame.with(|current| options.with(|options| Accessibility::for_frame(current, options.extra_label())))
    });

    view! {
        <span
            role=move || a11y.with(|a11y| a11y.role)
            aria-live=move || a11y.with(|a11y| a11y.live)
            aria-label=move || a11y.with(|a11y| a11y.label.clone())
            class="font-mono whitespace-pre"
        >
            {move || frame.get()}
        </span>
    }
}
