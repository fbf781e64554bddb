//! This module defines the design-system `Button`, the hosting control for the
//! terminal-style loading text.
//!
//! The button owns the busy flag. It blocks activation and reports
//! `aria-busy` as soon as `busy` is set, but only swaps its label for a
//! [`CyclingText`] once the flag has stayed set for `busy_delay_ms`, so fast
//! operations never flicker.

use core::time::Duration;

use leptos::prelude::*;
use loading_text::{DelayedBusy, busy::DEFAULT_BUSY_DELAY_MS};

use super::{cycling_text::CyclingText, scheduler::BrowserScheduler};

/// Visual variants of the button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    /// Tailwind classes for this variant.
    #[must_use]
    pub const fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-[#ffef5c] text-[#1e1e1e] hover:bg-[#ffef5c]/90",
            Self::Secondary => "bg-[#2a2a2a] text-white border border-[#ffef5c] hover:bg-[#333333]",
            Self::Danger => "bg-red-600 text-white hover:bg-red-500",
            Self::Ghost => "bg-transparent text-[#ffef5c] hover:underline",
        }
    }
}

const BASE_CLASSES: &str = "flex justify-center items-center py-3 px-6 min-w-48 text-lg font-semibold transition-colors disabled:cursor-not-allowed disabled:opacity-80";

/// Renders a button that shows cycling loading text while `busy`.
#[component]
pub fn Button(
    /// Normal label, restored as soon as `busy` clears.
    children: ChildrenFn,
    /// Whether the operation this button started is still pending.
    #[prop(into)]
    busy: Signal<bool>,
    #[prop(optional)] variant: ButtonVariant,
    #[prop(into, optional)] disabled: MaybeProp<bool>,
    /// How long `busy` must hold before the loading text appears.
    #[prop(default = DEFAULT_BUSY_DELAY_MS)]
    busy_delay_ms: u64,
    /// The HTML `type` attribute.
    #[prop(default = "button")]
    kind: &'static str,
    #[prop(optional)] on_click: Option<Callback<()>>,
    #[prop(into, optional)] loading_text: MaybeProp<String>,
    #[prop(into, optional)] loading_speed: MaybeProp<i32>,
    #[prop(into, optional)] loading_max_dots: MaybeProp<i32>,
    #[prop(into, optional)] loading_label: MaybeProp<String>,
) -> impl IntoView {
    let revealed = RwSignal::new(false);

    let delayed = StoredValue::new_local(DelayedBusy::new(
        BrowserScheduler,
        Duration::from_millis(busy_delay_ms),
    ));
    delayed.update_value(|delayed| {
        delayed.on_change(move |visible| {
            _ = revealed.try_set(visible);
        });
    });

    Effect::new(move |_| {
        let busy = busy.get();
        delayed.update_value(|delayed| delayed.set_busy(busy));
    });

    on_cleanup(move || {
        _ = delayed.try_update_value(|delayed| delayed.set_busy(false));
    });

    let is_disabled = move || busy.get() || disabled.get().unwrap_or(false);
    let classes = format!("{BASE_CLASSES} {}", variant.classes());

    view! {
        <button
            type=kind
            class=classes
            disabled=is_disabled
            aria-busy=move || busy.get().to_string()
            on:click=move |_| {
                if busy.get_untracked() {
                    return;
                }
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            <Show when=move || revealed.get() fallback=move || children()>
                <CyclingText
                    text=loading_text
                    speed=loading_speed
                    max_dots=loading_max_dots
                    extra_label=loading_label
                />
            </Show>
        </button>
    }
}
