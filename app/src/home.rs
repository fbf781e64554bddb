//! This module defines the `home` component, the showcase page for the loading
//! button.
//!
//! Each card pairs a `Button` with a server `Action` that sleeps for a fixed
//! time, so every configuration of the cycling text can be watched live:
//! defaults, custom text and dot counts, a fast interval, static text, an
//! explicit accessible label, and the suppression delay with fast operations.

use leptos::prelude::*;
use leptos_meta::{Title, TitleProps};

use crate::{
    api::simulate_operation,
    components::button::{Button, ButtonVariant},
};

/// A simulated operation: its pending flag, a trigger, and a status line.
struct Operation {
    pending: Signal<bool>,
    run: Callback<()>,
    status: Signal<String>,
}

fn operation(duration_ms: u64) -> Operation {
    let action = Action::new(move |_: &()| async move { simulate_operation(duration_ms).await });
    let value = action.value();

    Operation {
        pending: action.pending().into(),
        run: Callback::new(move |()| {
            let _ = action.dispatch(());
        }),
        status: Signal::derive(move || match value.get() {
            Some(Ok(slept)) => format!("Finished after {slept}ms"),
            Some(Err(err)) => {
                leptos::logging::error!("Simulated operation failed: {err:?}");
                "Operation failed".to_owned()
            }
            None => "Idle".to_owned(),
        }),
    }
}

fn card(title: &'static str, description: &'static str, status: Signal<String>, button: AnyView) -> impl IntoView {
    view! {
        <section class="flex flex-col gap-4 p-6 bg-[#2a2a2a]">
            <h2 class="text-xl font-bold text-[#ffef5c]">{title}</h2>
            <p class="text-gray-300">{description}</p>
            {button}
            <p class="text-sm italic text-gray-400">{move || status.get()}</p>
        </section>
    }
}

/// Renders the showcase page.
pub fn component() -> impl IntoView {
    let save = operation(3_000);
    let payment = operation(4_000);
    let sync = operation(3_000);
    let export = operation(2_500);
    let delete = operation(3_500);
    let quick = operation(400);
    let instant = operation(1_500);

    view! {
        {Title(TitleProps::builder().text("Terminal-style loading button").build())}
        <div class="flex flex-col gap-8">
            <header class="flex flex-col gap-2">
                <h1 class="text-4xl font-extrabold text-[#ffef5c]">"Loading text for buttons"</h1>
                <p class="text-gray-300">
                    "While an operation is pending, the button label is replaced by a status line that grows one dot at a time and wraps."
                </p>
            </header>
            <div class="grid grid-cols-1 gap-6 md:grid-cols-2">
                {card(
                    "Defaults",
                    "\"Loading\", one dot every 500ms, up to four dots.",
                    save.status,
                    view! {
                        <Button busy=save.pending on_click=save.run>"Save changes"</Button>
                    }.into_any(),
                )}
                {card(
                    "Custom text and dot count",
                    "\"Processing\" wrapping after two dots.",
                    payment.status,
                    view! {
                        <Button
                            busy=payment.pending
                            on_click=payment.run
                            variant=ButtonVariant::Secondary
                            loading_text="Processing"
                            loading_max_dots=2
                        >
                            "Pay now"
                        </Button>
                    }.into_any(),
                )}
                {card(
                    "Fast interval",
                    "A new dot every 200ms.",
                    sync.status,
                    view! {
                        <Button busy=sync.pending on_click=sync.run loading_text="Syncing" loading_speed=200>
                            "Sync"
                        </Button>
                    }.into_any(),
                )}
                {card(
                    "Static text",
                    "Zero dots: the label stays \"Please wait\".",
                    export.status,
                    view! {
                        <Button
                            busy=export.pending
                            on_click=export.run
                            variant=ButtonVariant::Ghost
                            loading_text="Please wait"
                            loading_max_dots=0
                        >
                            "Export"
                        </Button>
                    }.into_any(),
                )}
                {card(
                    "Explicit accessible label",
                    "Screen readers hear the label instead of every frame.",
                    delete.status,
                    view! {
                        <Button
                            busy=delete.pending
                            on_click=delete.run
                            variant=ButtonVariant::Danger
                            loading_text="Deleting"
                            loading_label="Deleting project, please wait"
                        >
                            "Delete project"
                        </Button>
                    }.into_any(),
                )}
                {card(
                    "No flicker",
                    "A 400ms operation finishes inside the one second delay, so the label never changes.",
                    quick.status,
                    view! {
                        <Button busy=quick.pending on_click=quick.run>"Quick action"</Button>
                    }.into_any(),
                )}
                {card(
                    "No delay",
                    "The loading text appears immediately.",
                    instant.status,
                    view! {
                        <Button busy=instant.pending on_click=instant.run busy_delay_ms=0>
                            "Refresh"
                        </Button>
                    }.into_any(),
                )}
            </div>
        </div>
    }
}
