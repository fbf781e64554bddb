//! WebAssembly entry point for the loading-button showcase.
//!
//! Hydrates the server-rendered page so the buttons' busy delays and cycling
//! loading text run in the browser.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the showcase on the client.
///
/// Installs `console_log` and `console_error_panic_hook` first so timer and
/// hydration problems surface in the browser console.
pub fn hydrate() {
    use app::component;
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::hydrate_body(component);
}
