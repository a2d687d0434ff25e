mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("Logger already initialised: {}", err).into());
    }
    log::info!("Starting Fibook frontend (wasm)");

    // Warm the runtime config; window.__FIBOOK_ENV (env.js) takes precedence.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
    });

    router::mount_app();
}
