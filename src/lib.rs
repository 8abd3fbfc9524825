mod api;
mod app;
mod components;
mod config;
mod error;
mod forms;
mod models;
mod notify;
mod observer;
mod pages;
mod repo;
mod session;
mod state;
mod storage;
mod store;
mod sync;
mod util;
mod validation;

use crate::app::App;
use crate::config::AppConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;


// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    // A second init (hot reload) is harmless; keep the first logger.
    let _ = console_log::init_with_level(config.log_level);

    let missing = config.backend.missing_keys();
    if !missing.is_empty() {
        log::warn!(
            "backend config incomplete, missing: {}; set window.ENV or QUIRKITOPIA_* at build time",
            missing.join(", ")
        );
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
