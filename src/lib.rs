mod api;
mod app;
mod assistant;
mod blocks;
mod components;
mod drafts;
mod editor;
mod i18n;
mod leveling;
mod models;
mod notes;
mod pages;
mod selection;
mod state;
mod storage;
mod tasks;
mod toolbar;
mod util;

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the start function for normal builds; wasm-bindgen-test brings its own.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
