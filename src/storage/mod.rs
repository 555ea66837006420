use crate::models::AppData;
use leptos::logging::warn;
use serde::{Deserialize, Serialize};

pub(crate) const APP_STATE_KEY: &str = "mindnotes_state";
pub(crate) const LANGUAGE_KEY: &str = "mindnotes_language";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("ignoring unreadable localStorage entry {key}: {e}");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, &json).is_err() {
                warn!("localStorage rejected write for {key} ({} bytes)", json.len());
            }
        }
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub(crate) fn save_string_to_storage(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub(crate) fn load_app_data() -> AppData {
    load_json_from_storage::<AppData>(APP_STATE_KEY).unwrap_or_default()
}

pub(crate) fn save_app_data(data: &AppData) {
    save_json_to_storage(APP_STATE_KEY, data);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::{ActiveTab, UserProgress};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_app_data_roundtrip() {
        remove_from_storage(APP_STATE_KEY);
        assert_eq!(load_app_data(), AppData::default());

        let data = AppData {
            active_tab: ActiveTab::Chat,
            user_progress: UserProgress {
                level: 2,
                experience: 230,
                experience_to_next: 70,
                completed_task_lists: 4,
            },
            ..Default::default()
        };
        save_app_data(&data);
        assert_eq!(load_app_data(), data);

        remove_from_storage(APP_STATE_KEY);
    }

    #[wasm_bindgen_test]
    fn test_corrupt_app_data_falls_back_to_default() {
        save_string_to_storage(APP_STATE_KEY, "{not json");
        assert_eq!(load_app_data(), AppData::default());
        remove_from_storage(APP_STATE_KEY);
    }
}
