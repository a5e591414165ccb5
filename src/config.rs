//! Client configuration.
//!
//! The API lives on the same origin by default. A build can point elsewhere
//! through `FINANCE_API_BASE`, and a browser can override that with the
//! `finance_api_base` localStorage key.

use serde::{Deserialize, Serialize};

pub const MOBILE_BREAKPOINT_PX: u32 = 768;
pub const BANNER_TIMEOUT_MS: u32 = 5_000;
pub const RESIZE_DEBOUNCE_MS: u32 = 200;
pub const FIRST_YEAR: i32 = 2020;
pub const RECENT_ROWS: usize = 10;

const API_BASE_KEY: &str = "finance_api_base";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: normalize_base(option_env!("FINANCE_API_BASE").unwrap_or("")),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        match read_storage(API_BASE_KEY) {
            Some(base) if !base.trim().is_empty() => Self {
                api_base: normalize_base(&base),
            },
            _ => Self::default(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub(crate) fn read_storage(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

pub(crate) fn write_storage(key: &str, value: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base("  "), "");
    }

    #[test]
    fn url_joins_base_and_path() {
        let config = AppConfig { api_base: "http://api.local".into() };
        assert_eq!(config.url("/income/"), "http://api.local/income/");
        let same_origin = AppConfig { api_base: String::new() };
        assert_eq!(same_origin.url("/income/"), "/income/");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn api_base_survives_a_reload() {
        write_storage(API_BASE_KEY, "http://example.test/");
        assert_eq!(AppConfig::load().api_base, "http://example.test");
        write_storage(API_BASE_KEY, "");
    }
}
