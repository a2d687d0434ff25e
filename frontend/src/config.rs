use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const API_BASE_URL_ENV: &str = "FIBOOK_API_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(object: &str, keys: [&str; 2]) -> Option<String> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &object.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    keys.iter()
        .filter_map(|key| js_sys::Reflect::get(&obj, &(*key).into()).ok())
        .find(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.as_string())
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<String> {
    // window.__FIBOOK_ENV (env.js) wins over window.__FIBOOK_CONFIG.
    read_global("__FIBOOK_ENV", ["API_BASE_URL", "api_base_url"])
        .or_else(|| read_global("__FIBOOK_CONFIG", ["api_base_url", "API_BASE_URL"]))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<String> {
    std::env::var(API_BASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get(runtime_config_url()?).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_config_url() -> Option<String> {
    // reqwest needs an absolute URL in the browser.
    let origin = web_sys::window()?.location().origin().ok()?;
    Some(format!("{}/config.json", origin))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache_base_url(value: &str) -> String {
    let value = value.trim_end_matches('/').to_string();
    API_BASE_URL.get_or_init(|| value).clone()
}

/// Resolves the API base URL once and caches it for the process lifetime.
pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(&existing);
    }
    if let Some(url) = fetch_runtime_config().await.and_then(|cfg| cfg.api_base_url) {
        return cache_base_url(&url);
    }
    log::info!("No runtime config found, using {}", DEFAULT_API_BASE_URL);
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!("API base URL: {}", base);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_parses_optional_base_url() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url": "https://api.example.com/v1"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://api.example.com/v1"));
        let empty: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert!(empty.api_base_url.is_none());
    }

    #[tokio::test]
    async fn base_url_is_resolved_once() {
        let first = await_api_base_url().await;
        let second = await_api_base_url().await;
        assert_eq!(first, second);
        assert!(!first.ends_with('/'));
    }
}
