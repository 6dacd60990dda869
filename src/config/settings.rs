use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub backend: BackendSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Fallback anti-forgery token; the page-supplied token wins.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_currency_symbol() -> String {
    "S/".to_string()
}
