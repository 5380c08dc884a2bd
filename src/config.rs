//! Application Configuration
//!
//! Compile-time settings plus user form defaults kept in local storage.

use serde::{Deserialize, Serialize};

use crate::billing::{BillType, DEFAULT_GST_RATE};
use crate::storage::{self, KeyValueStore};

/// Fallback backend address when `BILLING_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Storage key for persisted form defaults
const FORM_DEFAULTS_KEY: &str = "form_defaults";

/// Static settings shared by every page
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub low_stock_threshold: i64,
    pub default_gst_rate: f64,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: 10,
            low_stock_threshold: 10,
            default_gst_rate: DEFAULT_GST_RATE,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Build the config from build-time environment variables
    pub fn from_env() -> Self {
        Self::from_values(option_env!("BILLING_API_URL"), option_env!("BILLING_LOG_LEVEL"))
    }

    fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(level) = log_level.and_then(|l| l.parse().ok()) {
            config.log_level = level;
        }
        config
    }
}

/// Last-used values for the billing form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDefaults {
    pub bill_type: BillType,
    pub gst_rate: f64,
    pub labour: f64,
    pub transport: f64,
    pub payment_method: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            bill_type: BillType::Gst,
            gst_rate: DEFAULT_GST_RATE,
            labour: 0.0,
            transport: 0.0,
            payment_method: "cash".to_string(),
        }
    }
}

impl FormDefaults {
    pub fn load(store: &impl KeyValueStore) -> Self {
        storage::load_json(store, FORM_DEFAULTS_KEY).unwrap_or_default()
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        storage::save_json(store, FORM_DEFAULTS_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_values(Some("https://shop.example.com/api/"), Some("debug"));
        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert_eq!(config.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_blank_env_keeps_defaults() {
        let config = AppConfig::from_values(Some("  "), Some("loud"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_form_defaults_roundtrip_and_corruption() {
        let store = MemoryStorage::default();
        assert_eq!(FormDefaults::load(&store), FormDefaults::default());

        let defaults =
            FormDefaults { bill_type: BillType::NonGst, labour: 50.0, ..Default::default() };
        defaults.save(&store);
        assert_eq!(FormDefaults::load(&store), defaults);

        store.set("form_defaults", "{not json");
        assert_eq!(FormDefaults::load(&store), FormDefaults::default());
    }
}
