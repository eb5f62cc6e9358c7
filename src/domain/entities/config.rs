use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub base_url: String,
    pub page_size: usize,
    /// Hard cap on records accumulated per filter session.
    pub max_records: usize,
    pub scroll_threshold_px: u32,
    pub auto_advance_delay_ms: u64,
    pub search_debounce_ms: u64,
    /// Without residual filtering, keep probing an empty view until this
    /// many records are loaded.
    pub low_water_mark: usize,
    pub request_timeout_secs: u64,
    pub cycle_past_total: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 100,
            max_records: 150_000,
            scroll_threshold_px: 200,
            auto_advance_delay_ms: 300,
            search_debounce_ms: 300,
            low_water_mark: 500,
            request_timeout_secs: 15,
            cycle_past_total: true,
        }
    }
}

impl EngineConfig {
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
