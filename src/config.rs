use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{BuildOptions, InvalidRecordPolicy, Provider, SectionOrders};
use crate::debounce::{PREVIEW_DELAY_MS, PREVIEW_EXIT_MS, SEARCH_DEBOUNCE_MS};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub invalid_records: InvalidRecordPolicy,
    #[serde(default = "default_text_mode")]
    pub text_mode: bool,
    #[serde(default = "default_allow_native")]
    pub allow_native: bool,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_preview_delay_ms")]
    pub preview_delay_ms: u64,
    #[serde(default = "default_preview_exit_ms")]
    pub preview_exit_ms: u64,
    #[serde(default = "default_picker_colors")]
    pub picker_colors: Vec<String>,
    #[serde(default)]
    pub section_orders: SectionOrders,
}

fn default_provider() -> String {
    Provider::Twitter.as_str().to_string()
}
fn default_text_mode() -> bool {
    true
}
fn default_allow_native() -> bool {
    false
}
fn default_search_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}
fn default_preview_delay_ms() -> u64 {
    PREVIEW_DELAY_MS
}
fn default_preview_exit_ms() -> u64 {
    PREVIEW_EXIT_MS
}
fn default_picker_colors() -> Vec<String> {
    ["green", "pink", "yellow", "blue", "gray"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            invalid_records: InvalidRecordPolicy::default(),
            text_mode: default_text_mode(),
            allow_native: default_allow_native(),
            search_debounce_ms: default_search_debounce_ms(),
            preview_delay_ms: default_preview_delay_ms(),
            preview_exit_ms: default_preview_exit_ms(),
            picker_colors: default_picker_colors(),
            section_orders: SectionOrders::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_provider();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("emojipick")
            .join("config.toml")
    }

    /// Reset an unrecognized provider to the default.
    pub fn normalize_provider(&mut self) {
        if self.provider.parse::<Provider>().is_err() {
            warn!(provider = %self.provider, "unknown emoji provider, using default");
            self.provider = default_provider();
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider.parse().unwrap_or(Provider::Twitter)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            provider: Some(self.provider()),
            invalid_records: self.invalid_records,
        }
    }
}
