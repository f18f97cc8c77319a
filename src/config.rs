use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_url: String,
    pub output_folder: String,
    pub user_agent: String,
    pub page_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub request_delay_ms: u64,
    pub fallback: FallbackConfig,
}

/// Conventional names tried when a page yields no images at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub base_names: Vec<String>,
    pub extensions: Vec<String>,
    pub prefixes: Vec<String>,
    /// Also guess when the page itself could not be fetched.
    pub on_page_error: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn for_site(target_url: impl Into<String>, output_folder: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            output_folder: output_folder.into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_url: "https://luckybear.guru/".to_string(),
            output_folder: "images".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout_secs: 10,
            probe_timeout_secs: 5,
            request_delay_ms: 500,
            fallback: FallbackConfig::default(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        FallbackConfig {
            base_names: ["logo", "main-logo", "footer-logo"].map(String::from).to_vec(),
            extensions: ["png", "jpg", "svg", "webp"].map(String::from).to_vec(),
            prefixes: ["images/", "assets/"].map(String::from).to_vec(),
            on_page_error: false,
        }
    }
}
