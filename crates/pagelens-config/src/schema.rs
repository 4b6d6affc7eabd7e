//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Content analyzer and LLM endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Total attempts per query, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff delay; attempt `n` waits `retry_delay_secs * 2^n`.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Content longer than this many characters is truncated.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Environment variable that holds the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            max_content_chars: default_max_content_chars(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            request_timeout_secs: default_request_timeout_secs(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_max_content_chars() -> usize {
    700_000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_top_p() -> f32 {
    0.95
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Headless browser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Fixed wait after navigation so client-side rendering can finish.
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,

    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Chrome executable; discovered from well-known locations when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: default_headless(),
            settle_secs: default_settle_secs(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            chrome_path: None,
            user_agent: None,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_headless() -> bool {
    true
}

fn default_settle_secs() -> u64 {
    5
}

fn default_page_load_timeout_secs() -> u64 {
    30
}

/// Interactive session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Characters shown by the content preview.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Prior messages included in each prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
            history_window: default_history_window(),
        }
    }
}

fn default_preview_chars() -> usize {
    5000
}

fn default_history_window() -> usize {
    4
}

/// Directory for PageLens state such as log files.
pub fn pagelens_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pagelens")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
