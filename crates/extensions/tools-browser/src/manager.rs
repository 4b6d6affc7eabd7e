//! Headless Chrome lifecycle.
//!
//! Reuses a Chrome already listening on the debug port, or launches a
//! headless one with a throwaway profile. Whatever this manager launched, it
//! also shuts down.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{info, warn};

use pagelens_config::BrowserConfig;

use crate::cdp::{CdpClient, CdpError};

/// Desktop user agent presented to sites.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How often, and how many times, to probe a freshly launched Chrome.
const STARTUP_POLL_INTERVAL: Duration = Duration::from_millis(200);
const STARTUP_POLL_ATTEMPTS: u32 = 30;
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Browser manager errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Chrome not found. Please install Google Chrome or Chromium.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Page load timed out: {0}")]
    Timeout(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Action failed: {0}")]
    ActionFailed(String),
}

impl BrowserError {
    /// The browser itself could not be reached or started.
    pub fn is_driver_failure(&self) -> bool {
        matches!(
            self,
            BrowserError::ChromeNotFound
                | BrowserError::LaunchFailed(_)
                | BrowserError::ConnectionFailed(_)
                | BrowserError::NotConnected
        )
    }
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::ChromeNotAvailable(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::Timeout(msg) => BrowserError::Timeout(msg),
            CdpError::SessionClosed => BrowserError::NotConnected,
            CdpError::JavaScript(msg) => BrowserError::ActionFailed(format!("JS error: {}", msg)),
            _ => BrowserError::ActionFailed(e.to_string()),
        }
    }
}

/// Browser configuration.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    pub headless: bool,
    /// Bound on navigation plus document load.
    pub page_load_timeout: Duration,
    /// Fixed wait after load so client-side rendering can finish.
    pub settle: Duration,
    /// Chrome executable; well-known install locations are searched when unset.
    pub chrome_path: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
            page_load_timeout: Duration::from_secs(30),
            settle: Duration::from_secs(5),
            chrome_path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&BrowserConfig> for BrowserManagerConfig {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            debug_port: config.debug_port,
            headless: config.headless,
            page_load_timeout: Duration::from_secs(config.page_load_timeout_secs),
            settle: Duration::from_secs(config.settle_secs),
            chrome_path: config.chrome_path.clone(),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl BrowserManagerConfig {
    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    /// Command-line flags for a Chrome launched by us.
    pub fn chrome_args(&self, profile_dir: &Path) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debug_port),
            format!("--user-data-dir={}", profile_dir.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            format!("--user-agent={}", self.user_agent),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args
    }
}

/// Owns one browser connection and, if it started one, the Chrome process.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: Option<CdpClient>,
    chrome_process: Option<Child>,
    profile_dir: Option<TempDir>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: None,
            chrome_process: None,
            profile_dir: None,
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Whether this manager started the Chrome process it talks to.
    pub fn launched_chrome(&self) -> bool {
        self.chrome_process.is_some()
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Check if Chrome is already running on the debug port.
    async fn is_chrome_running(&self) -> bool {
        let Ok(http) = reqwest::Client::builder().timeout(DISCOVERY_TIMEOUT).build() else {
            return false;
        };
        http.get(format!("{}/json/version", self.config.endpoint()))
            .send()
            .await
            .is_ok_and(|resp| resp.status().is_success())
    }

    /// Launch Chrome with remote debugging enabled and a temporary profile.
    async fn launch_chrome(&mut self) -> Result<Child, BrowserError> {
        let chrome_path = match &self.config.chrome_path {
            Some(path) => path.clone(),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?,
        };

        let profile_dir = tempfile::Builder::new()
            .prefix("pagelens-chrome-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed(format!("profile directory: {}", e)))?;

        info!(
            "Launching Chrome {} with profile at {}",
            chrome_path.display(),
            profile_dir.path().display()
        );

        let child = Command::new(&chrome_path)
            .args(self.config.chrome_args(profile_dir.path()))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        self.profile_dir = Some(profile_dir);
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary.
    pub async fn connect(&mut self) -> Result<(), BrowserError> {
        if self.client.is_some() {
            return Ok(());
        }

        if self.is_chrome_running().await {
            info!("Chrome already running on port {}", self.config.debug_port);
        } else {
            info!(
                "Chrome not running on port {}, launching...",
                self.config.debug_port
            );

            let child = self.launch_chrome().await?;
            self.chrome_process = Some(child);

            let mut ready = false;
            for _ in 0..STARTUP_POLL_ATTEMPTS {
                tokio::time::sleep(STARTUP_POLL_INTERVAL).await;
                if self.is_chrome_running().await {
                    ready = true;
                    break;
                }
            }

            if !ready {
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        self.client = Some(client);

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    /// Load `url` in a fresh tab, let it settle, and return the document's
    /// outer HTML. The tab is closed whether or not loading succeeded.
    pub async fn fetch_page_html(&self, url: &str) -> Result<String, BrowserError> {
        let client = self.client.as_ref().ok_or(BrowserError::NotConnected)?;
        let page = client.new_page().await?;

        let result = async {
            page.set_user_agent(&self.config.user_agent).await?;
            page.navigate(url, self.config.page_load_timeout).await?;
            tokio::time::sleep(self.config.settle).await;
            page.outer_html().await
        }
        .await;

        if let Err(e) = client.close_page(page.target_id()).await {
            warn!("Failed to close page {}: {}", page.target_id(), e);
        }

        let html = result?;
        info!("Retrieved page source for {}, length: {}", url, html.len());
        Ok(html)
    }

    /// Drop the connection and stop Chrome if we launched it.
    pub async fn shutdown(&mut self) {
        self.client = None;

        if let Some(mut child) = self.chrome_process.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                warn!("Failed to kill Chrome: {}", e);
            }
        }

        if let Some(dir) = self.profile_dir.take() {
            if let Err(e) = dir.close() {
                warn!("Failed to remove Chrome profile: {}", e);
            }
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
