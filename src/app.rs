//! Wiring: configuration, page source, provider and analyzer.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use pagelens_config::{Config, ConfigError, ConfigLoader, ConfigValidator};
use pagelens_core::{AnalyzerSettings, ContentAnalyzer, Orchestrator};
use pagelens_protocols::{InitError, PageSource, ScrapeError};
use pagelens_provider_gemini::{GeminiConfig, GeminiProvider};
use pagelens_tools_browser::{BrowserManagerConfig, BrowserScraper};
use pagelens_tools_web::{HtmlCleaner, HttpFetcher, HttpFetcherConfig};

use crate::cli::FetcherKind;

/// Load and validate the configuration file, falling back to defaults when
/// it does not exist.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let path = PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()));
    let config = ConfigLoader::load_or_default(&path)?;
    info!("Configuration loaded from {}", path.display());

    let report = ConfigValidator::validate(&config)?;
    for warning in &report.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if let Some(first) = report.errors.first() {
        for err in &report.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(ConfigError::InvalidValue {
            field: first.path.clone(),
            message: first.message.clone(),
        }
        .into());
    }

    Ok(config)
}

pub(crate) fn build_source(
    kind: FetcherKind,
    config: &Config,
) -> Result<Arc<dyn PageSource>, ScrapeError> {
    let source: Arc<dyn PageSource> = match kind {
        FetcherKind::Browser => Arc::new(BrowserScraper::new(BrowserManagerConfig::from(
            &config.browser,
        ))),
        FetcherKind::Http => {
            let mut http = HttpFetcherConfig {
                timeout_secs: config.browser.page_load_timeout_secs,
                ..Default::default()
            };
            if let Some(ua) = &config.browser.user_agent {
                http.user_agent = ua.clone();
            }
            Arc::new(HttpFetcher::new(http)?)
        }
    };
    info!("Using page source: {}", source.id());
    Ok(source)
}

/// Resolve the endpoint, read the API key and build the analyzer.
pub(crate) async fn build_analyzer(config: &Config) -> Result<ContentAnalyzer, InitError> {
    let gemini = GeminiConfig {
        api_key_env: config.analyzer.api_key_env.clone(),
        base_url: config.analyzer.base_url.clone(),
    };
    let provider = GeminiProvider::connect(&gemini).await?;
    let settings = AnalyzerSettings::from_config(&config.analyzer, &config.session);
    let analyzer = ContentAnalyzer::new(Arc::new(provider), settings);
    info!(
        "Analyzer ready: provider={} model={}",
        analyzer.provider_id(),
        analyzer.settings().model
    );
    Ok(analyzer)
}

pub(crate) fn build_orchestrator(
    source: Arc<dyn PageSource>,
    analyzer: Option<ContentAnalyzer>,
) -> Orchestrator {
    Orchestrator::new(source, Arc::new(HtmlCleaner), analyzer)
}
