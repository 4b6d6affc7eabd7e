//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_analyzer(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_session(config, &mut result);

        Ok(result)
    }

    fn validate_analyzer(config: &Config, result: &mut ValidationResult) {
        let analyzer = &config.analyzer;

        if analyzer.model.trim().is_empty() {
            result.add_error(ValidationError::new(
                "analyzer.model",
                "Model cannot be empty",
            ));
        }

        if analyzer.max_retries == 0 {
            result.add_error(ValidationError::new(
                "analyzer.max_retries",
                "max_retries must be greater than 0",
            ));
        }

        if analyzer.max_content_chars == 0 {
            result.add_error(ValidationError::new(
                "analyzer.max_content_chars",
                "max_content_chars must be greater than 0",
            ));
        }

        if !(0.0..=2.0).contains(&analyzer.temperature) {
            result.add_error(ValidationError::new(
                "analyzer.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if !(analyzer.top_p > 0.0 && analyzer.top_p <= 1.0) {
            result.add_error(ValidationError::new(
                "analyzer.top_p",
                "top_p must be in (0.0, 1.0]",
            ));
        }

        if analyzer.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "analyzer.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }

        if !analyzer.base_url.starts_with("http://") && !analyzer.base_url.starts_with("https://")
        {
            result.add_error(ValidationError::new(
                "analyzer.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if analyzer.max_retries > 10 {
            result.add_warning(ValidationWarning::new(
                "analyzer.max_retries",
                "max_retries is very high (>10), exponential backoff may wait for hours",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;

        if browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "debug_port cannot be 0",
            ));
        }

        if browser.page_load_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.page_load_timeout_secs",
                "page_load_timeout_secs must be greater than 0",
            ));
        }

        if browser.settle_secs > 60 {
            result.add_warning(ValidationWarning::new(
                "browser.settle_secs",
                "settle_secs is very high (>60), every page load will wait that long",
            ));
        }

        if let Some(ref path) = browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome path does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_session(config: &Config, result: &mut ValidationResult) {
        if config.session.preview_chars == 0 {
            result.add_warning(ValidationWarning::new(
                "session.preview_chars",
                "preview_chars is 0, /preview will show nothing",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
