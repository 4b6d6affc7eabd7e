//! CDP page session for interacting with a single page.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::debug;

use super::client::Transport;
use super::error::CdpError;

/// Interval between `document.readyState` polls.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A session attached to a single page/target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .send(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Override the user agent for every request this page makes.
    pub async fn set_user_agent(&self, user_agent: &str) -> Result<(), CdpError> {
        self.call(
            "Network.setUserAgentOverride",
            Some(json!({"userAgent": user_agent})),
        )
        .await?;
        Ok(())
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Navigate to `url` and wait until the document has loaded.
    ///
    /// `timeout` bounds the navigation and the load wait together.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), CdpError> {
        let deadline = Instant::now() + timeout;

        let result = tokio::time::timeout(
            timeout,
            self.call("Page.navigate", Some(json!({"url": url}))),
        )
        .await
        .map_err(|_| CdpError::Timeout(format!("Navigation to {} timed out", url)))??;

        if let Some(error) = navigation_error(&result) {
            return Err(CdpError::NavigationFailed(error));
        }

        self.wait_for_load(deadline).await?;

        debug!("Navigated to {}", url);
        Ok(())
    }

    /// Poll `document.readyState` until it reports `complete`.
    async fn wait_for_load(&self, deadline: Instant) -> Result<(), CdpError> {
        loop {
            let state = self.evaluate("document.readyState").await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }

    /// Serialized markup of the whole document.
    pub async fn outer_html(&self) -> Result<String, CdpError> {
        let value = self.evaluate("document.documentElement.outerHTML").await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("outerHTML was not a string".to_string()))
    }
}

/// Chrome reports failed navigations through a non-empty `errorText`.
fn navigation_error(result: &Value) -> Option<String> {
    result
        .get("errorText")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
