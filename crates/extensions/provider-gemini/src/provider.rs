//! Gemini LLM provider implementation.

use async_trait::async_trait;
use tracing::{debug, error, info};

use pagelens_protocols::error::{InitError, ProviderError};
use pagelens_protocols::provider::{Generation, GenerationRequest, LlmProvider};

use crate::client::{GeminiClient, DEFAULT_BASE_URL};
use crate::types::*;

/// Candidate finish reasons that mean the output was withheld by policy.
const BLOCKING_FINISH_REASONS: &[&str] =
    &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Connection settings for [`GeminiProvider::connect`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Gemini LLM provider.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Create a provider from an explicit key, skipping startup checks.
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, InitError> {
        Ok(Self {
            client: GeminiClient::new(api_key, base_url)?,
        })
    }

    /// Create a provider after checking that the endpoint host resolves
    /// and that the API key is present in the environment.
    pub async fn connect(config: &GeminiConfig) -> Result<Self, InitError> {
        resolve_endpoint(&config.base_url).await?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                error!("{} not found in environment variables or .env file.", config.api_key_env);
                InitError::MissingApiKey(config.api_key_env.clone())
            })?;
        info!("{} found.", config.api_key_env);

        let provider = Self::new(api_key, config.base_url.clone())?;
        info!("Gemini client initialized for {}", config.base_url);
        Ok(provider)
    }

    fn build_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(request.prompt.clone())],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(request.params.temperature),
                top_p: Some(request.params.top_p),
                candidate_count: Some(request.params.candidate_count),
                max_output_tokens: None,
            }),
        }
    }

    fn convert_response(&self, response: GenerateContentResponse) -> Generation {
        let prompt_block = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Generation {
                block_reason: prompt_block,
                ..Default::default()
            };
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let finish_reason = candidate.finish_reason;
        let block_reason = prompt_block.or_else(|| {
            finish_reason
                .as_deref()
                .filter(|reason| text.is_empty() && BLOCKING_FINISH_REASONS.contains(reason))
                .map(str::to_string)
        });

        Generation {
            text: (!text.is_empty()).then_some(text),
            block_reason,
            finish_reason,
        }
    }
}

/// Resolve the endpoint host on port 443 so DNS problems surface at startup.
async fn resolve_endpoint(base_url: &str) -> Result<(), InitError> {
    let parsed = url::Url::parse(base_url).map_err(|e| InitError::Client(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| InitError::Client(format!("No host in {}", base_url)))?
        .to_string();
    let port = parsed.port_or_known_default().unwrap_or(443);

    let resolved = tokio::net::lookup_host((host.as_str(), port))
        .await
        .map(|mut addrs| addrs.next().is_some());

    match resolved {
        Ok(true) => {
            info!("DNS resolution for {} successful.", host);
            Ok(())
        }
        Ok(false) => Err(InitError::DnsResolution {
            host,
            message: "no addresses returned".to_string(),
        }),
        Err(e) => {
            error!("DNS resolution failed. Check network configuration or firewall.");
            Err(InitError::DnsResolution {
                host,
                message: e.to_string(),
            })
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, ProviderError> {
        debug!("Gemini generate: model={}", request.model);

        let gemini_request = self.build_request(&request);
        let response = self
            .client
            .generate_content(&request.model, &gemini_request, request.params.timeout_seconds)
            .await?;

        Ok(self.convert_response(response))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
