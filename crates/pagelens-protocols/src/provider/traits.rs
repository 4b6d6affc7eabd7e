//! LLM Provider trait definition.

use async_trait::async_trait;

use super::{Generation, GenerationRequest};
use crate::error::ProviderError;

/// Core trait for LLM providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Send a single prompt and wait for the single candidate it produces.
    ///
    /// A response that arrives but carries no text (empty candidate list,
    /// safety block) is `Ok`; callers inspect the [`Generation`] to decide.
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, ProviderError>;
}
