//! Generation request types.

use serde::{Deserialize, Serialize};

/// Sampling and transport parameters for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Temperature for sampling (0.0 - 2.0).
    pub temperature: f32,

    /// Top-p sampling.
    pub top_p: f32,

    /// Number of candidates to request.
    pub candidate_count: u32,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.95,
            candidate_count: 1,
            timeout_seconds: 120,
        }
    }
}

/// Request for a single-prompt generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model to use.
    pub model: String,

    /// Full prompt text.
    pub prompt: String,

    #[serde(default)]
    pub params: GenerationParams,
}

impl GenerationRequest {
    /// Create a new request with default parameters.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            params: GenerationParams::default(),
        }
    }

    /// Replace the generation parameters.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}
