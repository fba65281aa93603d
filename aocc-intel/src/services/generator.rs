//! Text generator seam
//!
//! Services talk to the hosted model through [`TextGenerator`] so that tests
//! can substitute a scripted implementation for [`super::GeminiClient`].

use async_trait::async_trait;
use aocc_common::CredentialError;
use thiserror::Error;

use crate::models::GroundingChunk;

/// Generator errors
///
/// Calls are single round trips: none of these are retried.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication rejected by generator service")]
    Auth,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// One text generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub prompt: String,
    /// Ask for an `application/json` response
    pub json_response: bool,
    /// Let the model ground its answer in web search results
    pub search_grounding: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn json(mut self) -> Self {
        self.json_response = true;
        self
    }

    pub fn grounded(mut self) -> Self {
        self.search_grounding = true;
        self
    }
}

/// Output of one generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Concatenated text parts of the first candidate; `None` when empty
    pub text: Option<String>,
    /// Web citations from search grounding, in response order
    pub grounding: Vec<GroundingChunk>,
}

impl Generation {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            grounding: Vec::new(),
        }
    }

    pub fn with_grounding(mut self, grounding: Vec<GroundingChunk>) -> Self {
        self.grounding = grounding;
        self
    }

    /// Grounding chunks that can serve as citations
    pub fn usable_grounding(&self) -> Vec<GroundingChunk> {
        self.grounding
            .iter()
            .filter(|chunk| chunk.is_usable())
            .cloned()
            .collect()
    }
}

/// Hosted generative model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a text generation
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GeneratorError>;

    /// Synthesize speech for `text`
    ///
    /// Returns base64 s16le PCM (24 kHz mono), or `None` when the response
    /// carried no audio.
    async fn synthesize_speech(&self, text: &str) -> Result<Option<String>, GeneratorError>;
}
