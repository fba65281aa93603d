//! Scripted stand-in for the hosted model
//!
//! Replies are consumed in order; once the script runs out every call fails
//! with a network error. Every text request is recorded for inspection.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aocc_intel::models::GroundingChunk;
use aocc_intel::services::{Generation, GenerationRequest, GeneratorError, TextGenerator};
use async_trait::async_trait;

#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<Generation, GeneratorError>>>,
    speech: Mutex<VecDeque<Result<Option<String>, GeneratorError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    speech_inputs: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose every call fails
    pub fn offline() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn reply_text(self, text: &str) -> Self {
        self.reply(Generation::text(text))
    }

    pub fn reply_grounded(self, text: &str, chunks: &[(&str, &str)]) -> Self {
        let grounding = chunks
            .iter()
            .map(|(title, uri)| GroundingChunk::new(*title, *uri))
            .collect();
        self.reply(Generation::text(text).with_grounding(grounding))
    }

    pub fn reply(self, generation: Generation) -> Self {
        self.replies.lock().unwrap().push_back(Ok(generation));
        self
    }

    pub fn fail(self, error: GeneratorError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn speak(self, result: Result<Option<String>, GeneratorError>) -> Self {
        self.speech.lock().unwrap().push_back(result);
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn speech_inputs(&self) -> Vec<String> {
        self.speech_inputs.lock().unwrap().clone()
    }
}

fn exhausted() -> GeneratorError {
    GeneratorError::Network("connection refused".to_string())
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GeneratorError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Option<String>, GeneratorError> {
        self.speech_inputs.lock().unwrap().push(text.to_string());
        self.speech
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }
}
