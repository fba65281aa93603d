//! Search-grounding citations attached to a generation

use serde::{Deserialize, Serialize};

/// A `(title, uri)` candidate citation from the generator's search grounding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub title: String,
    pub uri: String,
}

impl GroundingChunk {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }

    /// Both title and uri are non-empty
    pub fn is_usable(&self) -> bool {
        !self.title.trim().is_empty() && !self.uri.trim().is_empty()
    }
}
