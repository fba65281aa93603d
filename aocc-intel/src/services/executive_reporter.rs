//! Executive reporting
//!
//! HTML analysis of the executive snapshot, the sidebar brief for a scanned
//! event list, and spoken narration of a report.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{EventCategory, EventRecord, ExecutiveData, ImpactLevel};
use crate::services::generator::{GenerationRequest, GeneratorError, TextGenerator};
use crate::services::pcm_audio::{AudioError, PcmAudio};

pub const ANALYSIS_EMPTY: &str = "Failed to create the analysis report.";
pub const ANALYSIS_UNAVAILABLE: &str = "AI service is unavailable at the moment.";
pub const NO_EVENTS_HTML: &str = "<p>No significant events detected in this period.</p>";
pub const SUMMARY_UNAVAILABLE_HTML: &str = "<p>Analysis unavailable.</p>";

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

const ANALYSIS_INSTRUCTION: &str = "You are the strategic AI analyst for the board of directors of an \
Indonesian airport operator. Write an executive report from the holiday command post data you are given. \
Use plain HTML tags only (<h3>, <p>, <b>, <ul>, <li>), no markdown.";

const SUMMARY_INSTRUCTION: &str = "You are the airport Chief Strategy Officer. Write a short Strategic \
Intelligence Brief in HTML for a dashboard sidebar (no markdown; use <h4>, <p>, <ul>, <li>, <strong>).\n\
Cover:\n\
1. Threat summary: how high is the operational risk this week?\n\
2. Event highlight: the one or two most critical events only.\n\
3. Key recommendation: one strategic sentence using the units AOCC, AMC, AVSEC.\n\
Be professional, dense and action oriented. At most 150 words.";

/// Narration failures; these are not masked by a fallback
#[derive(Debug, Error)]
pub enum NarrationError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Fields of an event that go into the sidebar brief
#[derive(Debug, Serialize)]
struct EventDigest<'a> {
    title: &'a str,
    category: EventCategory,
    impact: ImpactLevel,
    location: &'a str,
}

pub struct ExecutiveReporter {
    generator: Arc<dyn TextGenerator>,
}

impl ExecutiveReporter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// HTML report for the board
    pub async fn analyze(&self, data: &ExecutiveData) -> String {
        let payload = match serde_json::to_string(data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize executive data");
                return ANALYSIS_UNAVAILABLE.to_string();
            }
        };

        let request = GenerationRequest::new(format!(
            "REAL-TIME DATA TO ANALYSE:\n{}\n\nWrite the HTML report now.",
            payload
        ))
        .with_system_instruction(ANALYSIS_INSTRUCTION);

        match self.generator.generate(&request).await {
            Ok(generation) => generation.text.unwrap_or_else(|| ANALYSIS_EMPTY.to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Executive analysis failed");
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Sidebar brief for a scanned event list
    pub async fn summarize_events(&self, events: &[EventRecord]) -> String {
        if events.is_empty() {
            return NO_EVENTS_HTML.to_string();
        }

        let digest: Vec<EventDigest<'_>> = events
            .iter()
            .map(|event| EventDigest {
                title: &event.title,
                category: event.category,
                impact: event.impact_level,
                location: &event.location,
            })
            .collect();

        let payload = match serde_json::to_string(&digest) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize event digest");
                return SUMMARY_UNAVAILABLE_HTML.to_string();
            }
        };

        let request = GenerationRequest::new(format!(
            "EVENTS THIS WEEK:\n{}\n\nWrite the sidebar HTML summary.",
            payload
        ))
        .with_system_instruction(SUMMARY_INSTRUCTION);

        match self.generator.generate(&request).await {
            Ok(generation) => generation.text.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, events = events.len(), "Event summary failed");
                SUMMARY_UNAVAILABLE_HTML.to_string()
            }
        }
    }

    /// Spoken version of an HTML report
    ///
    /// `Ok(None)` when the generator returned no audio.
    pub async fn narrate(&self, html: &str) -> Result<Option<PcmAudio>, NarrationError> {
        let text = strip_html(html);
        tracing::debug!(chars = text.len(), "Requesting narration");

        let Some(encoded) = self.generator.synthesize_speech(&text).await? else {
            return Ok(None);
        };

        let audio = PcmAudio::from_base64(&encoded)?;
        tracing::info!(
            samples = audio.samples.len(),
            duration_secs = audio.duration_secs(),
            "Narration ready"
        );
        Ok(Some(audio))
    }
}

/// Replace tags with spaces and collapse whitespace
pub fn strip_html(html: &str) -> String {
    let without_tags = HTML_TAG.replace_all(html, " ");
    WHITESPACE.replace_all(&without_tags, " ").trim().to_string()
}
