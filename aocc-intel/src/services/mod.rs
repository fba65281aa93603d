//! Service modules for operations intelligence
//!
//! Sanitization pipeline (pure, synchronous):
//! - `response_extractor`: generator text → JSON value
//! - `source_scorer`: claim → verified citation or search link
//! - `geo_sanitizer`: origin airports and title dedup
//!
//! Generator-backed services: `forecast_agent`, `event_scanner`,
//! `executive_reporter`, all through the `TextGenerator` seam.

pub mod event_scanner;
pub mod executive_reporter;
pub mod forecast_agent;
pub mod gemini_client;
pub mod generator;
pub mod geo_sanitizer;
pub mod pcm_audio;
pub mod response_extractor;
pub mod source_scorer;

pub use event_scanner::{EventScanner, ScanWindow};
pub use executive_reporter::{strip_html, ExecutiveReporter, NarrationError};
pub use forecast_agent::ForecastAgent;
pub use gemini_client::GeminiClient;
pub use generator::{Generation, GenerationRequest, GeneratorError, TextGenerator};
pub use geo_sanitizer::{dedupe_by_title, sanitize_origins};
pub use pcm_audio::{AudioError, PcmAudio};
pub use response_extractor::{extract_array, extract_json};
pub use source_scorer::{SourceDecision, SourceMatch, SourceScorer};
