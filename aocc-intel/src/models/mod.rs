//! Data models for aocc-intel

pub mod airport;
pub mod event;
pub mod executive;
pub mod forecast;
pub mod grounding;

pub use event::{EventCategory, EventRecord, ImpactLevel, Mitigation, RawEvent};
pub use executive::ExecutiveData;
pub use forecast::{AirportStats, DailyData, PredictionRequest, PredictionResult, TrafficType};
pub use grounding::GroundingChunk;
