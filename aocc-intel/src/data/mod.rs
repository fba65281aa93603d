//! Static datasets bundled with the service

pub mod baseline;
pub mod executive;

pub use baseline::{airport_data, airport_stats, baseline_day};
pub use executive::executive_snapshot;
