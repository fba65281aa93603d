//! Traffic forecast request/response types

use serde::{Deserialize, Serialize};

use crate::models::GroundingChunk;

/// Scenario value that asks the agent to decide the scenario itself
pub const AUTO_SCENARIO: &str = "AUTO";

/// Scenario name meaning "no adjustment to the baseline"
pub const NORMAL_OPERATIONS: &str = "Normal Operations";

/// Which traffic series a forecast targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrafficType {
    Passenger,
    Flight,
}

/// One day of baseline traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyData {
    /// YYYY-MM-DD
    pub date: String,
    pub day_name: String,
    pub passengers: u64,
    pub flights: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_peak_departure: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_peak_return: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_holiday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DailyData {
    /// Baseline value for the requested series
    pub fn value_for(&self, traffic_type: TrafficType) -> u64 {
        match traffic_type {
            TrafficType::Passenger => self.passengers,
            TrafficType::Flight => self.flights,
        }
    }
}

/// Period summary for a baseline dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportStats {
    pub passenger_growth: String,
    pub passenger_recovery: String,
    pub flight_growth: String,
    pub flight_recovery: String,
    pub total_passengers: String,
    pub total_flights: String,
    pub peak_departure: String,
    pub peak_return: String,
}

/// Forecast request from the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// YYYY-MM-DD
    pub date: String,
    #[serde(rename = "type")]
    pub traffic_type: TrafficType,
    /// Airport code, or "ALL" for the aggregate
    pub airport_code: String,
    /// "AUTO" or a forced manual scenario
    #[serde(default)]
    pub scenario: Option<String>,
}

impl PredictionRequest {
    pub fn is_auto(&self) -> bool {
        self.scenario.as_deref() == Some(AUTO_SCENARIO)
    }
}

/// Forecast served to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub predicted_value: u64,
    pub confidence: String,
    pub reasoning: String,
    pub comprehensive_analysis: String,
    /// Baseline day for the requested date, if the dataset has one
    pub context: Option<DailyData>,
    pub airport_code: String,
    pub sources: Vec<GroundingChunk>,
    pub applied_scenario: String,
    pub detected_event: String,
}
