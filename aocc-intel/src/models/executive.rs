//! Executive report snapshot types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// A metric with its year-on-year growth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGrowth {
    pub value: String,
    /// e.g. "+5%" or "-4%"
    pub growth: String,
    pub trend: Trend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
}

/// Flight/pax/cargo figures for one airport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportBreakdown {
    pub flight: String,
    pub pax: String,
    pub cargo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficHighlight {
    pub period: String,
    pub date: String,
    /// Offset from the holiday, e.g. "H-3"
    pub h_date: String,
    pub flight: MetricGrowth,
    pub pax: MetricGrowth,
    pub cargo: MetricGrowth,
    pub cgk: AirportBreakdown,
    pub dps: AirportBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatedMetric {
    pub total: String,
    pub growth: String,
    pub recovery: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulationData {
    pub flight: AccumulatedMetric,
    pub pax: AccumulatedMetric,
    pub cargo: AccumulatedMetric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopListItem {
    pub name: String,
    pub value: String,
}

/// Domestic / international / combined split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSplit {
    pub dom: String,
    pub int: String,
    pub all: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalData {
    pub otp: SegmentSplit,
    pub load_factor: SegmentSplit,
    pub slot_utilization: SegmentSplit,
    pub routes: SegmentSplit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFlight {
    pub plan: String,
    pub realization: String,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPax {
    pub flight: String,
    pub pax: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpsCondition {
    pub yesterday_realization: FlightPax,
    pub today_plan: FlightPax,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrregularityDetail {
    pub daily: String,
    pub branch: String,
    pub flight_no: String,
    pub chronology: String,
    pub impact: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Irregularities {
    pub total: u32,
    pub top_cause: String,
    pub details: Vec<IrregularityDetail>,
}

/// Full executive snapshot (one holiday period)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveData {
    pub last_updated: String,
    pub highlight_before: TrafficHighlight,
    pub highlight_after: TrafficHighlight,
    pub accumulation: AccumulationData,
    pub top_airports: Vec<TopListItem>,
    pub top_dest_int: Vec<TopListItem>,
    pub top_dest_dom: Vec<TopListItem>,
    pub operational: OperationalData,
    pub extra_flight: ExtraFlight,
    pub ops_condition: OpsCondition,
    pub irregularities: Irregularities,
}
