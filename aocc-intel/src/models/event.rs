//! Event intelligence records
//!
//! [`RawEvent`] is the tolerant view of one generator-produced item: every
//! field is optional and a malformed field degrades to its default instead of
//! rejecting the item. [`EventRecord`] is the sanitized output served to the
//! dashboard.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventCategory {
    Concert,
    Weather,
    Disaster,
    Holiday,
    #[serde(rename = "VVIP")]
    Vvip,
    #[default]
    Other,
    Logistics,
    Micro,
}

impl EventCategory {
    /// Case-insensitive parse; unknown labels map to [`EventCategory::Other`]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "concert" => EventCategory::Concert,
            "weather" => EventCategory::Weather,
            "disaster" => EventCategory::Disaster,
            "holiday" => EventCategory::Holiday,
            "vvip" => EventCategory::Vvip,
            "logistics" => EventCategory::Logistics,
            "micro" => EventCategory::Micro,
            _ => EventCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Concert => "Concert",
            EventCategory::Weather => "Weather",
            EventCategory::Disaster => "Disaster",
            EventCategory::Holiday => "Holiday",
            EventCategory::Vvip => "VVIP",
            EventCategory::Other => "Other",
            EventCategory::Logistics => "Logistics",
            EventCategory::Micro => "Micro",
        }
    }
}

/// Coarse severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl ImpactLevel {
    /// Case-insensitive parse; unknown labels map to [`ImpactLevel::Medium`]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "HIGH" => ImpactLevel::High,
            "LOW" => ImpactLevel::Low,
            _ => ImpactLevel::Medium,
        }
    }
}

/// One mitigation step owned by an airport unit (AOCC, AMC, AVSEC, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mitigation {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub action: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub department: String,
}

/// Sanitized event served to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub impact_level: ImpactLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weather_forecast: String,
    #[serde(default)]
    pub affected_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_origins: Option<Vec<String>>,
    #[serde(default)]
    pub mitigation_plan: Vec<Mitigation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// True when `source_url` is a grounding citation, false for a search link
    #[serde(default)]
    pub source_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Tolerant view of one generated event item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvent {
    #[serde(deserialize_with = "text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "category")]
    pub category: EventCategory,
    #[serde(deserialize_with = "impact_level")]
    pub impact_level: ImpactLevel,
    #[serde(deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "text")]
    pub weather_forecast: Option<String>,
    #[serde(deserialize_with = "text")]
    pub affected_airport: Option<String>,
    /// `None` when the field is absent or not an array
    #[serde(deserialize_with = "array")]
    pub potential_origins: Option<Vec<Value>>,
    #[serde(deserialize_with = "mitigations")]
    pub mitigation_plan: Vec<Mitigation>,
    #[serde(deserialize_with = "text")]
    pub source_url: Option<String>,
    #[serde(deserialize_with = "text")]
    pub image_url: Option<String>,
}

impl RawEvent {
    /// Read one item; only non-objects are rejected
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Title with surrounding whitespace removed, if non-empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// String entries of the origins array; other entries are ignored
    pub fn origin_codes(&self) -> Option<Vec<String>> {
        self.potential_origins.as_ref().map(|origins| {
            origins
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
    }
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

fn category<'de, D>(deserializer: D) -> Result<EventCategory, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?
        .map(|s| EventCategory::parse(&s))
        .unwrap_or_default())
}

fn impact_level<'de, D>(deserializer: D) -> Result<ImpactLevel, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?
        .map(|s| ImpactLevel::parse(&s))
        .unwrap_or_default())
}

fn array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

fn mitigations<'de, D>(deserializer: D) -> Result<Vec<Mitigation>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = array(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(action) => Some(Mitigation {
                action,
                department: String::new(),
            }),
            Value::Object(_) => serde_json::from_value(item).ok(),
            _ => None,
        })
        .collect())
}
