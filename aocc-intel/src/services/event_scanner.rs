//! Event intelligence scan
//!
//! Asks the generator (with search grounding) for every external event that
//! may affect airport operations in a 7-day window, then sanitizes each
//! returned item independently:
//!
//! 1. items that are not objects or have no title are dropped
//! 2. origin airports are geo-sanitized (only when the item carries an array)
//! 3. the item is matched against the grounding citations; unverified
//!    disasters are dropped, everything else gets a source link
//! 4. the batch is deduplicated by title
//!
//! A failed generator call yields an empty list, never an error.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use serde_json::Value;
use uuid::Uuid;

use crate::models::airport::{is_known_code, AIRPORT_CODES};
use crate::models::{EventRecord, GroundingChunk, RawEvent};
use crate::services::generator::{GenerationRequest, TextGenerator};
use crate::services::geo_sanitizer::{dedupe_by_title, normalize_code, sanitize_origins};
use crate::services::response_extractor::extract_array;
use crate::services::source_scorer::{SourceDecision, SourceScorer};

/// Length of the scan window in days
pub const SCAN_WINDOW_DAYS: i64 = 7;

/// Date range covered by one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScanWindow {
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(SCAN_WINDOW_DAYS),
        }
    }

    /// Year used for recency scoring and fallback search links
    pub fn target_year(&self) -> i32 {
        self.start.year()
    }
}

pub struct EventScanner {
    generator: Arc<dyn TextGenerator>,
}

impl EventScanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Scan the window starting at `start`
    pub async fn scan(&self, start: NaiveDate) -> Vec<EventRecord> {
        let window = ScanWindow::starting(start);
        let request = GenerationRequest::new(scan_prompt(&window))
            .with_system_instruction(scan_instruction(&window))
            .json()
            .grounded();

        tracing::info!(start = %window.start, end = %window.end, "Starting event scan");

        let generation = match self.generator.generate(&request).await {
            Ok(generation) => generation,
            Err(e) => {
                tracing::error!(error = %e, "Event scan generation failed");
                return Vec::new();
            }
        };

        let Some(text) = generation.text.as_deref() else {
            tracing::warn!("Event scan returned no text");
            return Vec::new();
        };

        let items = extract_array(text);
        if items.is_empty() {
            tracing::warn!("Event scan response carried no event list");
            return Vec::new();
        }

        let events = sanitize_events(
            &items,
            &generation.usable_grounding(),
            SourceScorer::new(window.target_year()),
        );

        tracing::info!(
            proposed = items.len(),
            accepted = events.len(),
            "Event scan complete"
        );

        events
    }
}

/// Sanitize a batch of generated items against the scan's citations
pub fn sanitize_events(
    items: &[Value],
    candidates: &[GroundingChunk],
    scorer: SourceScorer,
) -> Vec<EventRecord> {
    let events: Vec<EventRecord> = items
        .iter()
        .filter_map(RawEvent::from_value)
        .filter_map(|raw| sanitize_event(raw, candidates, &scorer))
        .collect();

    dedupe_by_title(events, |event| event.title.as_str())
}

fn sanitize_event(
    raw: RawEvent,
    candidates: &[GroundingChunk],
    scorer: &SourceScorer,
) -> Option<EventRecord> {
    let title = raw.title()?.to_string();
    let affected_airport = raw
        .affected_airport
        .as_deref()
        .map(affected_code)
        .unwrap_or_default();

    let potential_origins = raw
        .origin_codes()
        .map(|origins| sanitize_origins(&affected_airport, &origins));

    let (source_url, source_verified) = match scorer.resolve(&title, candidates).decide(raw.category) {
        SourceDecision::Verified(uri) => (uri, true),
        SourceDecision::Fallback(uri) => (uri, false),
        SourceDecision::Reject => {
            tracing::warn!(title = %title, "Dropped unverified disaster event");
            return None;
        }
    };

    Some(EventRecord {
        id: raw
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        title,
        date: raw.date.unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        category: raw.category,
        impact_level: raw.impact_level,
        description: raw.description.unwrap_or_default(),
        weather_forecast: raw.weather_forecast.unwrap_or_default(),
        affected_airport,
        potential_origins,
        mitigation_plan: raw.mitigation_plan,
        source_url: Some(source_url),
        source_verified,
        image_url: raw.image_url,
    })
}

/// Known codes are served upper-cased; anything else is kept as written
fn affected_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let code = normalize_code(trimmed);
    if trimmed.chars().count() == 3 && is_known_code(&code) {
        code
    } else {
        trimmed.to_string()
    }
}

fn scan_instruction(window: &ScanWindow) -> String {
    format!(
        r#"You are the Airport Operations Intelligence Chief (AOCC lead) for an Indonesian airport operator.

MAIN TASK: list every external development that can affect operations at Indonesian airports between {start} and {end}.

QUANTITY
- Return at least 25 distinct event items.
- Never merge events. "Concert A", "Concert B" and "Concert C" are three items, not "Concerts in Jakarta".
- When large events are scarce, add micro events (exhibitions, university graduations, local sports, hotel occupancy peaks).

JURISDICTION
- You act as the airport operator only. Mitigation covers airside, terminal and landside perimeter activities.
- Never propose actions outside the airport (evacuating villages, staging concerts, contacting artists).

MITIGATION UNITS
Each mitigationPlan entry names one of: AOCC, AMC, AVSEC, TERMINAL OPS, LANDSIDE OPS, ARFF, TEKNIK, CUSTOMER SERVICE.
- Concert or Holiday: crowding at terminal and drop-off. Traffic management at drop-off, extra AVSEC at screening, open all check-in counters.
- Weather: airside flooding, slippery runway, delays. Sump pumps and backup generators, rescue boat standby, delay handling.
- Disaster (volcano): volcanic ash and aerodrome closure. Paper tests every 30 minutes, NOTAM closure, refund area.
- Disaster (flood): access roads cut. Check flood barriers, route vehicles to higher roads.

GEO MAPPING
- affectedAirport: the destination airport where the event happens, one of: {codes}.
- potentialOrigins: IATA codes of airports passengers travel from.
- An origin must never equal the affected airport.

TIME VALIDATION
- Ignore stale news. An article from earlier in the year is invalid unless it specifically forecasts the requested period.

OUTPUT: a JSON array only, each item shaped as
{{"id": "1", "title": "...", "date": "YYYY-MM-DD", "location": "City", "category": "Concert|Weather|Disaster|Holiday|VVIP|Logistics|Micro", "impactLevel": "HIGH|MEDIUM|LOW", "description": "...", "weatherForecast": "...", "affectedAirport": "KNO", "potentialOrigins": ["CGK", "BTH"], "mitigationPlan": [{{"action": "...", "department": "AVSEC"}}], "imageUrl": "URL", "sourceUrl": "URL"}}"#,
        start = window.start,
        end = window.end,
        codes = AIRPORT_CODES.join(", "),
    )
}

fn scan_prompt(window: &ScanWindow) -> String {
    let month = window.start.format("%B %Y");
    format!(
        r#"Run a region-by-region web scan for {start} to {end}. Return at least 25 separate events.

Use these searches separately:
1. Sumatra (KNO, BTH, PDG, PLM): "events, concerts and weather Sumatra {start} {end}"
2. Java (CGK, SUB, YIA, SRG, SOC): "concerts, exhibitions, tourism, demonstrations, graduations Java {month}"
3. Bali and Nusa Tenggara (DPS, LOP, LBJ): "tourism events Bali Lombok NTT {start} {end}"
4. Kalimantan and Sulawesi (BPN, UPG, MDC): "viral news, events and weather Kalimantan Sulawesi {month}"
5. National: "volcano status, airfares, national holidays, traffic congestion {month}"
6. Micro events: "hotel occupancy, local festivals, university graduation schedule near airports {month}"

Every region must be represented. Busy local events (SME exhibitions, cultural festivals) go in as category "Micro"."#,
        start = window.start,
        end = window.end,
        month = month,
    )
}
