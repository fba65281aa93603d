//! Traffic forecast agent
//!
//! Anchors every forecast on the static baseline. In `AUTO` mode the model
//! searches for events and weather on the target date and picks the scenario
//! itself; otherwise the caller's scenario is forced.
//!
//! When the generator fails and the baseline covers the date, the baseline
//! value is served as an offline forecast. Without a baseline day the error
//! propagates.

use std::sync::Arc;

use serde_json::Value;

use crate::data::{airport_data, baseline_day};
use crate::models::airport::airport_name;
use crate::models::forecast::NORMAL_OPERATIONS;
use crate::models::{DailyData, GroundingChunk, PredictionRequest, PredictionResult, TrafficType};
use crate::services::generator::{Generation, GenerationRequest, GeneratorError, TextGenerator};
use crate::services::response_extractor::extract_json;

pub const CONFIDENCE_BASELINE: &str = "Medium (Baseline)";
pub const CONFIDENCE_ADJUSTED: &str = "High (Agent Adjusted)";
pub const CONFIDENCE_OFFLINE: &str = "Low (Offline)";

/// Scenario reported when the model names none
pub const DEFAULT_SCENARIO: &str = "Normal";
pub const OFFLINE_SCENARIO: &str = "Offline Fallback";
pub const OFFLINE_EVENT: &str = "Connection Error";

pub struct ForecastAgent {
    generator: Arc<dyn TextGenerator>,
}

impl ForecastAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, GeneratorError> {
        let code = request.airport_code.trim().to_uppercase();
        let baseline = baseline_day(&code, &request.date);

        let outcome = match self.generator.generate(&agent_request(request, &code)).await {
            Ok(Generation { text: Some(text), grounding }) => Ok((text, grounding)),
            Ok(_) => Err(GeneratorError::Parse("No response from generator".to_string())),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((text, grounding)) => {
                let verdict = extract_json(&text).unwrap_or(Value::Null);
                let result = build_result(request, baseline, &verdict, grounding);
                tracing::info!(
                    airport = %result.airport_code,
                    date = %request.date,
                    scenario = %result.applied_scenario,
                    predicted = result.predicted_value,
                    "Forecast complete"
                );
                Ok(result)
            }
            Err(e) => match baseline {
                Some(day) => {
                    tracing::warn!(
                        error = %e,
                        date = %request.date,
                        "Forecast generation failed, serving baseline"
                    );
                    Ok(offline_result(request, day))
                }
                None => {
                    tracing::error!(
                        error = %e,
                        date = %request.date,
                        "Forecast generation failed, no baseline for date"
                    );
                    Err(e)
                }
            },
        }
    }
}

/// Confidence label for the scenario the forecast ended up using
pub fn confidence_for(applied_scenario: &str) -> &'static str {
    if applied_scenario == NORMAL_OPERATIONS || applied_scenario == DEFAULT_SCENARIO {
        CONFIDENCE_BASELINE
    } else {
        CONFIDENCE_ADJUSTED
    }
}

fn build_result(
    request: &PredictionRequest,
    baseline: Option<&DailyData>,
    verdict: &Value,
    sources: Vec<GroundingChunk>,
) -> PredictionResult {
    let applied_scenario =
        text_field(verdict, "appliedScenario").unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

    let predicted_value = positive_number(verdict.get("predictedValue"))
        .or_else(|| baseline.map(|day| day.value_for(request.traffic_type)))
        .unwrap_or(0);

    PredictionResult {
        predicted_value,
        confidence: confidence_for(&applied_scenario).to_string(),
        reasoning: text_field(verdict, "reasoning")
            .unwrap_or_else(|| "Automatic analysis.".to_string()),
        comprehensive_analysis: text_field(verdict, "comprehensiveAnalysis")
            .unwrap_or_else(|| "No analysis available.".to_string()),
        context: baseline.cloned(),
        airport_code: request.airport_code.clone(),
        sources,
        applied_scenario,
        detected_event: text_field(verdict, "detectedEvent").unwrap_or_else(|| "None".to_string()),
    }
}

fn offline_result(request: &PredictionRequest, day: &DailyData) -> PredictionResult {
    PredictionResult {
        predicted_value: day.value_for(request.traffic_type),
        confidence: CONFIDENCE_OFFLINE.to_string(),
        reasoning: "Autonomous search failed. Using static baseline data.".to_string(),
        comprehensive_analysis: "AI connection lost.".to_string(),
        context: Some(day.clone()),
        airport_code: request.airport_code.clone(),
        sources: Vec::new(),
        applied_scenario: OFFLINE_SCENARIO.to_string(),
        detected_event: OFFLINE_EVENT.to_string(),
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accepts integers, floats (rounded) and numeric strings; zero counts as absent
fn positive_number(value: Option<&Value>) -> Option<u64> {
    let number = match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(round_positive)),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok().and_then(round_positive),
        _ => None,
    };
    number.filter(|n| *n > 0)
}

fn round_positive(value: f64) -> Option<u64> {
    (value.is_finite() && value > 0.0).then(|| value.round() as u64)
}

fn traffic_label(traffic_type: TrafficType) -> &'static str {
    match traffic_type {
        TrafficType::Passenger => "PASSENGER",
        TrafficType::Flight => "FLIGHT",
    }
}

fn agent_request(request: &PredictionRequest, code: &str) -> GenerationRequest {
    let airport = airport_name(code);
    let auto = request.is_auto();
    let scenario = request.scenario.as_deref().unwrap_or(NORMAL_OPERATIONS);
    let baseline_json =
        serde_json::to_string(airport_data(code)).unwrap_or_else(|_| "[]".to_string());

    let step = if auto {
        "AUTONOMOUS STEP (required): use web search to find news, events and weather for that exact date."
    } else {
        "Use the manual scenario provided by the user."
    };

    let instruction = format!(
        r#"You are the Autonomous Traffic Prediction Agent for an airport operator.

TASKS
1. Analyse the target date {date} for {airport}.
2. {step}
3. Choose the most relevant scenario:
   - concert, long holiday or sports event found: "High Demand Event"
   - storm or flood forecast found: "Weather Disruption"
   - nothing significant: "Normal Operations"
4. Compute the traffic forecast for that scenario from the baseline JSON.

CALCULATION RULES
- Normal: follow the historical trend.
- Weather Disruption: reduce traffic by 10-20% (no-shows, cancellations).
- High Demand Event: increase traffic by 5-15%.

OUTPUT (strict JSON only, no markdown):
{{"detectedEvent": "string", "appliedScenario": "string", "predictedValue": number, "reasoning": "string (chain of thought: search X led to decision Y, giving Z)", "comprehensiveAnalysis": "string (operational advice for the airport manager)"}}"#,
        date = request.date,
        airport = airport,
        step = step,
    );

    let mode = if auto {
        "AUTO INSTRUCTION: search for \"events/weather in [location] on [date]\". Override the baseline when something significant is found, otherwise keep it.".to_string()
    } else {
        format!(
            "MANUAL INSTRUCTION: the user forces the \"{}\" scenario. Follow it even when real-time facts disagree.",
            scenario
        )
    };

    let prompt = format!(
        "REQUEST PARAMETERS\nDate: {date}\nType: {kind}\nAirport: {airport}\nUser mode: {scenario}\n\nBASELINE DATA: {baseline}\n\n{mode}",
        date = request.date,
        kind = traffic_label(request.traffic_type),
        airport = airport,
        scenario = scenario,
        baseline = baseline_json,
        mode = mode,
    );

    GenerationRequest::new(prompt)
        .with_system_instruction(instruction)
        .json()
        .grounded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(date: &str, scenario: Option<&str>) -> PredictionRequest {
        PredictionRequest {
            date: date.to_string(),
            traffic_type: TrafficType::Passenger,
            airport_code: "CGK".to_string(),
            scenario: scenario.map(str::to_string),
        }
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(confidence_for("Normal Operations"), CONFIDENCE_BASELINE);
        assert_eq!(confidence_for("Normal"), CONFIDENCE_BASELINE);
        assert_eq!(confidence_for("Weather Disruption"), CONFIDENCE_ADJUSTED);
    }

    #[test]
    fn test_result_from_full_verdict() {
        let req = request("2025-12-25", Some("AUTO"));
        let baseline = baseline_day("CGK", "2025-12-25");
        let verdict = json!({
            "detectedEvent": "Konser Coldplay",
            "appliedScenario": "High Demand Event",
            "predictedValue": 160000,
            "reasoning": "Search found a concert",
            "comprehensiveAnalysis": "Open all counters"
        });

        let result = build_result(&req, baseline, &verdict, Vec::new());
        assert_eq!(result.predicted_value, 160_000);
        assert_eq!(result.confidence, CONFIDENCE_ADJUSTED);
        assert_eq!(result.detected_event, "Konser Coldplay");
        assert_eq!(result.context.as_ref().map(|d| d.date.as_str()), Some("2025-12-25"));
    }

    #[test]
    fn test_missing_fields_use_defaults_and_baseline() {
        let req = request("2025-12-25", Some("AUTO"));
        let baseline = baseline_day("CGK", "2025-12-25");

        let result = build_result(&req, baseline, &Value::Null, Vec::new());
        assert_eq!(result.predicted_value, 145_213);
        assert_eq!(result.applied_scenario, DEFAULT_SCENARIO);
        assert_eq!(result.confidence, CONFIDENCE_BASELINE);
        assert_eq!(result.detected_event, "None");
    }

    #[test]
    fn test_zero_prediction_without_baseline() {
        let req = request("2026-03-01", None);
        let result = build_result(&req, None, &json!({"predictedValue": 0}), Vec::new());
        assert_eq!(result.predicted_value, 0);
        assert!(result.context.is_none());
    }

    #[test]
    fn test_numeric_variants() {
        assert_eq!(positive_number(Some(&json!(1200.6))), Some(1201));
        assert_eq!(positive_number(Some(&json!("150,000"))), Some(150_000));
        assert_eq!(positive_number(Some(&json!(-4))), None);
        assert_eq!(positive_number(Some(&json!(true))), None);
        assert_eq!(positive_number(None), None);
    }

    #[test]
    fn test_offline_result() {
        let req = PredictionRequest {
            traffic_type: TrafficType::Flight,
            ..request("2025-12-25", Some("AUTO"))
        };
        let day = baseline_day("CGK", "2025-12-25").unwrap();
        let result = offline_result(&req, day);
        assert_eq!(result.predicted_value, day.flights);
        assert_eq!(result.confidence, CONFIDENCE_OFFLINE);
        assert_eq!(result.applied_scenario, OFFLINE_SCENARIO);
        assert_eq!(result.detected_event, OFFLINE_EVENT);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_manual_request_forces_scenario() {
        let generation = agent_request(&request("2025-12-24", Some("Weather Disruption")), "CGK");
        assert!(generation.prompt.contains("forces the \"Weather Disruption\" scenario"));
        assert!(generation.prompt.contains("\"date\":\"2025-12-18\""));
        assert!(generation.search_grounding);
        assert!(generation.json_response);

        let auto = agent_request(&request("2025-12-24", Some("AUTO")), "CGK");
        assert!(auto.system_instruction.unwrap().contains("AUTONOMOUS STEP"));
    }
}
