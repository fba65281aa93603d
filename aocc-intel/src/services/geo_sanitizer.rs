//! Geo Sanitizer
//!
//! Keeps the origin → affected-airport relation of an event self-consistent:
//! every origin is a known code and never the affected airport itself.
//! When nothing survives filtering a default hub set is supplied, so the
//! result is never empty.

use std::collections::HashSet;

use crate::models::airport::{
    is_known_code, is_primary_hub, PRIMARY_HUB_ORIGINS, REGIONAL_HUB_ORIGINS,
};

/// Normalize a code: trim, upper-case, first three characters
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase().chars().take(3).collect()
}

/// Clean an origin list for an event at `affected_airport`
///
/// Unknown codes, the affected airport itself and repeats are removed. An
/// empty result is replaced by regional hubs (event at a primary hub) or
/// primary hubs (event at a regional airport), minus the affected airport.
pub fn sanitize_origins(affected_airport: &str, origins: &[String]) -> Vec<String> {
    let affected = normalize_code(affected_airport);
    let mut seen = HashSet::new();

    let cleaned: Vec<String> = origins
        .iter()
        .map(|code| normalize_code(code))
        .filter(|code| is_known_code(code) && *code != affected)
        .filter(|code| seen.insert(code.clone()))
        .collect();

    if !cleaned.is_empty() {
        return cleaned;
    }

    let defaults: &[&str] = if is_primary_hub(&affected) {
        &REGIONAL_HUB_ORIGINS
    } else {
        &PRIMARY_HUB_ORIGINS
    };

    tracing::debug!(
        affected = %affected,
        proposed = origins.len(),
        "No valid origins left, using default hubs"
    );

    defaults
        .iter()
        .filter(|code| **code != affected)
        .map(|code| code.to_string())
        .collect()
}

/// Keep the first item for each exact title
pub fn dedupe_by_title<T, F>(items: Vec<T>, title: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(title(item).to_string()))
        .collect()
}
