//! Airport code whitelist and hub tables
//!
//! The code set is fixed at compile time; nothing mutates it at runtime.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Valid three-letter codes for the operator's network
pub const AIRPORT_CODES: [&str; 42] = [
    "CGK", "DPS", "SUB", "UPG", "KNO", "BPN", "YIA", "SRG", "SOC", "BDO", "HLP", "BTJ", "PDG",
    "PLM", "PKU", "BTH", "TNJ", "PGK", "TJQ", "BKS", "DJB", "BWX", "PNK", "BDJ", "PKY", "TRK",
    "LOP", "KOE", "LBJ", "MDC", "GTO", "PLW", "KDI", "LUW", "AMQ", "TTE", "DJJ", "SOQ", "MKW",
    "TIM", "BIK", "MKQ",
];

/// Pseudo-code selecting the network-wide aggregate dataset
pub const AGGREGATE_CODE: &str = "ALL";

/// Primary hubs
pub const PRIMARY_HUBS: [&str; 2] = ["CGK", "DPS"];

/// Default origins for an event at a primary hub (fed by regional hubs)
pub const REGIONAL_HUB_ORIGINS: [&str; 3] = ["SUB", "KNO", "UPG"];

/// Default origins for an event at a regional airport (fed by primary hubs)
pub const PRIMARY_HUB_ORIGINS: [&str; 3] = ["CGK", "DPS", "SUB"];

static AIRPORT_CODE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| AIRPORT_CODES.iter().copied().collect());

/// True when `code` (already normalized to upper case) is in the whitelist
pub fn is_known_code(code: &str) -> bool {
    AIRPORT_CODE_SET.contains(code)
}

pub fn is_primary_hub(code: &str) -> bool {
    PRIMARY_HUBS.contains(&code)
}

/// Display name used in prompts and baseline lookups
pub fn airport_name(code: &str) -> &'static str {
    match code {
        "CGK" => "Soekarno-Hatta (CGK)",
        "DPS" => "I Gusti Ngurah Rai (DPS)",
        _ => "All Airports (Aggregate)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_set_has_no_duplicates() {
        assert_eq!(AIRPORT_CODE_SET.len(), AIRPORT_CODES.len());
    }

    #[test]
    fn test_every_default_origin_is_known() {
        for code in REGIONAL_HUB_ORIGINS.iter().chain(PRIMARY_HUB_ORIGINS.iter()) {
            assert!(is_known_code(code), "{} missing from code set", code);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(is_known_code("KNO"));
        assert!(!is_known_code("kno"));
        assert!(!is_known_code("KUL"));
    }
}
