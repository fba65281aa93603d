//! Source Scorer
//!
//! Matches a generated claim against the grounding chunks returned with the
//! generation, so that only citations that actually mention the claim are
//! attached to it.
//!
//! **Scoring (per candidate):**
//! - +3 per claim token found in the candidate title, +1 per token in the URI
//! - for each high-specificity entity named in the claim: +10 if the
//!   candidate mentions it, −10 if not
//! - +5 if the candidate title contains the target year
//!
//! **Decision:** best score > 5 → verified citation. Otherwise a disaster
//! claim with a negative best score is rejected; anything else gets a
//! synthesized web-search link.

use url::Url;

use crate::models::{EventCategory, GroundingChunk};

/// Minimum score (exclusive) for a candidate to count as a verified source
pub const ACCEPT_THRESHOLD: i32 = 5;

const TITLE_TOKEN_POINTS: i32 = 3;
const URI_TOKEN_POINTS: i32 = 1;
const ENTITY_POINTS: i32 = 10;
const YEAR_POINTS: i32 = 5;

const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Words too generic to discriminate between sources
const STOP_WORDS: [&str; 13] = [
    "di", "dan", "ke", "dari", "yang", "pada", "untuk", "jakarta", "indonesia", "warning",
    "peringatan", "status", "level",
];

/// Named volcanoes, headline events and disaster keywords that a citation
/// must mention when the claim does
const ENTITIES: [&str; 11] = [
    "lewotobi", "merapi", "semeru", "sinabung", "marapi", "ibu", "coldplay", "banjir",
    "presiden", "konser", "festival",
];

/// What to do with a claim after scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDecision {
    /// Attach this grounding URI as a verified source
    Verified(String),
    /// Attach a synthesized search link
    Fallback(String),
    /// Drop the claim as likely fabricated
    Reject,
}

/// Result of scoring one claim against all candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMatch {
    /// Best-scoring candidate, if there were any candidates
    pub best: Option<GroundingChunk>,
    /// Score of `best`; 0 when there were no candidates
    pub score: i32,
    /// Search link used when `best` is not accepted
    pub fallback_uri: String,
}

impl SourceMatch {
    pub fn is_verified(&self) -> bool {
        self.best.is_some() && self.score > ACCEPT_THRESHOLD
    }

    /// The link to attach: verified URI, or the search fallback
    pub fn uri(&self) -> &str {
        match &self.best {
            Some(chunk) if self.is_verified() => &chunk.uri,
            _ => &self.fallback_uri,
        }
    }

    /// Apply the category-specific acceptance rule
    pub fn decide(&self, category: EventCategory) -> SourceDecision {
        if self.is_verified() {
            return SourceDecision::Verified(self.uri().to_string());
        }
        if category == EventCategory::Disaster && self.score < 0 {
            return SourceDecision::Reject;
        }
        SourceDecision::Fallback(self.fallback_uri.clone())
    }
}

/// Scores claims for one scan (one target year)
#[derive(Debug, Clone, Copy)]
pub struct SourceScorer {
    target_year: i32,
}

impl SourceScorer {
    pub fn new(target_year: i32) -> Self {
        Self { target_year }
    }

    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    /// Find the best candidate for a claim title
    ///
    /// Unusable chunks (empty title or URI) are ignored. Ties keep the
    /// earlier candidate.
    pub fn resolve(&self, title: &str, candidates: &[GroundingChunk]) -> SourceMatch {
        let tokens = tokenize(title);
        let title_lower = title.to_lowercase();
        let entities: Vec<&str> = ENTITIES
            .iter()
            .copied()
            .filter(|entity| title_lower.contains(entity))
            .collect();

        let mut best: Option<(&GroundingChunk, i32)> = None;
        for chunk in candidates.iter().filter(|c| c.is_usable()) {
            let score = self.score_candidate(&tokens, &entities, chunk);
            tracing::trace!(uri = %chunk.uri, score, "Scored grounding candidate");
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((chunk, score));
            }
        }

        let (best, score) = match best {
            Some((chunk, score)) => (Some(chunk.clone()), score),
            None => (None, 0),
        };

        SourceMatch {
            best,
            score,
            fallback_uri: self.search_uri(title),
        }
    }

    fn score_candidate(&self, tokens: &[String], entities: &[&str], chunk: &GroundingChunk) -> i32 {
        let chunk_title = chunk.title.to_lowercase();
        let chunk_uri = chunk.uri.to_lowercase();
        let mut score = 0;

        for token in tokens {
            if chunk_title.contains(token.as_str()) {
                score += TITLE_TOKEN_POINTS;
            }
            if chunk_uri.contains(token.as_str()) {
                score += URI_TOKEN_POINTS;
            }
        }

        for entity in entities {
            if chunk_title.contains(entity) || chunk_uri.contains(entity) {
                score += ENTITY_POINTS;
            } else {
                score -= ENTITY_POINTS;
            }
        }

        if chunk_title.contains(&self.target_year.to_string()) {
            score += YEAR_POINTS;
        }

        score
    }

    /// Web-search link for `"<title> <year> news"`
    pub fn search_uri(&self, title: &str) -> String {
        let query = format!("{} {} news", title.trim(), self.target_year);
        match Url::parse_with_params(SEARCH_ENDPOINT, &[("q", query.as_str())]) {
            Ok(url) => url.into(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build search link");
                SEARCH_ENDPOINT.to_string()
            }
        }
    }
}

/// Lowercase, strip non-word characters, drop short tokens, stop words and
/// bare years
pub fn tokenize(title: &str) -> Vec<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| !is_bare_year(word))
        .map(str::to_string)
        .collect()
}

fn is_bare_year(word: &str) -> bool {
    word.len() == 4 && word.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(title: &str, uri: &str) -> GroundingChunk {
        GroundingChunk::new(title, uri)
    }

    #[test]
    fn test_tokenize_filters_noise() {
        let tokens = tokenize("Status Level III: Erupsi Gunung Lewotobi di Flores, 2025!");
        assert_eq!(tokens, vec!["iii", "erupsi", "gunung", "lewotobi", "flores"]);
    }

    #[test]
    fn test_matching_candidate_is_verified() {
        let scorer = SourceScorer::new(2025);
        let candidates = vec![
            chunk("Cuaca cerah di Bali", "https://example.com/cuaca"),
            chunk(
                "Konser Coldplay Jakarta 2025 resmi digelar",
                "https://news.example.com/konser-coldplay",
            ),
        ];

        let result = scorer.resolve("Konser Coldplay GBK", &candidates);
        assert!(result.is_verified());
        assert_eq!(result.uri(), "https://news.example.com/konser-coldplay");
        assert_eq!(
            result.decide(EventCategory::Concert),
            SourceDecision::Verified("https://news.example.com/konser-coldplay".to_string())
        );
    }

    #[test]
    fn test_unmentioned_entity_gets_fallback_link() {
        let scorer = SourceScorer::new(2025);
        let candidates = vec![
            chunk("Erupsi gunung di Jawa Timur", "https://example.com/erupsi-gunung"),
            chunk("Jadwal penerbangan Desember", "https://example.com/jadwal"),
        ];

        let result = scorer.resolve("Erupsi Gunung Merapi", &candidates);
        assert!(!result.is_verified());
        assert!(result.uri().starts_with("https://www.google.com/search?q="));
        assert!(result.uri().contains("Merapi"));
        assert!(candidates.iter().all(|c| c.uri != result.uri()));
    }

    #[test]
    fn test_unverified_disaster_with_negative_score_rejected() {
        let scorer = SourceScorer::new(2025);
        let candidates = vec![chunk("Jadwal penerbangan Desember", "https://example.com/jadwal")];

        let result = scorer.resolve("Erupsi Merapi", &candidates);
        assert!(result.score < 0);
        assert_eq!(result.decide(EventCategory::Disaster), SourceDecision::Reject);
        assert!(matches!(
            result.decide(EventCategory::Weather),
            SourceDecision::Fallback(_)
        ));
    }

    #[test]
    fn test_no_candidates_never_rejects() {
        let scorer = SourceScorer::new(2026);
        let result = scorer.resolve("Banjir Semarang", &[]);
        assert_eq!(result.score, 0);
        assert!(result.best.is_none());
        assert!(matches!(
            result.decide(EventCategory::Disaster),
            SourceDecision::Fallback(_)
        ));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let scorer = SourceScorer::new(2025);
        // two title tokens → 6
        let verified = scorer.resolve("Pesta Tari Bali", &[chunk("Tari Bali", "https://x.test/a")]);
        assert_eq!(verified.score, 6);
        assert!(verified.is_verified());

        // single title token (+3) and URI token (+1) → 4, not enough
        let weak = scorer.resolve("Pesta Tari", &[chunk("Tari", "https://x.test/tari")]);
        assert_eq!(weak.score, 4);
        assert!(!weak.is_verified());
    }

    #[test]
    fn test_year_bonus_and_tie_keeps_first() {
        let scorer = SourceScorer::new(2025);
        let candidates = vec![
            chunk("Pameran UMKM Surabaya", "https://a.test/1"),
            chunk("Pameran UMKM Surabaya", "https://b.test/2"),
            chunk("Pameran UMKM Surabaya 2025", "https://c.test/3"),
        ];
        let result = scorer.resolve("Pameran UMKM Surabaya", &candidates);
        assert_eq!(result.score, 9 + 5);
        assert_eq!(result.uri(), "https://c.test/3");

        let tied = scorer.resolve("Pameran UMKM Surabaya", &candidates[..2]);
        assert_eq!(tied.uri(), "https://a.test/1");
    }

    #[test]
    fn test_unusable_chunks_ignored() {
        let scorer = SourceScorer::new(2025);
        let result = scorer.resolve(
            "Konser Coldplay",
            &[chunk("", "https://x.test/konser-coldplay"), chunk("Konser Coldplay", "")],
        );
        assert!(result.best.is_none());
    }

    #[test]
    fn test_search_uri_encodes_query() {
        let scorer = SourceScorer::new(2025);
        let uri = scorer.search_uri("Banjir & Longsor");
        assert_eq!(
            uri,
            "https://www.google.com/search?q=Banjir+%26+Longsor+2025+news"
        );
    }
}
