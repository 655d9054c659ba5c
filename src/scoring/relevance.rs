//! Topical relevance, scored 0-10 from five independently capped components.
//!
//! | Component | Cap |
//! |-----------|-----|
//! | Primary keywords | 3.0 |
//! | Secondary keywords | 2.0 |
//! | Geographic relevance | 2.0 |
//! | Economic impact | 2.0 |
//! | Timeliness | 1.0 |

use super::clamp_score;
use super::keywords::keyword_coverage;
use crate::tables::{ECONOMIC_IMPACT_KEYWORDS, GEOGRAPHIC_KEYWORDS, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS};
use crate::text::TokenIndex;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const PRIMARY_CAP: f64 = 3.0;
pub const SECONDARY_CAP: f64 = 2.0;
pub const GEOGRAPHIC_CAP: f64 = 2.0;
pub const ECONOMIC_IMPACT_CAP: f64 = 2.0;
pub const TIMELINESS_CAP: f64 = 1.0;

/// Timeliness credit when recency cannot be judged.
pub const DEFAULT_TIMELINESS: f64 = 0.5;

/// Per-component relevance contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct RelevanceBreakdown {
    pub primary_keywords: f64,
    pub secondary_keywords: f64,
    pub geographic_relevance: f64,
    pub economic_impact: f64,
    pub timeliness: f64,
}

impl RelevanceBreakdown {
    /// Sum of the components, clamped to `[0, 10]`.
    pub fn total(&self) -> f64 {
        clamp_score(
            self.primary_keywords
                + self.secondary_keywords
                + self.geographic_relevance
                + self.economic_impact
                + self.timeliness,
        )
    }
}

/// Score the relevance components of an article's normalized text.
pub fn score_relevance(
    index: &TokenIndex,
    published_at: Option<DateTime<Utc>>,
    reference_time: Option<DateTime<Utc>>,
) -> RelevanceBreakdown {
    RelevanceBreakdown {
        primary_keywords: keyword_coverage(index, PRIMARY_KEYWORDS, PRIMARY_CAP),
        secondary_keywords: keyword_coverage(index, SECONDARY_KEYWORDS, SECONDARY_CAP),
        geographic_relevance: keyword_coverage(index, GEOGRAPHIC_KEYWORDS, GEOGRAPHIC_CAP),
        economic_impact: keyword_coverage(index, ECONOMIC_IMPACT_KEYWORDS, ECONOMIC_IMPACT_CAP),
        timeliness: timeliness(published_at, reference_time),
    }
}

/// Recency credit in `[0, 1]`.
///
/// Without both a publish time and a reference time this is the fixed
/// [`DEFAULT_TIMELINESS`]; the wall clock is never consulted.
pub fn timeliness(published_at: Option<DateTime<Utc>>, reference_time: Option<DateTime<Utc>>) -> f64 {
    let (Some(published), Some(reference)) = (published_at, reference_time) else {
        return DEFAULT_TIMELINESS;
    };

    let age = reference - published;
    let score: f64 = if age <= Duration::hours(6) {
        1.0
    } else if age <= Duration::hours(24) {
        0.75
    } else if age <= Duration::hours(72) {
        0.5
    } else {
        0.25
    };
    score.min(TIMELINESS_CAP)
}
