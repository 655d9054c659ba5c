//! Reader appeal, scored 0-10 independently of topical fit.

use super::clamp_score;
use super::keywords::keyword_coverage;
use crate::models::ArticleRecord;
use crate::tables::{source_credibility, CONTROVERSY_KEYWORDS, ENGAGEMENT_KEYWORDS, POWER_WORDS};
use crate::text::TokenIndex;
use serde::{Deserialize, Serialize};

pub const HEADLINE_CAP: f64 = 3.0;
pub const CONTENT_QUALITY_CAP: f64 = 2.0;
pub const CONTROVERSY_CAP: f64 = 2.0;
pub const CREDIBILITY_CAP: f64 = 2.0;
pub const ENGAGEMENT_CAP: f64 = 1.0;

const ENGAGEMENT_PER_KEYWORD: f64 = 0.2;

/// Per-component appeal contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct AppealBreakdown {
    pub headline_appeal: f64,
    pub content_quality: f64,
    pub controversy_factor: f64,
    pub source_credibility: f64,
    pub engagement_potential: f64,
}

impl AppealBreakdown {
    /// Sum of the components, clamped to `[0, 10]`.
    pub fn total(&self) -> f64 {
        clamp_score(
            self.headline_appeal
                + self.content_quality
                + self.controversy_factor
                + self.source_credibility
                + self.engagement_potential,
        )
    }
}

/// Score the appeal components of an article. `index` must be built from
/// [`ArticleRecord::full_text`].
pub fn score_appeal(article: &ArticleRecord, index: &TokenIndex) -> AppealBreakdown {
    AppealBreakdown {
        headline_appeal: headline_appeal(&article.title),
        content_quality: content_quality(&article.body),
        controversy_factor: keyword_coverage(index, CONTROVERSY_KEYWORDS, CONTROVERSY_CAP),
        source_credibility: source_credibility(&article.source).min(CREDIBILITY_CAP),
        engagement_potential: engagement_potential(index),
    }
}

/// Headline structure: length sweet spot, power words, punctuation, numbers.
pub fn headline_appeal(title: &str) -> f64 {
    let title = title.trim();
    let len = title.chars().count();
    let mut score = 0.0;

    if (30..=100).contains(&len) {
        score += 1.0;
    } else if (20..=120).contains(&len) {
        score += 0.5;
    }

    let title_index = TokenIndex::new(title);
    if POWER_WORDS.iter().any(|w| title_index.contains(w)) {
        score += 0.3;
    }

    if title.ends_with('?') || title.ends_with('!') {
        score += 0.5;
    }

    if title.chars().any(|c| c.is_ascii_digit()) {
        score += 0.5;
    }

    f64::min(score, HEADLINE_CAP)
}

/// Body heuristics: length, sentence count, quoted speech.
pub fn content_quality(body: &str) -> f64 {
    let len = body.chars().count();
    let mut score = 0.0;

    if (200..=2000).contains(&len) {
        score += 1.0;
    } else if (100..=3000).contains(&len) {
        score += 0.5;
    }

    let sentences = body.split('.').count();
    if (3..=20).contains(&sentences) {
        score += 0.5;
    }

    if body.contains(['"', '\u{201c}', '\u{201d}']) {
        score += 0.5;
    }

    f64::min(score, CONTENT_QUALITY_CAP)
}

/// +0.2 for each distinct engagement keyword present, capped at 1.0.
pub fn engagement_potential(index: &TokenIndex) -> f64 {
    let found = ENGAGEMENT_KEYWORDS.iter().filter(|kw| index.contains(kw)).count();
    f64::min(found as f64 * ENGAGEMENT_PER_KEYWORD, ENGAGEMENT_CAP)
}
