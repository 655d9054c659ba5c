//! Article scoring.
//!
//! Every article receives a relevance score and an appeal score, each in
//! `[0, 10]`, plus a [`ScoreBreakdown`] recording every component. The final
//! ranking key depends on the [`ScoreMode`]:
//!
//! - **Weighted**: `0.6 * relevance + 0.4 * appeal`
//! - **Keyword-boosted**: `relevance + appeal + keyword_boost`
//!
//! # Submodules
//!
//! - [`keywords`]: keyword-coverage sub-score and the query boost
//! - [`relevance`]: topical relevance components
//! - [`appeal`]: reader appeal components

pub mod appeal;
pub mod keywords;
pub mod relevance;

use crate::models::{ArticleRecord, ScoredArticle};
use crate::text::TokenIndex;
use appeal::{score_appeal, AppealBreakdown};
use chrono::{DateTime, Utc};
use keywords::keyword_boost;
use relevance::{score_relevance, RelevanceBreakdown};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Upper bound of the relevance and appeal scores.
pub const MAX_SCORE: f64 = 10.0;

/// Weight of relevance in weighted mode.
pub const RELEVANCE_WEIGHT: f64 = 0.6;
/// Weight of appeal in weighted mode.
pub const APPEAL_WEIGHT: f64 = 0.4;

/// Clamp a summed score to `[0, MAX_SCORE]`.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}

/// How the final score is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    #[default]
    Weighted,
    KeywordBoosted,
}

impl ScoreMode {
    /// Keyword-boosted when any (cleaned) keyword is present.
    pub fn for_keywords(keywords: &[String]) -> Self {
        if keywords.is_empty() {
            ScoreMode::Weighted
        } else {
            ScoreMode::KeywordBoosted
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreMode::Weighted => "weighted",
            ScoreMode::KeywordBoosted => "keyword_boosted",
        }
    }
}

/// Every contribution to an article's scores, captured once at scoring time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreBreakdown {
    pub relevance: RelevanceBreakdown,
    pub appeal: AppealBreakdown,
    /// Query match boost; present only in keyword-boosted mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_boost: Option<f64>,
    pub mode: ScoreMode,
    pub relevance_weight: f64,
    pub appeal_weight: f64,
}

/// Turns [`ArticleRecord`]s into [`ScoredArticle`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    reference_time: Option<DateTime<Utc>>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judge timeliness against `reference_time` instead of the fixed default.
    pub fn with_reference_time(mut self, reference_time: Option<DateTime<Utc>>) -> Self {
        self.reference_time = reference_time;
        self
    }

    /// Score one article. `keywords` is ignored in weighted mode.
    pub fn score(&self, article: ArticleRecord, mode: ScoreMode, keywords: &[String]) -> ScoredArticle {
        let index = TokenIndex::new(&article.full_text());
        let relevance = score_relevance(&index, article.published_at, self.reference_time);
        let appeal = score_appeal(&article, &index);

        let relevance_score = relevance.total();
        let appeal_score = appeal.total();

        let (final_score, breakdown) = match mode {
            ScoreMode::Weighted => (
                RELEVANCE_WEIGHT * relevance_score + APPEAL_WEIGHT * appeal_score,
                ScoreBreakdown {
                    relevance,
                    appeal,
                    keyword_boost: None,
                    mode,
                    relevance_weight: RELEVANCE_WEIGHT,
                    appeal_weight: APPEAL_WEIGHT,
                },
            ),
            ScoreMode::KeywordBoosted => {
                let boost = keyword_boost(&article, keywords);
                (
                    relevance_score + appeal_score + boost,
                    ScoreBreakdown {
                        relevance,
                        appeal,
                        keyword_boost: Some(boost),
                        mode,
                        relevance_weight: 1.0,
                        appeal_weight: 1.0,
                    },
                )
            }
        };

        trace!(
            title = %article.title,
            relevance_score,
            appeal_score,
            final_score,
            mode = mode.as_str(),
            "Scored article"
        );

        ScoredArticle {
            article,
            relevance_score,
            appeal_score,
            final_score,
            score_breakdown: breakdown,
        }
    }
}
