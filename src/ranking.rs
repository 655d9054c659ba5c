//! The ranking pipeline.
//!
//! ```text
//! quality gate -> dedup -> score -> stable sort (final_score desc) -> top-K
//! ```
//!
//! Two ranking modes coexist and are chosen by the caller through the
//! `keywords` argument: a non-empty keyword list selects keyword-boosted
//! ranking, anything else the weighted default.

use crate::dedup::{Admission, DedupSet, SimilarityThreshold};
use crate::models::{ArticleRecord, ScoredArticle};
use crate::quality::{self, GateVerdict};
use crate::scoring::{ScoreMode, Scorer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Number of articles returned when the caller does not say otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// Per-stage counts of one ranking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RankStats {
    pub input: usize,
    pub rejected_by_gate: usize,
    pub duplicates: usize,
    pub scored: usize,
    pub returned: usize,
}

/// Trim and lowercase query keywords, dropping blanks.
///
/// Repeats are kept: each supplied keyword adds its own boost.
pub fn clean_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}

/// Sort by `final_score`, highest first, keeping input order among ties.
pub fn sort_by_final_score(articles: &mut [ScoredArticle]) {
    articles.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
}

/// Ranks batches of articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    threshold: SimilarityThreshold,
    scorer: Scorer,
}

impl Ranker {
    pub fn new(threshold: SimilarityThreshold) -> Self {
        Self {
            threshold,
            scorer: Scorer::new(),
        }
    }

    /// Judge timeliness against a fixed reference time.
    pub fn with_reference_time(mut self, reference_time: Option<DateTime<Utc>>) -> Self {
        self.scorer = self.scorer.with_reference_time(reference_time);
        self
    }

    /// Rank one batch with a fresh dedup history.
    pub fn rank(
        &self,
        articles: Vec<ArticleRecord>,
        top_k: usize,
        keywords: Option<&[String]>,
    ) -> Vec<ScoredArticle> {
        self.rank_detailed(articles, top_k, keywords, &mut DedupSet::new()).0
    }

    /// Rank one batch against a dedup history the caller carries forward.
    pub fn rank_with_seen(
        &self,
        articles: Vec<ArticleRecord>,
        top_k: usize,
        keywords: Option<&[String]>,
        seen: &mut DedupSet,
    ) -> Vec<ScoredArticle> {
        self.rank_detailed(articles, top_k, keywords, seen).0
    }

    /// Rank one batch and report how many articles each stage dropped.
    #[instrument(level = "debug", skip_all, fields(input = articles.len(), top_k = top_k, threshold = %self.threshold))]
    pub fn rank_detailed(
        &self,
        articles: Vec<ArticleRecord>,
        top_k: usize,
        keywords: Option<&[String]>,
        seen: &mut DedupSet,
    ) -> (Vec<ScoredArticle>, RankStats) {
        let keywords = keywords.map(clean_keywords).unwrap_or_default();
        let mode = ScoreMode::for_keywords(&keywords);

        let mut stats = RankStats {
            input: articles.len(),
            ..RankStats::default()
        };

        let mut scored = Vec::with_capacity(articles.len());
        for article in articles {
            if let GateVerdict::Rejected(reason) = quality::evaluate(&article) {
                debug!(title = %article.title, ?reason, "Rejected by quality gate");
                stats.rejected_by_gate += 1;
                continue;
            }
            if let Admission::Duplicate(_) = seen.admit(&article, self.threshold) {
                stats.duplicates += 1;
                continue;
            }
            scored.push(self.scorer.score(article, mode, &keywords));
        }
        stats.scored = scored.len();

        sort_by_final_score(&mut scored);
        scored.truncate(top_k);
        stats.returned = scored.len();

        info!(
            input = stats.input,
            rejected = stats.rejected_by_gate,
            duplicates = stats.duplicates,
            returned = stats.returned,
            mode = mode.as_str(),
            "Ranked article batch"
        );

        (scored, stats)
    }
}

/// Rank with the general dedup threshold and a fresh dedup history.
///
/// A non-empty `keywords` list switches to keyword-boosted ranking.
pub fn rank(articles: Vec<ArticleRecord>, top_k: usize, keywords: Option<&[String]>) -> Vec<ScoredArticle> {
    Ranker::new(SimilarityThreshold::GENERAL).rank(articles, top_k, keywords)
}
