//! Keyword-based sub-scores shared by the relevance and appeal scorers, and
//! the query boost used by keyword-ranked runs.

use crate::models::ArticleRecord;
use crate::text::TokenIndex;

/// Share of a component's cap awarded for breadth of coverage.
const COVERAGE_SHARE: f64 = 0.7;
/// Share of a component's cap reachable through repeated mentions.
const FREQUENCY_SHARE: f64 = 0.3;
/// Credit per mention before the frequency cap applies.
const PER_MENTION: f64 = 0.1;

/// Coverage score of `keywords` in `index`, capped at `max_score`.
///
/// ```text
/// coverage  = found / len(keywords) * max_score * 0.7
/// frequency = min(mentions * 0.1, max_score * 0.3)
/// score     = min(coverage + frequency, max_score)
/// ```
///
/// An empty keyword list scores 0.
pub fn keyword_coverage(index: &TokenIndex, keywords: &[&str], max_score: f64) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let mut found = 0usize;
    let mut mentions = 0usize;
    for keyword in keywords {
        let count = index.count(keyword);
        if count > 0 {
            found += 1;
            mentions += count;
        }
    }

    let coverage = found as f64 / keywords.len() as f64 * max_score * COVERAGE_SHARE;
    let frequency = (mentions as f64 * PER_MENTION).min(max_score * FREQUENCY_SHARE);
    (coverage + frequency).min(max_score)
}

/// Weight of a query keyword found in the title.
pub const TITLE_MATCH_WEIGHT: f64 = 3.0;
/// Weight of a query keyword found in the body.
pub const BODY_MATCH_WEIGHT: f64 = 1.0;

/// Query boost: `Σ title_occurrences * 3 + body_occurrences * 1`.
///
/// Keywords are trimmed and lowercased here as well as in
/// [`crate::ranking::clean_keywords`]. Matching is case-insensitive and
/// counts non-overlapping substring occurrences, so "tariff" also credits
/// "tariffs". The result is deliberately unbounded.
pub fn keyword_boost(article: &ArticleRecord, keywords: &[String]) -> f64 {
    let title = article.title.to_lowercase();
    let body = article.body.to_lowercase();

    keywords
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .map(|kw| {
            let in_title = title.matches(kw.as_str()).count() as f64;
            let in_body = body.matches(kw.as_str()).count() as f64;
            in_title * TITLE_MATCH_WEIGHT + in_body * BODY_MATCH_WEIGHT
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_keyword_list_scores_zero() {
        let index = TokenIndex::new("Trump tariffs China");
        assert_eq!(keyword_coverage(&index, &[], 3.0), 0.0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let index = TokenIndex::new("Local weather sunny tomorrow");
        assert_eq!(keyword_coverage(&index, &["trade", "tariff"], 3.0), 0.0);
    }

    #[test]
    fn test_coverage_plus_frequency() {
        // 2 of 4 keywords found, 3 mentions in total
        let index = TokenIndex::new("Trade talks: trade deficit widens as tariff row grows");
        let score = keyword_coverage(&index, &["trade", "tariff", "tax", "China"], 3.0);
        let expected = 2.0 / 4.0 * 3.0 * 0.7 + 3.0 * 0.1;
        assert!(close(score, expected), "score {score} expected {expected}");
    }

    #[test]
    fn test_frequency_bonus_is_capped() {
        let text = "inflation ".repeat(50);
        let index = TokenIndex::new(&text);
        let score = keyword_coverage(&index, &["inflation", "growth"], 2.0);
        // coverage 0.7, frequency capped at 0.6
        assert!(close(score, 1.3));
    }

    #[test]
    fn test_never_exceeds_cap() {
        let index = TokenIndex::new(&"growth inflation gdp ".repeat(20));
        let score = keyword_coverage(&index, &["growth", "inflation", "GDP"], 2.0);
        assert!(close(score, 2.0));
    }

    #[test]
    fn test_keyword_boost_weights_title_over_body() {
        let article = ArticleRecord::new(
            "Tariff news",
            "New tariffs announced; tariff details follow.",
            "Reuters",
            "",
        );
        let boost = keyword_boost(&article, &["tariff".to_string()]);
        // 1 in title * 3 + 2 in body * 1
        assert!(close(boost, 5.0));
    }

    #[test]
    fn test_keyword_boost_sums_keywords() {
        let article = ArticleRecord::new("China trade", "china china", "AP", "");
        let boost = keyword_boost(&article, &["china".to_string(), "trade".to_string()]);
        assert!(close(boost, 3.0 + 2.0 + 3.0));
    }

    #[test]
    fn test_keyword_boost_ignores_keyword_case() {
        let article = ArticleRecord::new("Tariff talks resume", "New tariffs loom.", "AP", "");
        let upper = keyword_boost(&article, &[" Tariff ".to_string()]);
        let lower = keyword_boost(&article, &["tariff".to_string()]);
        assert_eq!(upper, lower);
        assert_eq!(upper, 4.0);
    }

    #[test]
    fn test_keyword_boost_no_keywords() {
        let article = ArticleRecord::new("China trade", "china", "AP", "");
        assert_eq!(keyword_boost(&article, &[]), 0.0);
        assert_eq!(keyword_boost(&article, &[String::new()]), 0.0);
    }
}
