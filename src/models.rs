//! Data models for incoming articles and their ranked representations.
//!
//! - [`ArticleRecord`]: a raw article as handed over by a fetcher
//! - [`ScoredArticle`]: an article after scoring, with its breakdown
//! - [`RankedPage`]: one ranking run, as written to the JSON and Markdown outputs

use crate::scoring::ScoreBreakdown;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// A raw news article as produced by a fetcher.
///
/// Missing text fields deserialize to empty strings; such records are
/// filtered by the quality gate rather than rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The headline.
    #[serde(default)]
    pub title: String,
    /// Article text. Accepts `content` as an alias.
    #[serde(default, alias = "content")]
    pub body: String,
    /// Short publisher label, e.g. "Reuters".
    #[serde(default)]
    pub source: String,
    /// Absolute URL of the article.
    #[serde(default)]
    pub url: String,
    /// Publication time, when the fetcher knows it. See [`parse_timestamp`]
    /// for the accepted spellings.
    #[serde(
        default,
        alias = "published_date",
        deserialize_with = "deserialize_published_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        source: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            source: source.into(),
            url: url.into(),
            published_at: None,
        }
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Title and body joined with a space, the text every keyword scorer reads.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Parse a fetcher timestamp.
///
/// Accepts RFC 3339 and naive ISO 8601 (`2025-05-06T14:30:00.123456`, read
/// as UTC). Blank strings mean "unknown".
///
/// # Returns
///
/// `None` for blank or unparseable input. Unparseable input is logged at
/// `warn` and otherwise ignored; a bad date never costs the article.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    warn!(timestamp = %raw, "Ignoring unparseable publication time");
    None
}

fn deserialize_published_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// An article after scoring.
///
/// Scores are fixed at construction; the breakdown records each component
/// exactly as it was computed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoredArticle {
    pub article: ArticleRecord,
    /// Topical fit, in `[0, 10]`.
    pub relevance_score: f64,
    /// Reader appeal, in `[0, 10]`.
    pub appeal_score: f64,
    /// Ranking key. In `[0, 10]` for weighted ranking, unbounded when a
    /// keyword boost is applied.
    pub final_score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// The outcome of one ranking run, organised for output.
#[derive(Debug, Deserialize, Serialize)]
pub struct RankedPage {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Edition name: "morning", "afternoon", or "evening".
    pub time_of_day: String,
    /// The exact local time of the run.
    pub local_time: String,
    /// "weighted" or "keyword_boosted".
    pub mode: String,
    /// Query keywords, when a keyword-boosted ranking was requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub top_k: usize,
    pub stats: crate::ranking::RankStats,
    /// Ranked articles, best first.
    pub articles: Vec<ScoredArticle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_article_record_deserialize_minimal() {
        let json = r#"{"title": "Markets rally after rate cut"}"#;
        let article: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Markets rally after rate cut");
        assert_eq!(article.body, "");
        assert_eq!(article.source, "");
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_article_record_aliases() {
        let json = r#"{
            "title": "Fed holds rates",
            "content": "The Federal Reserve said on Wednesday...",
            "source": "Reuters",
            "url": "https://example.com/fed",
            "published_date": "2025-05-06T14:30:00Z"
        }"#;
        let article: ArticleRecord = serde_json::from_str(json).unwrap();
        assert!(article.body.starts_with("The Federal Reserve"));
        assert_eq!(
            article.published_at,
            Some(Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_article_record_wrong_type_fails() {
        let json = r#"{"title": 42, "body": "text"}"#;
        let result: Result<ArticleRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_article_record_unparseable_timestamp_is_unknown() {
        let json = r#"{"title": "Fed holds rates", "published_at": "yesterday"}"#;
        let article: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Fed holds rates");
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_article_record_naive_and_blank_timestamps() {
        let naive: ArticleRecord =
            serde_json::from_str(r#"{"title": "Fed holds rates", "published_date": "2025-05-06T14:30:00.123456"}"#)
                .unwrap();
        assert_eq!(
            naive.published_at,
            Some(Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap() + chrono::Duration::microseconds(123456))
        );

        let blank: ArticleRecord = serde_json::from_str(r#"{"title": "Fed holds rates", "published_date": ""}"#).unwrap();
        assert!(blank.published_at.is_none());

        let null: ArticleRecord = serde_json::from_str(r#"{"title": "Fed holds rates", "published_at": null}"#).unwrap();
        assert!(null.published_at.is_none());
    }

    #[test]
    fn test_article_record_timestamp_wrong_type_fails() {
        let json = r#"{"title": "Fed holds rates", "published_at": 1746541800}"#;
        let result: Result<ArticleRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_timestamp_offsets() {
        assert_eq!(
            parse_timestamp("2025-05-06T16:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2025-05-06 14:30:00"),
            Some(Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap())
        );
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("May 6th"), None);
    }

    #[test]
    fn test_full_text() {
        let article = ArticleRecord::new("Title", "Body text", "AP", "https://apnews.com/x");
        assert_eq!(article.full_text(), "Title Body text");
    }

    #[test]
    fn test_serialization_skips_missing_timestamp() {
        let article = ArticleRecord::new("Title", "Body", "AP", "");
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("published_at"));
    }
}
