//! Near-duplicate detection for a batch of articles.
//!
//! An incoming article is the "same story" as one already accepted when:
//!
//! 1. its content fingerprint (title + first 200 chars of body) or its title
//!    fingerprint matches an accepted one exactly,
//! 2. its canonical URL matches an accepted one (weak secondary key), or
//! 3. the Jaccard overlap of its title tokens with an accepted title reaches
//!    the configured [`SimilarityThreshold`].
//!
//! The accepted state lives in a [`DedupSet`] owned by the caller. Nothing
//! here is global; a fresh set means a fresh history.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::text::{normalize, token_set};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;
use url::{Url, form_urlencoded};

/// Number of body characters folded into the content fingerprint.
pub const BODY_PREFIX_CHARS: usize = 200;

/// Minimum Jaccard title similarity at which two articles count as one story.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimilarityThreshold(f64);

impl SimilarityThreshold {
    /// General cross-source deduplication.
    pub const GENERAL: Self = Self(0.7);
    /// Stricter regime of the multi-source scraper path; only titles that
    /// overlap by at least 80% collapse.
    pub const CROSS_SOURCE: Self = Self(0.8);

    /// Build a threshold, which must lie in `(0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::Validation(format!(
                "similarity threshold must be in (0, 1], got {value}"
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self::GENERAL
    }
}

impl TryFrom<f64> for SimilarityThreshold {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SimilarityThreshold> for f64 {
    fn from(t: SimilarityThreshold) -> f64 {
        t.0
    }
}

impl fmt::Display for SimilarityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`; two empty sets score 0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Query parameters that track the referral rather than name the story.
const TRACKING_PARAMS: &[&str] = &["ref", "fbclid", "gclid", "cmpid", "ncid", "ocid"];

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Key of an absolute URL: host without `www.`, path without trailing slash,
/// and the non-tracking query parameters in sorted order. The fragment is
/// dropped.
///
/// ```ignore
/// assert_eq!(
///     canonical_url("https://www.example.com/article/?utm_source=rss&id=7").as_deref(),
///     Some("example.com/article?id=7")
/// );
/// ```
pub fn canonical_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    let path = parsed.path().trim_end_matches('/');

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if params.is_empty() {
        return Some(format!("{host}{path}"));
    }
    params.sort();
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    Some(format!("{host}{path}?{query}"))
}

/// Identity data derived once per article.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    pub content_hash: String,
    pub title_hash: String,
    pub title_tokens: HashSet<String>,
    pub url_key: Option<String>,
}

impl Fingerprint {
    /// Fingerprint an article; `None` when the title carries no tokens,
    /// since such an article is never matched against anything.
    pub fn of(article: &ArticleRecord) -> Option<Self> {
        let title_norm = normalize(&article.title);
        if title_norm.is_empty() {
            return None;
        }
        let prefix: String = article.body.chars().take(BODY_PREFIX_CHARS).collect();
        let content_norm = normalize(&format!("{} {}", article.title, prefix));

        Some(Self {
            content_hash: sha256_hex(&content_norm.join(" ")),
            title_hash: sha256_hex(&title_norm.join(" ")),
            title_tokens: token_set(&article.title),
            url_key: canonical_url(&article.url),
        })
    }
}

/// Why an article was judged a duplicate.
#[derive(Debug, Clone, PartialEq)]
pub enum DuplicateReason {
    ContentHash,
    TitleHash,
    Url,
    SimilarTitle { similarity: f64 },
}

impl fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateReason::ContentHash => write!(f, "content fingerprint match"),
            DuplicateReason::TitleHash => write!(f, "title fingerprint match"),
            DuplicateReason::Url => write!(f, "same canonical url"),
            DuplicateReason::SimilarTitle { similarity } => {
                write!(f, "title similarity {similarity:.2}")
            }
        }
    }
}

/// Outcome of [`DedupSet::admit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Accepted,
    Duplicate(DuplicateReason),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// The articles accepted so far in one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct DedupSet {
    content_hashes: HashSet<String>,
    title_hashes: HashSet<String>,
    urls: HashSet<String>,
    titles: Vec<HashSet<String>>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted articles recorded.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Check `fingerprint` against the accepted set without recording it.
    pub fn check(&self, fingerprint: &Fingerprint, threshold: SimilarityThreshold) -> Admission {
        if self.content_hashes.contains(&fingerprint.content_hash) {
            return Admission::Duplicate(DuplicateReason::ContentHash);
        }
        if self.title_hashes.contains(&fingerprint.title_hash) {
            return Admission::Duplicate(DuplicateReason::TitleHash);
        }
        if let Some(url) = &fingerprint.url_key {
            if self.urls.contains(url) {
                return Admission::Duplicate(DuplicateReason::Url);
            }
        }
        for seen in &self.titles {
            let similarity = jaccard(&fingerprint.title_tokens, seen);
            if similarity >= threshold.value() {
                return Admission::Duplicate(DuplicateReason::SimilarTitle { similarity });
            }
        }
        Admission::Accepted
    }

    /// Record a fingerprint as accepted.
    pub fn insert(&mut self, fingerprint: Fingerprint) {
        self.content_hashes.insert(fingerprint.content_hash);
        self.title_hashes.insert(fingerprint.title_hash);
        if let Some(url) = fingerprint.url_key {
            self.urls.insert(url);
        }
        self.titles.push(fingerprint.title_tokens);
    }

    /// Check an article and, when it is new, record it.
    ///
    /// Articles whose titles normalize to nothing are always accepted and
    /// never recorded.
    pub fn admit(&mut self, article: &ArticleRecord, threshold: SimilarityThreshold) -> Admission {
        let Some(fingerprint) = Fingerprint::of(article) else {
            return Admission::Accepted;
        };
        let admission = self.check(&fingerprint, threshold);
        match &admission {
            Admission::Accepted => self.insert(fingerprint),
            Admission::Duplicate(reason) => {
                debug!(title = %article.title, source = %article.source, %reason, "Dropping duplicate article");
            }
        }
        admission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, body: &str, source: &str) -> ArticleRecord {
        ArticleRecord::new(title, body, source, "")
    }

    #[test]
    fn test_threshold_presets_and_validation() {
        assert_eq!(SimilarityThreshold::GENERAL.value(), 0.7);
        assert_eq!(SimilarityThreshold::CROSS_SOURCE.value(), 0.8);
        assert_eq!(SimilarityThreshold::default(), SimilarityThreshold::GENERAL);
        assert!(SimilarityThreshold::new(0.0).is_err());
        assert!(SimilarityThreshold::new(1.5).is_err());
        assert!(SimilarityThreshold::new(f64::NAN).is_err());
        assert_eq!(SimilarityThreshold::new(1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn test_threshold_deserialize_rejects_out_of_range() {
        let ok: SimilarityThreshold = serde_json::from_str("0.75").unwrap();
        assert_eq!(ok.value(), 0.75);
        assert!(serde_json::from_str::<SimilarityThreshold>("2.0").is_err());
    }

    #[test]
    fn test_jaccard() {
        let a = token_set("trump new tariffs china");
        let b = token_set("trump tariffs china europe");
        assert!((jaccard(&a, &b) - 3.0 / 5.0).abs() < 1e-9);
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(
            canonical_url("https://www.Reuters.com/world/story/?utm_source=x&fbclid=y#top").as_deref(),
            Some("reuters.com/world/story")
        );
        assert_eq!(
            canonical_url("https://news.example.com/article?page=2&id=101&utm_medium=rss").as_deref(),
            Some("news.example.com/article?id=101&page=2")
        );
        assert_eq!(canonical_url("not a url"), None);
        assert_eq!(canonical_url(""), None);
    }

    #[test]
    fn test_identical_article_rejected() {
        let mut seen = DedupSet::new();
        let a = article("Fed holds rates steady", "The Federal Reserve said...", "Reuters");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert_eq!(
            seen.admit(&a, SimilarityThreshold::GENERAL),
            Admission::Duplicate(DuplicateReason::ContentHash)
        );
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_same_title_different_body_rejected_by_title_hash() {
        let mut seen = DedupSet::new();
        let a = article("Fed holds rates steady", "First report.", "Reuters");
        let b = article("Fed Holds Rates Steady!", "Entirely different text.", "AP");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert_eq!(
            seen.admit(&b, SimilarityThreshold::GENERAL),
            Admission::Duplicate(DuplicateReason::TitleHash)
        );
    }

    #[test]
    fn test_same_url_rejected() {
        let mut seen = DedupSet::new();
        let a = ArticleRecord::new("Fed holds rates", "x", "Reuters", "https://reuters.com/a/");
        let b = ArticleRecord::new("Central bank pauses", "y", "Reuters", "https://www.reuters.com/a?ref=rss");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert_eq!(
            seen.admit(&b, SimilarityThreshold::GENERAL),
            Admission::Duplicate(DuplicateReason::Url)
        );
    }

    #[test]
    fn test_query_identified_stories_kept_apart() {
        let mut seen = DedupSet::new();
        let a = ArticleRecord::new("Fed holds rates steady", "x", "Reuters", "https://news.example.com/article?id=101");
        let b = ArticleRecord::new("Vietnam exports surge", "y", "Reuters", "https://news.example.com/article?id=202");
        let c = ArticleRecord::new("Central bank pauses", "z", "AP", "https://news.example.com/article?utm_source=feed&id=101");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert!(seen.admit(&b, SimilarityThreshold::GENERAL).is_accepted());
        assert_eq!(
            seen.admit(&c, SimilarityThreshold::GENERAL),
            Admission::Duplicate(DuplicateReason::Url)
        );
    }

    #[test]
    fn test_content_hash_does_not_match_earlier_title() {
        // "fed holds" + "rates steady" normalizes to the first title exactly
        let mut seen = DedupSet::new();
        let a = article("Fed holds rates steady", "The Federal Reserve said...", "Reuters");
        let b = article("Fed holds", "Rates steady.", "Blog");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert!(seen.admit(&b, SimilarityThreshold::GENERAL).is_accepted());
    }

    #[test]
    fn test_threshold_regimes_differ() {
        // 3 shared tokens of 4 in the union: 0.75
        let a = article("Trump tariffs China Monday", "a", "Reuters");
        let b = article("Trump tariffs China", "b", "AP");

        let mut general = DedupSet::new();
        general.admit(&a, SimilarityThreshold::GENERAL);
        assert!(matches!(
            general.admit(&b, SimilarityThreshold::GENERAL),
            Admission::Duplicate(DuplicateReason::SimilarTitle { .. })
        ));

        let mut strict = DedupSet::new();
        strict.admit(&a, SimilarityThreshold::CROSS_SOURCE);
        assert!(strict.admit(&b, SimilarityThreshold::CROSS_SOURCE).is_accepted());
    }

    #[test]
    fn test_distinct_stories_accepted() {
        let mut seen = DedupSet::new();
        let a = article("Fed holds rates steady", "a", "Reuters");
        let b = article("Oil prices jump after OPEC cut", "b", "Bloomberg");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert!(seen.admit(&b, SimilarityThreshold::GENERAL).is_accepted());
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_empty_title_never_duplicate() {
        let mut seen = DedupSet::new();
        let a = article("", "same body", "Reuters");
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert!(seen.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_sets_are_independent() {
        let a = article("Fed holds rates steady", "a", "Reuters");
        let mut first = DedupSet::new();
        let mut second = DedupSet::new();
        assert!(first.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
        assert!(second.admit(&a, SimilarityThreshold::GENERAL).is_accepted());
    }
}
