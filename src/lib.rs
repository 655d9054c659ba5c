//! # News Ranker
//!
//! Scores, deduplicates and ranks batches of aggregated news articles.
//!
//! The crate consumes plain [`ArticleRecord`]s from upstream fetchers and
//! returns the top-K [`ScoredArticle`]s, each carrying a relevance score, an
//! appeal score, the final ranking key and a breakdown of every component.
//!
//! ## Pipeline
//!
//! 1. **Quality gate** ([`quality`]): drop records with no usable signal
//! 2. **Deduplication** ([`dedup`]): fingerprints plus Jaccard title overlap
//! 3. **Scoring** ([`scoring`]): relevance and appeal, 0-10 each
//! 4. **Ranking** ([`ranking`]): stable sort by final score, truncate to K
//!
//! ## Usage
//!
//! ```ignore
//! use news_ranker::{rank, ArticleRecord};
//!
//! let articles = vec![ArticleRecord::new(
//!     "Trump Announces New Tariffs on China",
//!     "President Trump said tariffs of 60% ...",
//!     "Reuters",
//!     "https://example.com/tariffs",
//! )];
//! let top = rank(articles, 3, None);
//! ```
//!
//! The core is synchronous and performs no I/O. The [`config`], [`input`]
//! and [`outputs`] modules serve the command-line binary.

pub mod config;
pub mod dedup;
pub mod error;
pub mod input;
pub mod models;
pub mod outputs;
pub mod quality;
pub mod ranking;
pub mod scoring;
pub mod tables;
pub mod text;
pub mod utils;

pub use dedup::{DedupSet, SimilarityThreshold};
pub use error::{Error, Result};
pub use models::{ArticleRecord, RankedPage, ScoredArticle};
pub use ranking::{rank, RankStats, Ranker, DEFAULT_TOP_K};
pub use scoring::{ScoreBreakdown, ScoreMode};
