//! Ranking configuration loaded from an optional YAML file.
//!
//! ```yaml
//! top_k: 5
//! dedup: cross_source        # or "general"
//! similarity_threshold: 0.75 # overrides the preset when present
//! keywords: [tariff, china]
//! reference_time: 2025-05-06T12:00:00Z
//! ```
//!
//! Every field is optional. Command-line flags take precedence over the file.

use crate::dedup::SimilarityThreshold;
use crate::error::Result;
use crate::ranking::{Ranker, DEFAULT_TOP_K};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

/// Named dedup threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DedupPreset {
    /// 0.7: general cross-source deduplication.
    #[default]
    General,
    /// 0.8: the stricter multi-source scraper regime.
    CrossSource,
}

impl DedupPreset {
    pub fn threshold(self) -> SimilarityThreshold {
        match self {
            DedupPreset::General => SimilarityThreshold::GENERAL,
            DedupPreset::CrossSource => SimilarityThreshold::CROSS_SOURCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RankerConfig {
    pub top_k: usize,
    pub dedup: DedupPreset,
    pub similarity_threshold: Option<SimilarityThreshold>,
    pub keywords: Vec<String>,
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            dedup: DedupPreset::General,
            similarity_threshold: None,
            keywords: Vec::new(),
            reference_time: None,
        }
    }
}

impl RankerConfig {
    /// The explicit threshold if set, otherwise the preset's.
    pub fn threshold(&self) -> SimilarityThreshold {
        self.similarity_threshold.unwrap_or_else(|| self.dedup.threshold())
    }

    pub fn ranker(&self) -> Ranker {
        Ranker::new(self.threshold()).with_reference_time(self.reference_time)
    }

    /// Parse a config document. Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Yaml`] for malformed YAML, unknown presets, or a
    /// `similarity_threshold` outside `(0, 1]`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Load a [`RankerConfig`] from a YAML file.
///
/// # Arguments
///
/// * `path` - Location of the YAML file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a YAML error if it
/// does not parse; see [`RankerConfig::from_yaml`].
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn load_config(path: &str) -> Result<RankerConfig> {
    let yaml = fs::read_to_string(path).await?;
    let config = RankerConfig::from_yaml(&yaml)?;
    info!(top_k = config.top_k, threshold = %config.threshold(), "Loaded configuration");
    Ok(config)
}
