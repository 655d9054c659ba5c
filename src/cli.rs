//! Command-line interface definitions for News Ranker.
//!
//! Flags override values from the optional YAML config file; several can
//! also be supplied through environment variables.

use clap::Parser;
use news_ranker::config::DedupPreset;

/// Rank a batch of news articles by relevance and appeal.
///
/// # Examples
///
/// ```sh
/// # Top 3 articles from a file, printed as JSON
/// news_ranker -i articles.json
///
/// # Keyword search over stdin, written to output directories
/// cat articles.json | news_ranker -i - --keywords tariff --keywords china -j ./json -m ./markdown
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON file containing an array of article records, or `-` for stdin
    #[arg(short, long)]
    pub input: String,

    /// Number of articles to return
    #[arg(short = 'k', long, env = "NEWS_RANKER_TOP_K")]
    pub top_k: Option<usize>,

    /// Query keywords; enables keyword-boosted ranking
    #[arg(long)]
    pub keywords: Vec<String>,

    /// Dedup threshold preset
    #[arg(long, value_enum)]
    pub dedup: Option<DedupPreset>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_RANKER_CONFIG")]
    pub config: Option<String>,

    /// Output directory for the JSON file
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown report
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,
}
