//! # News Ranker
//!
//! Reads a batch of article records, runs them through the quality gate,
//! deduplication and scoring, and writes the top-K as JSON and Markdown.
//!
//! ## Usage
//!
//! ```sh
//! news_ranker -i articles.json -k 3 -j ./json -m ./markdown
//! ```

use chrono::Local;
use clap::Parser;
use news_ranker::config::{load_config, RankerConfig};
use news_ranker::input::read_articles;
use news_ranker::outputs::{json, markdown};
use news_ranker::ranking::clean_keywords;
use news_ranker::utils::{ensure_writable_dir, time_of_day, truncate_for_log};
use news_ranker::{DedupSet, RankedPage, ScoreMode};
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_ranker starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Config: file, then CLI overrides ----
    let mut config = match &args.config {
        Some(path) => match load_config(path).await {
            Ok(config) => config,
            Err(e) => {
                error!(%path, error = %e, "Failed to load configuration");
                return Err(e.into());
            }
        },
        None => RankerConfig::default(),
    };
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if let Some(dedup) = args.dedup {
        config.dedup = dedup;
        config.similarity_threshold = None;
    }
    if !args.keywords.is_empty() {
        config.keywords = args.keywords.clone();
    }
    info!(top_k = config.top_k, threshold = %config.threshold(), keywords = ?config.keywords, "Effective configuration");

    // Early check: output dirs must be writable before doing any work
    for dir in [&args.json_output_dir, &args.markdown_output_dir].into_iter().flatten() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e.into());
        }
    }

    // ---- Load and rank ----
    let articles = match read_articles(&args.input).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(input = %args.input, error = %e, "Failed to read article batch");
            return Err(e.into());
        }
    };

    let ranker = config.ranker();
    let keywords = clean_keywords(&config.keywords);
    let mode = ScoreMode::for_keywords(&keywords);
    let (ranked, stats) = ranker.rank_detailed(articles, config.top_k, Some(keywords.as_slice()), &mut DedupSet::new());

    for (i, scored) in ranked.iter().enumerate() {
        info!(
            rank = i + 1,
            final_score = scored.final_score,
            source = %scored.article.source,
            title = %truncate_for_log(&scored.article.title, 80),
            "Ranked article"
        );
    }

    let page = RankedPage {
        local_date: Local::now().date_naive().to_string(),
        time_of_day: time_of_day(),
        local_time: Local::now().time().to_string(),
        mode: mode.as_str().to_string(),
        keywords,
        top_k: config.top_k,
        stats,
        articles: ranked,
    };

    // ---- Output ----
    let mut wrote_any = false;
    if let Some(dir) = &args.json_output_dir {
        wrote_any = true;
        if let Err(e) = json::write_ranked_page(&page, dir).await {
            error!(error = %e, "Failed to write JSON");
        }
    }
    if let Some(dir) = &args.markdown_output_dir {
        wrote_any = true;
        if let Err(e) = markdown::write_markdown(&page, dir).await {
            error!(error = %e, "Failed to write Markdown");
        }
    }
    if !wrote_any {
        println!("{}", serde_json::to_string_pretty(&page)?);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        returned = page.articles.len(),
        "Execution complete"
    );

    Ok(())
}
