//! Markdown rendering of ranked pages.

use crate::models::{RankedPage, ScoredArticle};
use crate::utils::{slugify_title, upcase};
use itertools::Itertools;
use std::fmt::Write;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Path of the Markdown report: `{dir}/{date}_{time_of_day}.md`.
pub fn markdown_path(page: &RankedPage, markdown_output_dir: &str) -> PathBuf {
    PathBuf::from(markdown_output_dir).join(format!("{}_{}.md", page.local_date, page.time_of_day))
}

/// Render a ranked page: a linked table of contents, then one section per
/// article with its scores and component breakdown.
pub fn ranked_page_to_markdown(page: &RankedPage) -> String {
    let mut md = String::new();

    // writeln! on a String cannot fail
    let _ = writeln!(
        md,
        "# {} Ranking for {}\n",
        upcase(&page.time_of_day),
        page.local_date
    );
    let _ = writeln!(md, "_Generated at {} ({} mode)_\n", page.local_time, page.mode);
    if !page.keywords.is_empty() {
        let _ = writeln!(md, "Keywords: {}\n", page.keywords.iter().join(", "));
    }
    let _ = writeln!(
        md,
        "{} input, {} rejected, {} duplicates, {} shown\n",
        page.stats.input, page.stats.rejected_by_gate, page.stats.duplicates, page.stats.returned
    );

    if page.articles.is_empty() {
        let _ = writeln!(md, "No articles survived filtering.");
        return md;
    }

    for (i, scored) in page.articles.iter().enumerate() {
        let _ = writeln!(
            md,
            "{}. [{}](#{})",
            i + 1,
            scored.article.title,
            slugify_title(&scored.article.title)
        );
    }
    md.push('\n');

    for scored in &page.articles {
        write_article(&mut md, scored);
    }
    md
}

fn write_article(md: &mut String, scored: &ScoredArticle) {
    let article = &scored.article;
    let rel = &scored.score_breakdown.relevance;
    let app = &scored.score_breakdown.appeal;

    let _ = writeln!(md, "## {}\n", article.title);
    if !article.source.is_empty() {
        let _ = writeln!(md, "**Source:** {}  ", article.source);
    }
    if !article.url.is_empty() {
        let _ = writeln!(md, "**URL:** <{}>  ", article.url);
    }
    let _ = writeln!(
        md,
        "**Final:** {:.2} | **Relevance:** {:.2} | **Appeal:** {:.2}\n",
        scored.final_score, scored.relevance_score, scored.appeal_score
    );

    let _ = writeln!(md, "| Component | Score |");
    let _ = writeln!(md, "|-----------|-------|");
    let rows = [
        ("Primary keywords", rel.primary_keywords),
        ("Secondary keywords", rel.secondary_keywords),
        ("Geographic relevance", rel.geographic_relevance),
        ("Economic impact", rel.economic_impact),
        ("Timeliness", rel.timeliness),
        ("Headline appeal", app.headline_appeal),
        ("Content quality", app.content_quality),
        ("Controversy", app.controversy_factor),
        ("Source credibility", app.source_credibility),
        ("Engagement potential", app.engagement_potential),
    ];
    for (name, value) in rows {
        let _ = writeln!(md, "| {name} | {value:.2} |");
    }
    if let Some(boost) = scored.score_breakdown.keyword_boost {
        let _ = writeln!(md, "| Keyword boost | {boost:.2} |");
    }
    md.push('\n');
}

/// Render and write the Markdown report.
///
/// # Arguments
///
/// * `page` - The ranking run to render
/// * `markdown_output_dir` - Directory for reports, created if missing
///
/// # Returns
///
/// The path written, `{markdown_output_dir}/{date}_{time_of_day}.md`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_markdown(page: &RankedPage, markdown_output_dir: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(markdown_output_dir).await?;
    let path = markdown_path(page, markdown_output_dir);
    fs::write(&path, ranked_page_to_markdown(page)).await?;
    info!(path = %path.display(), "Wrote ranked page Markdown");
    Ok(path)
}
