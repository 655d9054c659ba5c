//! JSON output of ranked pages.

use crate::error::Result;
use crate::models::RankedPage;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `page`: `{dir}/{date}/{time_of_day}.json`.
pub fn json_path(page: &RankedPage, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(&page.local_date)
        .join(format!("{}.json", page.time_of_day))
}

/// Write a [`RankedPage`] as pretty JSON, creating the date directory.
///
/// # Arguments
///
/// * `page` - The ranking run to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path written, `{json_output_dir}/{date}/{time_of_day}.json`.
///
/// # Errors
///
/// Fails if serialization, directory creation or the file write fails. An
/// existing file for the same edition is overwritten.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_ranked_page(page: &RankedPage, json_output_dir: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(page)?;
    let path = json_path(page, json_output_dir);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = page.articles.len(), "Wrote ranked page JSON");
    Ok(path)
}
