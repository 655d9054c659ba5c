//! Loading article batches handed over by upstream fetchers.
//!
//! The input is a JSON array of [`ArticleRecord`] objects, read from a file
//! or from stdin when the path is `-`.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, instrument};

/// Parse a JSON array of articles.
///
/// Missing text fields are tolerated (the quality gate handles them), as are
/// blank or unreadable publication times, which become unknown.
///
/// # Arguments
///
/// * `json` - The document text, expected to be a top-level array
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON or a field of the wrong type,
/// and [`Error::Validation`] when the document is not an array. Either way
/// the whole batch is rejected.
pub fn parse_articles(json: &str) -> Result<Vec<ArticleRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::Validation(
            "expected a JSON array of article records".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read a batch from `path`, or from stdin when `path` is `-`.
///
/// # Arguments
///
/// * `path` - Input file, or `-` for stdin
///
/// # Returns
///
/// The parsed records in input order.
///
/// # Errors
///
/// [`Error::Io`] when the input cannot be read, otherwise whatever
/// [`parse_articles`] reports.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn read_articles(path: &str) -> Result<Vec<ArticleRecord>> {
    let json = if path == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        fs::read_to_string(path).await?
    };
    debug!(bytes = json.len(), "Read article batch");

    let articles = parse_articles(&json)?;
    info!(count = articles.len(), "Loaded article records");
    Ok(articles)
}
