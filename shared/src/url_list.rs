/// URL list loading.
///
/// One URL per line, surrounding whitespace trimmed, blank lines dropped.
/// No comment syntax and no URL validation.
use std::path::Path;

use tracing::debug;

use crate::errors::{BatchError, BatchResult};

/// Split file contents into the ordered list of URLs.
pub fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Read and parse a UTF-8 URL list file.
pub async fn load_url_list(path: impl AsRef<Path>) -> BatchResult<Vec<String>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BatchError::ReadUrlList { path: path.to_path_buf(), source })?;

    let urls = parse_url_list(&contents);
    debug!("Loaded {} URLs from {:?}", urls.len(), path);
    Ok(urls)
}
