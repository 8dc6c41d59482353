/// Error types for the ytbatch downloader.
///
/// Every variant is fatal: the batch stops at the first one and nothing is retried.
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to create output directory {path:?}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read URL list {path:?}: {source}")]
    ReadUrlList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Download of {url} failed: yt-dlp exited with code {code}")]
    ToolFailed { url: String, code: i32 },

    #[error("Download of {url} failed: yt-dlp was terminated by a signal")]
    ToolTerminated { url: String },

    #[error("Preflight check failed: {0}")]
    Preflight(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BatchError {
    /// URL of the item whose download failed, if the error came from the tool itself.
    pub fn failed_url(&self) -> Option<&str> {
        match self {
            BatchError::ToolFailed { url, .. } | BatchError::ToolTerminated { url } => Some(url),
            _ => None,
        }
    }
}

/// Result type alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
