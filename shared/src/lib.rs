//! Shared types for ytbatch: configuration, errors, URL list loading and
//! yt-dlp command construction.
pub mod command;
pub mod config;
pub mod errors;
pub mod url_list;

pub use command::{CommandTemplate, Invocation};
pub use config::DownloadConfig;
pub use errors::{BatchError, BatchResult};
