/// Download configuration shared by every item of a batch.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{BatchError, BatchResult};

pub const DEFAULT_INPUT_FILE: &str = "video_urls.txt";
pub const DEFAULT_DOWNLOAD_PATH: &str = "my_downloads";
pub const DEFAULT_CONCURRENT_SEGMENTS: u32 = 4;
pub const DEFAULT_RESOLUTION: u32 = 1080;
pub const DEFAULT_SUBTITLE_LANGS: &str = "en";
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";

/// Immutable per-run configuration. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Text file with one URL per line.
    pub input_file: PathBuf,
    /// Destination folder, created if missing.
    pub download_path: PathBuf,
    /// Forwarded to yt-dlp `-N`.
    pub concurrent_segments: u32,
    /// Max vertical resolution in pixels.
    pub resolution: u32,
    pub download_subtitles: bool,
    pub auto_subtitles: bool,
    /// Language selector: a code (`en`), a pattern (`en.*`) or `all`.
    pub subtitle_langs: String,
    /// Program name or path of yt-dlp.
    pub ytdlp_bin: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            download_path: PathBuf::from(DEFAULT_DOWNLOAD_PATH),
            concurrent_segments: DEFAULT_CONCURRENT_SEGMENTS,
            resolution: DEFAULT_RESOLUTION,
            download_subtitles: true,
            auto_subtitles: true,
            subtitle_langs: DEFAULT_SUBTITLE_LANGS.to_string(),
            ytdlp_bin: DEFAULT_YTDLP_BIN.to_string(),
        }
    }
}

impl DownloadConfig {
    /// Serialize to a single JSON line (echoed at the start of a dry run).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reject values yt-dlp would refuse or misinterpret.
    pub fn validate(&self) -> BatchResult<()> {
        if self.concurrent_segments == 0 {
            return Err(BatchError::Config("concurrent segment count must be at least 1".into()));
        }
        if self.resolution == 0 {
            return Err(BatchError::Config("resolution must be a positive pixel height".into()));
        }
        if self.download_subtitles && self.subtitle_langs.trim().is_empty() {
            return Err(BatchError::Config(
                "subtitle language selector is empty but subtitle download is enabled".into(),
            ));
        }
        if self.ytdlp_bin.trim().is_empty() {
            return Err(BatchError::Config("yt-dlp program name is empty".into()));
        }
        Ok(())
    }
}
