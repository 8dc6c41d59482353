/// yt-dlp command construction.
///
/// The template is derived from [`DownloadConfig`] alone. Each download clones it
/// and appends its URL as the final argument.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DownloadConfig;

/// Container format passed to `--merge-output-format`.
pub const MERGE_FORMAT: &str = "mp4";
/// Subtitle format passed to `--convert-subs`.
pub const SUBTITLE_FORMAT: &str = "srt";
/// Filename pattern resolved by yt-dlp: upload date, title capped at 200 chars, extension.
pub const FILENAME_TEMPLATE: &str = "%(upload_date)s - %(title).200s.%(ext)s";

/// Best video no taller than `resolution` plus best audio, else best combined stream.
pub fn format_selector(resolution: u32) -> String {
    format!("bestvideo[height<={}]+bestaudio/best", resolution)
}

/// Output path template rooted at the download directory.
pub fn output_template(download_path: &Path) -> String {
    download_path.join(FILENAME_TEMPLATE).to_string_lossy().into_owned()
}

/// Shared argument list for every download in a batch. Contains no URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTemplate {
    pub fn build(config: &DownloadConfig) -> Self {
        let mut args = vec![
            "-f".to_string(),
            format_selector(config.resolution),
            "--merge-output-format".to_string(),
            MERGE_FORMAT.to_string(),
            "-N".to_string(),
            config.concurrent_segments.to_string(),
            "-o".to_string(),
            output_template(&config.download_path),
        ];

        if config.download_subtitles {
            args.extend([
                "--write-subs".to_string(),
                "--sub-langs".to_string(),
                config.subtitle_langs.clone(),
                "--convert-subs".to_string(),
                SUBTITLE_FORMAT.to_string(),
            ]);
        }

        if config.auto_subtitles {
            args.push("--write-auto-subs".to_string());
        }

        Self {
            program: config.ytdlp_bin.clone(),
            args,
        }
    }

    /// Full invocation for one URL. The template itself is left untouched.
    pub fn invocation(&self, url: &str) -> Invocation {
        let mut args = self.args.clone();
        args.push(url.to_string());
        Invocation {
            url: url.to_string(),
            program: self.program.clone(),
            args,
        }
    }
}

/// A single external tool call: program plus argument vector, URL last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub url: String,
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Serialize to a single JSON line (for dry-run output).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Human-readable rendering for logs. Not suitable for a shell.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}
