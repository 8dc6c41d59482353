use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::Parser;
use ytbatch_shared::config::{
    DownloadConfig, DEFAULT_CONCURRENT_SEGMENTS, DEFAULT_DOWNLOAD_PATH, DEFAULT_INPUT_FILE,
    DEFAULT_RESOLUTION, DEFAULT_SUBTITLE_LANGS, DEFAULT_YTDLP_BIN,
};

/// Download every URL in a list with yt-dlp, one after another.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Text file with one URL per line
    #[arg(short, long, env = "YTBATCH_INPUT", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Folder to save downloads into (created if missing)
    #[arg(short = 'o', long, env = "DOWNLOAD_DIR", default_value = DEFAULT_DOWNLOAD_PATH)]
    pub download_path: PathBuf,

    /// Fragments yt-dlp downloads concurrently per video
    #[arg(
        short = 'N',
        long,
        env = "YTBATCH_SEGMENTS",
        default_value_t = DEFAULT_CONCURRENT_SEGMENTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub concurrent_segments: u32,

    /// Max vertical resolution in pixels
    #[arg(
        short,
        long,
        env = "YTBATCH_RESOLUTION",
        default_value_t = DEFAULT_RESOLUTION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub resolution: u32,

    /// Skip manually uploaded subtitles
    #[arg(long, env = "YTBATCH_NO_SUBS", value_parser = FalseyValueParser::new())]
    pub no_subs: bool,

    /// Skip auto-generated subtitles
    #[arg(long, env = "YTBATCH_NO_AUTO_SUBS", value_parser = FalseyValueParser::new())]
    pub no_auto_subs: bool,

    /// Subtitle languages: a code (en), a pattern (en.*) or all
    #[arg(long, env = "YTBATCH_SUB_LANGS", default_value = DEFAULT_SUBTITLE_LANGS)]
    pub sub_langs: String,

    /// yt-dlp executable name or path
    #[arg(long, env = "YTDLP_BIN", default_value = DEFAULT_YTDLP_BIN)]
    pub ytdlp_bin: String,

    /// Don't probe yt-dlp before starting
    #[arg(long, env = "YTBATCH_SKIP_PREFLIGHT", value_parser = FalseyValueParser::new())]
    pub skip_preflight: bool,

    /// Print each invocation as a JSON line instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    pub fn parse_args() -> Args {
        Args::parse()
    }

    pub fn to_config(&self) -> DownloadConfig {
        DownloadConfig {
            input_file: self.input.clone(),
            download_path: self.download_path.clone(),
            concurrent_segments: self.concurrent_segments,
            resolution: self.resolution,
            download_subtitles: !self.no_subs,
            auto_subtitles: !self.no_auto_subs,
            subtitle_langs: self.sub_langs.clone(),
            ytdlp_bin: self.ytdlp_bin.clone(),
        }
    }
}
