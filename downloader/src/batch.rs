/// Sequential batch download loop.
///
/// Items run strictly one after another in list order. The first failure
/// aborts the batch; later URLs are never attempted.
use std::path::Path;

use tracing::{info, warn};
use ytbatch_shared::url_list::load_url_list;
use ytbatch_shared::{BatchError, BatchResult, CommandTemplate, DownloadConfig};

use crate::runner::ToolRunner;

/// Create the output directory and any missing parents. Idempotent.
pub async fn ensure_output_dir(path: &Path) -> BatchResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| BatchError::CreateOutputDir { path: path.to_path_buf(), source })
}

/// Run the template once per URL, in order. Returns the number of completed downloads.
pub async fn run_batch<R: ToolRunner + ?Sized>(
    template: &CommandTemplate,
    urls: &[String],
    runner: &mut R,
) -> BatchResult<usize> {
    let total = urls.len();
    for (index, url) in urls.iter().enumerate() {
        info!("[{}/{}] Downloading {}...", index + 1, total, url);
        runner.run(&template.invocation(url)).await?;
    }
    Ok(total)
}

/// Whole-run orchestration: directory, list, template, loop.
pub struct BatchDownloader {
    config: DownloadConfig,
}

impl BatchDownloader {
    pub fn new(config: DownloadConfig) -> BatchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    pub async fn run<R: ToolRunner + ?Sized>(&self, runner: &mut R) -> BatchResult<usize> {
        ensure_output_dir(&self.config.download_path).await?;

        let urls = load_url_list(&self.config.input_file).await?;
        if urls.is_empty() {
            warn!("No URLs found in {:?}, nothing to download", self.config.input_file);
            return Ok(0);
        }

        let template = CommandTemplate::build(&self.config);
        info!(
            "Downloading {} URLs into {:?} (max {}p, {} segments)",
            urls.len(),
            self.config.download_path,
            self.config.resolution,
            self.config.concurrent_segments
        );

        run_batch(&template, &urls, runner).await
    }
}
