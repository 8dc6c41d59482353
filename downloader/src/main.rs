/// ytbatch - sequential yt-dlp batch downloader
///
/// Reads a list of video URLs and runs yt-dlp once per URL with a shared
/// set of format, resolution, concurrency and subtitle options. Stops at
/// the first failed download.
mod args;
mod batch;
mod runner;
mod tools;

use anyhow::Context;
use tracing::{error, info};
use ytbatch_shared::BatchError;

use args::Args;
use batch::BatchDownloader;
use runner::{DryRunRunner, ProcessRunner};

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytbatch=info,ytbatch_shared=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        match e.downcast_ref::<BatchError>().and_then(BatchError::failed_url) {
            Some(url) => error!(url, "{:#}", e),
            None => error!("{:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let downloader = BatchDownloader::new(args.to_config()).context("Invalid configuration")?;

    if args.dry_run {
        let mut runner = DryRunRunner::new(std::io::stdout());
        runner.echo_config(downloader.config())?;
        downloader.run(&mut runner).await?;
        return Ok(());
    }

    let path = tools::augmented_path();
    if !args.skip_preflight {
        tools::preflight(downloader.config(), path.as_deref()).await?;
    }

    let mut runner = ProcessRunner::new(path);
    let done = downloader.run(&mut runner).await?;
    info!("All {} downloads finished", done);
    Ok(())
}
