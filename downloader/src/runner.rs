/// Runs yt-dlp invocations.
///
/// `ProcessRunner` spawns the tool with an argument vector (no shell) and
/// waits for it to exit. `DryRunRunner` only prints what would be run.
use std::ffi::OsString;
use std::io::Write;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use ytbatch_shared::{BatchError, BatchResult, DownloadConfig, Invocation};

#[async_trait]
pub trait ToolRunner: Send {
    /// Run one invocation to completion. Any non-success is an error.
    async fn run(&mut self, invocation: &Invocation) -> BatchResult<()>;
}

/// Spawns the real external tool.
pub struct ProcessRunner {
    /// PATH handed to each child process; `None` inherits ours.
    path: Option<OsString>,
}

impl ProcessRunner {
    pub fn new(path: Option<OsString>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&mut self, invocation: &Invocation) -> BatchResult<()> {
        debug!("Running: {}", invocation.display_line());

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(path) = &self.path {
            command.env("PATH", path);
        }

        let status = command
            .status()
            .await
            .map_err(|source| BatchError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(BatchError::ToolFailed {
                url: invocation.url.clone(),
                code,
            }),
            None => Err(BatchError::ToolTerminated {
                url: invocation.url.clone(),
            }),
        }
    }
}

/// Writes each invocation as a JSON line instead of running it.
pub struct DryRunRunner<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> DryRunRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the run configuration as a leading JSON line.
    pub fn echo_config(&mut self, config: &DownloadConfig) -> BatchResult<()> {
        writeln!(self.out, "{}", config.to_json_line()?)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> ToolRunner for DryRunRunner<W> {
    async fn run(&mut self, invocation: &Invocation) -> BatchResult<()> {
        let line = invocation.to_json_line()?;
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}
