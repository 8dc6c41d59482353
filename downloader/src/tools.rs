/// External tool discovery and preflight.
///
/// yt-dlp needs ffmpeg to merge split video/audio streams into MP4. ffmpeg
/// directories found here are appended to the PATH of every yt-dlp process.
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};
use ytbatch_shared::{BatchError, BatchResult, DownloadConfig};

const FFMPEG: &str = "ffmpeg";

#[cfg(windows)]
const FFMPEG_EXE: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_EXE: &str = "ffmpeg";

/// Discover extra PATH entries holding ffmpeg.
/// Checks FFMPEG_PATH env var first, then common install locations.
pub fn discover_extra_paths() -> Vec<PathBuf> {
    extra_paths_with(env::var_os("FFMPEG_PATH").map(PathBuf::from))
}

fn extra_paths_with(ffmpeg_path: Option<PathBuf>) -> Vec<PathBuf> {
    let mut extra = Vec::new();

    if let Some(dir) = ffmpeg_path {
        extra.push(dir);
    }

    if cfg!(target_os = "windows") {
        if let Some(local_app) = env::var_os("LOCALAPPDATA") {
            // winget installs ffmpeg here
            let winget_dir = PathBuf::from(local_app)
                .join("Microsoft")
                .join("WinGet")
                .join("Packages");
            extra.extend(winget_ffmpeg_dirs(&winget_dir));
        }

        for path in [r"C:\ffmpeg\bin", r"C:\Program Files\ffmpeg\bin"] {
            let dir = PathBuf::from(path);
            if dir.join(FFMPEG_EXE).exists() {
                extra.push(dir);
            }
        }
    } else {
        let common_paths = [
            "/usr/local/bin",
            "/snap/bin",
            "/opt/homebrew/bin",
            "/home/linuxbrew/.linuxbrew/bin",
        ];
        for path in common_paths {
            let dir = PathBuf::from(path);
            if dir.join(FFMPEG_EXE).exists() {
                extra.push(dir);
            }
        }
    }

    extra
}

fn winget_ffmpeg_dirs(winget_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let Ok(entries) = std::fs::read_dir(winget_dir) else {
        return dirs;
    };
    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with("Gyan.FFmpeg") {
            continue;
        }
        if let Ok(sub_entries) = std::fs::read_dir(entry.path()) {
            for sub in sub_entries.flatten() {
                let bin = sub.path().join("bin");
                if bin.join(FFMPEG_EXE).exists() {
                    dirs.push(bin);
                }
            }
        }
    }
    dirs
}

/// Append extra directories to a PATH value.
///
/// Returns `None` when nothing new would be added, so the child inherits the
/// parent environment untouched.
pub fn join_path(current: Option<&OsStr>, extra: &[PathBuf]) -> Option<OsString> {
    let mut parts: Vec<PathBuf> = current.map(|p| env::split_paths(p).collect()).unwrap_or_default();
    let before = parts.len();
    for dir in extra {
        if !parts.contains(dir) {
            parts.push(dir.clone());
        }
    }
    if parts.len() == before {
        return None;
    }

    match env::join_paths(&parts) {
        Ok(joined) => Some(joined),
        Err(e) => {
            warn!("Ignoring extra tool paths: {}", e);
            None
        }
    }
}

/// PATH for child processes: current PATH plus discovered ffmpeg locations,
/// or `None` to inherit the current one.
pub fn augmented_path() -> Option<OsString> {
    let extra = discover_extra_paths();
    if !extra.is_empty() {
        debug!("Extra tool paths: {:?}", extra);
    }
    join_path(env::var_os("PATH").as_deref(), &extra)
}

/// Locate an executable ffmpeg in `path`, or in the current PATH when `None`.
pub fn find_ffmpeg(path: Option<&OsStr>) -> Option<PathBuf> {
    let search = path.map(OsStr::to_os_string).or_else(|| env::var_os("PATH"));
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    which::which_in(FFMPEG, search, cwd).ok()
}

/// Confirm yt-dlp runs before any download starts; warn if ffmpeg is missing.
pub async fn preflight(config: &DownloadConfig, path: Option<&OsStr>) -> BatchResult<String> {
    let mut command = Command::new(&config.ytdlp_bin);
    command.arg("--version").stdin(Stdio::null());
    if let Some(path) = path {
        command.env("PATH", path);
    }

    let output = command.output().await.map_err(|e| {
        BatchError::Preflight(format!(
            "{} could not be started ({}). Install it (e.g. `pip install yt-dlp`) or set YTDLP_BIN",
            config.ytdlp_bin, e
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BatchError::Preflight(format!(
            "`{} --version` exited with {}: {}",
            config.ytdlp_bin,
            output.status,
            stderr.trim()
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    info!("Using {} {}", config.ytdlp_bin, version);

    if find_ffmpeg(path).is_none() {
        warn!("ffmpeg not found on PATH; yt-dlp cannot merge separate video and audio streams");
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path_dedups() {
        let base = env::join_paths(["/usr/bin", "/bin"]).unwrap();
        let joined = join_path(
            Some(base.as_os_str()),
            &[PathBuf::from("/bin"), PathBuf::from("/opt/ffmpeg")],
        )
        .unwrap();
        let parts: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(
            parts,
            vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin"), PathBuf::from("/opt/ffmpeg")]
        );
    }

    #[test]
    fn test_join_path_nothing_new_inherits() {
        let base = env::join_paths(["/usr/bin", "/bin"]).unwrap();
        assert!(join_path(Some(base.as_os_str()), &[]).is_none());
        assert!(join_path(Some(base.as_os_str()), &[PathBuf::from("/bin")]).is_none());
        assert!(join_path(None, &[]).is_none());
    }

    #[test]
    fn test_join_path_without_current_path() {
        let joined = join_path(None, &[PathBuf::from("/opt/ffmpeg")]).unwrap();
        assert_eq!(joined, OsString::from("/opt/ffmpeg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_join_path_keeps_non_utf8_entries() {
        use std::os::unix::ffi::OsStrExt;

        let base = OsStr::from_bytes(b"/usr/bin:/bin:/opt/\xff");
        let joined = join_path(Some(base), &[PathBuf::from("/opt/ffmpeg")]).unwrap();
        let parts: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], PathBuf::from("/usr/bin"));
        assert_eq!(parts[2].as_os_str().as_bytes(), b"/opt/\xff");
        assert_eq!(parts[3], PathBuf::from("/opt/ffmpeg"));
    }

    #[test]
    fn test_ffmpeg_path_env_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let extra = extra_paths_with(Some(dir.path().to_path_buf()));
        assert_eq!(extra.first(), Some(&dir.path().to_path_buf()));
        assert!(!extra_paths_with(None).contains(&dir.path().to_path_buf()));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_ffmpeg_requires_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = dir.path().join("ffmpeg");
        std::fs::write(&ffmpeg, "").unwrap();
        std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(find_ffmpeg(Some(dir.path().as_os_str())).is_none());

        std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(find_ffmpeg(Some(dir.path().as_os_str())).is_some());
    }

    #[tokio::test]
    async fn test_preflight_missing_tool() {
        let cfg = DownloadConfig {
            ytdlp_bin: "definitely-not-a-real-ytdlp-binary".into(),
            ..Default::default()
        };
        let err = preflight(&cfg, None).await.unwrap_err();
        assert!(matches!(err, BatchError::Preflight(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preflight_failing_tool() {
        let cfg = DownloadConfig { ytdlp_bin: "false".into(), ..Default::default() };
        let err = preflight(&cfg, None).await.unwrap_err();
        assert!(err.to_string().contains("--version"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preflight_success_returns_trimmed_version() {
        let cfg = DownloadConfig { ytdlp_bin: "true".into(), ..Default::default() };
        let version = preflight(&cfg, None).await.unwrap();
        assert_eq!(version, version.trim());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preflight_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DownloadConfig { ytdlp_bin: "true".into(), ..Default::default() };
        let err = preflight(&cfg, Some(dir.path().as_os_str())).await.unwrap_err();
        assert!(matches!(err, BatchError::Preflight(_)));
    }
}
