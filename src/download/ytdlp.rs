//! Thin wrapper around the yt-dlp executable

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::error::{DownloadError, DownloadResult};
use super::source::BROWSER_USER_AGENT;

const UPDATE_TIMEOUT: Duration = Duration::from_secs(60);

/// Playlist metadata as returned by `yt-dlp -J --flat-playlist`
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistEntry {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}

impl PlaylistEntry {
    /// Watch URL for the entry, built from its id when no URL is given
    pub fn watch_url(&self) -> Option<String> {
        self.url
            .clone()
            .filter(|url| url.starts_with("http"))
            .or_else(|| {
                self.id
                    .as_ref()
                    .map(|id| format!("https://www.youtube.com/watch?v={}", id))
            })
    }
}

/// Invokes a yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
}

impl YtDlp {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Ask yt-dlp to update itself; failures only warn
    pub async fn self_update(&self) {
        info!("Checking for yt-dlp updates...");

        let run = Command::new(&self.binary).arg("-U").output();
        match tokio::time::timeout(UPDATE_TIMEOUT, run).await {
            Ok(Ok(output)) if output.status.success() => debug!("yt-dlp update check finished"),
            Ok(Ok(output)) => warn!(
                "Could not update yt-dlp: {}",
                last_line(&output.stderr).unwrap_or("unknown error")
            ),
            Ok(Err(e)) => warn!("Could not run yt-dlp update: {}", e),
            Err(_) => warn!("yt-dlp update timed out, continuing with current version"),
        }
    }

    /// Read playlist metadata without downloading anything
    pub async fn playlist(&self, url: &str) -> DownloadResult<PlaylistInfo> {
        let output = Command::new(&self.binary)
            .args(["-J", "--flat-playlist", "--no-warnings", "--quiet"])
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(failure(&output));
        }

        let info: PlaylistInfo = serde_json::from_slice(&output.stdout)?;
        debug!("Playlist has {} entries", info.entries.len());
        Ok(info)
    }

    /// Download the audio of one video as `<temp_base>.mp3`
    pub async fn extract_audio(&self, url: &str, temp_base: &Path) -> DownloadResult<()> {
        let template = format!("{}.%(ext)s", temp_base.display());

        let output = Command::new(&self.binary)
            .args([
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "192K",
                "--no-playlist",
                "--retries",
                "3",
                "--fragment-retries",
                "3",
                "--retry-sleep",
                "http:exp=1:10",
                "--socket-timeout",
                "30",
                "--sleep-interval",
                "1",
                "--max-sleep-interval",
                "5",
                "--sleep-requests",
                "1",
                "--no-write-thumbnail",
                "--no-write-info-json",
                "--quiet",
                "--no-warnings",
                "--no-progress",
                "--no-color",
                "--user-agent",
                BROWSER_USER_AGENT,
                "--add-header",
                "Accept-Language:en-us,en;q=0.5",
                "--output",
            ])
            .arg(&template)
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(failure(&output));
        }
        Ok(())
    }
}

fn failure(output: &std::process::Output) -> DownloadError {
    DownloadError::YtDlp {
        status: output.status.to_string(),
        message: last_line(&output.stderr)
            .unwrap_or("no error output")
            .to_string(),
    }
}

fn last_line(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes)
        .ok()?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_playlist() {
        let json = r#"{
            "title": "Road Trip Mix",
            "entries": [
                {"id": "abc", "url": "https://www.youtube.com/watch?v=abc", "title": "One"},
                {"id": "def", "url": null, "title": "Two"}
            ]
        }"#;
        let info: PlaylistInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.title.as_deref(), Some("Road Trip Mix"));
        assert_eq!(
            info.entries[0].watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
        assert_eq!(
            info.entries[1].watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=def")
        );
    }

    #[test]
    fn test_playlist_without_entries() {
        let info: PlaylistInfo = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert!(info.entries.is_empty());
    }

    #[test]
    fn test_last_line() {
        assert_eq!(last_line(b"first\nERROR: boom\n\n"), Some("ERROR: boom"));
        assert_eq!(last_line(b""), None);
    }
}
