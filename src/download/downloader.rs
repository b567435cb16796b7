//! Single-video and playlist audio downloads

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

use super::error::{DownloadError, DownloadResult};
use super::source::TitleFetcher;
use super::ytdlp::YtDlp;
use crate::naming::normalize;

/// Name of the scratch file yt-dlp writes into before the final move
const TEMP_NAME: &str = "tunetidy-download";

/// Pause after a failed download before the next request
const FAILURE_BACKOFF: Duration = Duration::from_secs(5);

/// Result of a single download request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    AlreadyExists(PathBuf),
}

/// Counters for a playlist run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub title: String,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Downloads audio into a library directory
pub struct Downloader {
    ytdlp: YtDlp,
    titles: TitleFetcher,
    root: PathBuf,
}

impl Downloader {
    pub fn new(ytdlp: YtDlp, root: PathBuf) -> DownloadResult<Self> {
        Ok(Self {
            ytdlp,
            titles: TitleFetcher::new()?,
            root,
        })
    }

    /// Final location for a title, optionally inside a playlist folder
    pub fn target_path(&self, title: &str, folder: Option<&str>) -> PathBuf {
        let dir = match folder {
            Some(folder) => self.root.join(folder),
            None => self.root.clone(),
        };
        dir.join(format!("{}.mp3", title))
    }

    /// Download one video's audio as `<Normalized Title>.mp3`
    ///
    /// Existing files are left alone. On failure the scratch files are
    /// removed after a short pause.
    pub async fn download_one(&self, url: &str, folder: Option<&str>) -> DownloadResult<DownloadOutcome> {
        let title = normalize(&self.titles.fetch_title(url).await?);
        if title.is_empty() {
            return Err(DownloadError::TitleNotFound(url.to_string()));
        }

        let target = self.target_path(&title, folder);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        if fs::try_exists(&target).await? {
            info!("File {} already exists", display_name(&target));
            return Ok(DownloadOutcome::AlreadyExists(target));
        }

        info!("Starting download: {}", display_name(&target));
        let temp_base = self.root.join(TEMP_NAME);

        if let Err(e) = self.ytdlp.extract_audio(url, &temp_base).await {
            tokio::time::sleep(FAILURE_BACKOFF).await;
            clean_temp_files(&temp_base).await;
            return Err(e);
        }

        let temp_mp3 = temp_base.with_extension("mp3");
        let size = match fs::metadata(&temp_mp3).await {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };
        if size == 0 {
            clean_temp_files(&temp_base).await;
            return Err(DownloadError::EmptyOutput(url.to_string()));
        }

        fs::rename(&temp_mp3, &target).await?;
        info!("Downloaded: {}", display_name(&target));
        Ok(DownloadOutcome::Downloaded(target))
    }

    /// Download every entry of a playlist into a folder named after it
    ///
    /// A failed entry is reported and the rest of the playlist continues.
    pub async fn download_playlist(&self, url: &str) -> DownloadResult<PlaylistSummary> {
        let info = self.ytdlp.playlist(url).await?;
        let title = normalize(info.title.as_deref().unwrap_or_default());
        let folder = (!title.is_empty()).then_some(title.as_str());

        let mut summary = PlaylistSummary {
            title: title.clone(),
            ..Default::default()
        };

        let progress = ProgressBar::new(info.entries.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for entry in &info.entries {
            let Some(video_url) = entry.watch_url() else {
                warn!("Skipping playlist entry without URL: {:?}", entry.title);
                summary.failed += 1;
                progress.inc(1);
                continue;
            };
            progress.set_message(entry.title.clone().unwrap_or_default());

            match self.download_one(&video_url, folder).await {
                Ok(DownloadOutcome::Downloaded(_)) => summary.downloaded += 1,
                Ok(DownloadOutcome::AlreadyExists(_)) => summary.skipped += 1,
                Err(e) => {
                    warn!("Download failed for {}: {}", video_url, e);
                    summary.failed += 1;
                }
            }
            progress.inc(1);
        }

        progress.finish_with_message("Playlist complete");
        Ok(summary)
    }
}

/// Remove the scratch files yt-dlp may have left behind
async fn clean_temp_files(temp_base: &Path) {
    for ext in ["", "mp3", "webm", "m4a"] {
        let path = if ext.is_empty() {
            temp_base.to_path_buf()
        } else {
            temp_base.with_extension(ext)
        };
        if fs::remove_file(&path).await.is_ok() {
            debug!("Removed temporary file {}", path.display());
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Default download directory: `~/download`
pub fn default_download_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("download"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader(root: &Path) -> Downloader {
        Downloader::new(YtDlp::new("yt-dlp"), root.to_path_buf()).unwrap()
    }

    #[test]
    fn test_target_path() {
        let d = downloader(Path::new("/music"));
        assert_eq!(d.target_path("Song", None), PathBuf::from("/music/Song.mp3"));
        assert_eq!(
            d.target_path("Song", Some("Road Trip")),
            PathBuf::from("/music/Road Trip/Song.mp3")
        );
    }

    #[tokio::test]
    async fn test_clean_temp_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = dir.path().join(TEMP_NAME);
        std::fs::write(base.with_extension("webm"), b"x").unwrap();
        std::fs::write(base.with_extension("mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("keep.mp3"), b"x").unwrap();

        clean_temp_files(&base).await;

        assert!(!base.with_extension("webm").exists());
        assert!(!base.with_extension("mp3").exists());
        assert!(dir.path().join("keep.mp3").exists());
    }

    #[test]
    fn test_default_download_dir() {
        if let Some(dir) = default_download_dir() {
            assert!(dir.ends_with("download"));
        }
    }
}
