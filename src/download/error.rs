//! Errors raised while fetching audio from video pages

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Could not determine a title for {0}")]
    TitleNotFound(String),

    #[error("yt-dlp failed ({status}): {message}")]
    YtDlp { status: String, message: String },

    #[error("yt-dlp produced no audio for {0}")]
    EmptyOutput(String),

    #[error("Failed to parse yt-dlp output: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type DownloadResult<T> = std::result::Result<T, DownloadError>;
