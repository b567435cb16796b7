//! Audio downloads from video URLs via yt-dlp

pub mod downloader;
pub mod error;
pub mod source;
pub mod ytdlp;

pub use downloader::{DownloadOutcome, Downloader, default_download_dir};
pub use source::{is_playlist, validate_url};
pub use ytdlp::YtDlp;
