//! Video URL validation and page-title lookup

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{DownloadError, DownloadResult};

/// Browser user agent; the plain client one gets a consent page instead of the video
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const TITLE_TIMEOUT: Duration = Duration::from_secs(10);

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

static YOUTUBE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*YouTube\s*$").unwrap());

/// Parse a URL and check it points at YouTube
pub fn validate_url(raw: &str) -> DownloadResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| DownloadError::InvalidUrl(raw.to_string()))?;

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let is_youtube = host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com");

    if !is_youtube || !matches!(url.scheme(), "http" | "https") {
        return Err(DownloadError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Whether a validated URL names a playlist rather than a single video
pub fn is_playlist(url: &Url) -> bool {
    url.path().contains("playlist")
}

/// Extract the video title from a watch page
///
/// Entities are decoded and the trailing ` - YouTube` is removed. Returns
/// `None` when the page has no usable title.
pub fn youtube_title_from_html(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let raw: String = document.select(&TITLE_SELECTOR).next()?.text().collect();

    let title = YOUTUBE_SUFFIX.replace(raw.trim(), "").trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Fetches page titles with a browser-like client
#[derive(Clone)]
pub struct TitleFetcher {
    http_client: Client,
}

impl TitleFetcher {
    pub fn new() -> DownloadResult<Self> {
        let http_client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(TITLE_TIMEOUT)
            .build()?;
        Ok(Self { http_client })
    }

    /// Download the watch page and read its title
    pub async fn fetch_title(&self, url: &str) -> DownloadResult<String> {
        debug!("Fetching title from: {}", url);

        let body = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        youtube_title_from_html(&body).ok_or_else(|| DownloadError::TitleNotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_youtube_urls() {
        assert!(validate_url("https://www.youtube.com/watch?v=abc123").is_ok());
        assert!(validate_url("https://youtu.be/abc123").is_ok());
        assert!(validate_url("https://music.youtube.com/watch?v=abc123").is_ok());
    }

    #[test]
    fn test_reject_other_urls() {
        assert!(validate_url("https://vimeo.com/123").is_err());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("https://notyoutube.com/watch?v=x").is_err());
        assert!(validate_url("ftp://youtube.com/watch?v=x").is_err());
    }

    #[test]
    fn test_playlist_detection() {
        let playlist = validate_url("https://www.youtube.com/playlist?list=PL123").unwrap();
        let video = validate_url("https://www.youtube.com/watch?v=abc&list=PL123").unwrap();
        assert!(is_playlist(&playlist));
        assert!(!is_playlist(&video));
    }

    #[test]
    fn test_title_from_html() {
        let html = "<html><head><title>Don&#39;t Stop Me Now - YouTube</title></head></html>";
        assert_eq!(youtube_title_from_html(html).as_deref(), Some("Don't Stop Me Now"));
    }

    #[test]
    fn test_title_missing() {
        assert_eq!(youtube_title_from_html("<html><body>nothing</body></html>"), None);
        assert_eq!(youtube_title_from_html("<title> - YouTube</title>"), None);
    }
}
