//! reqwest-backed downloader

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use reqwest::Client as HttpClient;

use super::Downloader;
use crate::error::{DownloadError, Result};

/// Timeout for a single download
const DOWNLOAD_TIMEOUT_SECS: u64 = 120;

/// HTTP downloader used by the real step
pub struct HttpDownloader {
    http: HttpClient,
}

impl HttpDownloader {
    /// Create a new downloader with the default timeout
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .user_agent(concat!("detectop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DownloadError::from)?;

        Ok(Self { http })
    }
}

fn new_spinner(msg: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

impl HttpDownloader {
    async fn fetch(&self, url: &str, filename: &Path) -> Result<usize> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(DownloadError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(DownloadError::from)?;
        tokio::fs::write(filename, &body)
            .await
            .map_err(|e| DownloadError::Write {
                path: filename.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(body.len())
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download_file(&self, url: &str, filename: &Path) -> Result<()> {
        debug!("Downloading {} to {}", url, filename.display());
        let spinner = new_spinner(format!("Downloading {}", url));

        let result = self.fetch(url, filename).await;
        spinner.finish_and_clear();

        let size = result?;
        debug!("Downloaded {} bytes", size);
        Ok(())
    }
}
