//! Download client for the Detect script and remote Maven settings

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

pub mod http;

pub use http::HttpDownloader;

/// Fetches a remote file and writes it to disk
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` and write the body to `filename`.
    ///
    /// Any transport or HTTP failure is returned as is; nothing is
    /// written when the download fails.
    async fn download_file(&self, url: &str, filename: &Path) -> Result<()>;
}
