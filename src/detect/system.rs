//! Production collaborators for the scan step

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::client::{Downloader, HttpDownloader};
use crate::error::Result;
use crate::exec::{ProcessRunner, ShellRequest, ShellRunner};
use crate::files::{FileUtils, LocalFiles};

/// HTTP downloads, real processes and the local filesystem
pub struct SystemUtils {
    downloader: HttpDownloader,
    runner: ProcessRunner,
    files: LocalFiles,
}

impl SystemUtils {
    pub fn new() -> Result<Self> {
        Ok(Self {
            downloader: HttpDownloader::new()?,
            runner: ProcessRunner,
            files: LocalFiles,
        })
    }
}

#[async_trait]
impl Downloader for SystemUtils {
    async fn download_file(&self, url: &str, filename: &Path) -> Result<()> {
        self.downloader.download_file(url, filename).await
    }
}

#[async_trait]
impl ShellRunner for SystemUtils {
    async fn run_shell(&self, request: &ShellRequest) -> Result<()> {
        self.runner.run_shell(request).await
    }
}

impl FileUtils for SystemUtils {
    fn current_dir(&self) -> Result<PathBuf> {
        self.files.current_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.file_exists(path)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.read_file(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.files.write_file(path, contents)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.files.remove_file(path)
    }

    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        self.files.chmod(path, mode)
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        self.files.mkdir_all(path)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        self.files.list_files(dir)
    }
}
