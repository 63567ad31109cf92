//! In-memory collaborators for testing the scan step
//!
//! [`MockDetectUtils`] implements every seam of [`DetectUtils`](super::DetectUtils)
//! without touching the network, the shell or the disk.

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::Downloader;
use crate::error::{DownloadError, ExecError, Result};
use crate::exec::{ShellRequest, ShellRunner};
use crate::files::FileUtils;

/// Mock collaborators.
///
/// Configure behaviour with the builder methods, run the step, then
/// inspect what happened through the accessors.
///
/// # Example
/// ```ignore
/// let utils = MockDetectUtils::new().with_download_error("offline");
/// let err = run_detect(&ScanConfig::default(), &StepOptions::default(), &utils).await;
/// assert!(utils.shell_requests().is_empty());
/// ```
pub struct MockDetectUtils {
    /// Virtual filesystem keyed by normalized path
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    /// Paths removed through `remove_file`
    removed: Mutex<Vec<PathBuf>>,
    /// Modes applied through `chmod`
    modes: Mutex<HashMap<PathBuf, u32>>,
    /// Completed downloads as (url, destination)
    downloads: Mutex<Vec<(String, PathBuf)>>,
    /// Error returned by every download
    download_error: Mutex<Option<String>>,
    /// Shell invocations in call order
    shell_requests: Mutex<Vec<ShellRequest>>,
    /// Script string -> error message
    command_errors: Mutex<HashMap<String, String>>,
    /// Files created when a shell command succeeds
    scan_outputs: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    current_dir: PathBuf,
}

impl Default for MockDetectUtils {
    fn default() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            removed: Mutex::new(Vec::new()),
            modes: Mutex::new(HashMap::new()),
            downloads: Mutex::new(Vec::new()),
            download_error: Mutex::new(None),
            shell_requests: Mutex::new(Vec::new()),
            command_errors: Mutex::new(HashMap::new()),
            scan_outputs: Mutex::new(Vec::new()),
            current_dir: PathBuf::from("/work"),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl MockDetectUtils {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the virtual filesystem
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(normalize(path.as_ref()), contents.as_bytes().to_vec());
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = dir.into();
        self
    }

    /// Fail every download with `message`
    pub fn with_download_error(self, message: &str) -> Self {
        *self.download_error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Fail the shell command whose script equals `script`
    pub fn with_command_error(self, script: &str, message: &str) -> Self {
        self.command_errors
            .lock()
            .unwrap()
            .insert(script.to_string(), message.to_string());
        self
    }

    /// Create `path` when a shell command succeeds, as a scan would
    pub fn with_scan_output(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.scan_outputs
            .lock()
            .unwrap()
            .push((normalize(path.as_ref()), contents.as_bytes().to_vec()));
        self
    }

    /// Destination of the download of `url`, if it happened
    pub fn downloaded_to(&self, url: &str) -> Option<PathBuf> {
        self.downloads
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, dest)| dest.clone())
    }

    pub fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }

    pub fn shell_requests(&self) -> Vec<ShellRequest> {
        self.shell_requests.lock().unwrap().clone()
    }

    pub fn has_removed_file(&self, path: impl AsRef<Path>) -> bool {
        let target = normalize(path.as_ref());
        self.removed.lock().unwrap().iter().any(|p| *p == target)
    }

    pub fn mode_of(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.modes
            .lock()
            .unwrap()
            .get(&normalize(path.as_ref()))
            .copied()
    }

    pub fn file_contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&normalize(path.as_ref()))
            .map(|c| String::from_utf8_lossy(c).into_owned())
    }
}

#[async_trait]
impl Downloader for MockDetectUtils {
    async fn download_file(&self, url: &str, filename: &Path) -> Result<()> {
        if let Some(message) = self.download_error.lock().unwrap().clone() {
            return Err(DownloadError::Transport(message).into());
        }

        self.downloads
            .lock()
            .unwrap()
            .push((url.to_string(), filename.to_path_buf()));
        self.files
            .lock()
            .unwrap()
            .insert(normalize(filename), Vec::new());
        Ok(())
    }
}

#[async_trait]
impl ShellRunner for MockDetectUtils {
    async fn run_shell(&self, request: &ShellRequest) -> Result<()> {
        self.shell_requests.lock().unwrap().push(request.clone());

        if let Some(message) = self.command_errors.lock().unwrap().get(&request.script) {
            return Err(ExecError::Process(message.clone()).into());
        }

        let outputs = self.scan_outputs.lock().unwrap().clone();
        let mut files = self.files.lock().unwrap();
        for (path, contents) in outputs {
            files.insert(path, contents);
        }
        Ok(())
    }
}

impl FileUtils for MockDetectUtils {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(&normalize(path))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(normalize(path), contents.to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let key = normalize(path);
        if self.files.lock().unwrap().remove(&key).is_none() {
            return Err(not_found(path));
        }
        self.removed.lock().unwrap().push(key);
        Ok(())
    }

    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        let key = normalize(path);
        if !self.files.lock().unwrap().contains_key(&key) {
            return Err(not_found(path));
        }
        self.modes.lock().unwrap().insert(key, mode);
        Ok(())
    }

    fn mkdir_all(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let dir = normalize(dir);
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir.as_path()))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }
}

fn not_found(path: &Path) -> crate::error::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
    .into()
}
