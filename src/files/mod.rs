//! Local filesystem access used by the scan step

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Filesystem operations the step needs
pub trait FileUtils: Send + Sync {
    /// Current working directory of the process
    fn current_dir(&self) -> Result<PathBuf>;

    fn file_exists(&self, path: &Path) -> bool;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Set unix permission bits; a no-op on other platforms
    fn chmod(&self, path: &Path, mode: u32) -> Result<()>;

    /// Create a directory and all missing parents
    fn mkdir_all(&self, path: &Path) -> Result<()>;

    /// File names (not paths) directly inside `dir`, sorted
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;
}

/// [`FileUtils`] backed by `std::fs`
#[derive(Debug, Default)]
pub struct LocalFiles;

impl FileUtils for LocalFiles {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        Ok(std::fs::remove_file(path)?)
    }

    #[cfg(unix)]
    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn chmod(&self, _path: &Path, _mode: u32) -> Result<()> {
        Ok(())
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
