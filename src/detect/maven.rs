//! Maven build parameters for the Detect Maven detector

use std::path::{Path, PathBuf};

use log::debug;

use crate::client::Downloader;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::files::FileUtils;

/// Directory, relative to the working directory, receiving remote settings
pub const SETTINGS_DIR: &str = ".pipeline";
pub const GLOBAL_SETTINGS_TARGET: &str = ".pipeline/mavenGlobalSettings.xml";
pub const PROJECT_SETTINGS_TARGET: &str = ".pipeline/mavenProjectSettings.xml";

/// Whether a settings location must be downloaded first
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Maven CLI parameters derived from the settings and repository options.
///
/// The local repository path is made absolute against `cwd`.
pub fn maven_parameters(config: &ScanConfig, cwd: &Path) -> Vec<String> {
    let mut params = Vec::new();

    if let Some(global) = non_empty(config.global_settings_file.as_deref()) {
        params.push("--global-settings".to_string());
        params.push(global.to_string());
    }

    if let Some(project) = non_empty(config.project_settings_file.as_deref()) {
        params.push("--settings".to_string());
        params.push(project.to_string());
    }

    if let Some(m2) = non_empty(config.m2_path.as_deref()) {
        params.push(format!(
            "-Dmaven.repo.local={}",
            absolute_path(cwd, m2).display()
        ));
    }

    params
}

/// Download settings files given as URLs and point the config at the copies.
///
/// Returns a copy of `config`; local settings paths are left untouched.
pub async fn resolve_settings_files<U>(
    config: &ScanConfig,
    workdir: &Path,
    utils: &U,
) -> Result<ScanConfig>
where
    U: Downloader + FileUtils + ?Sized,
{
    let sources = [
        (config.global_settings_file.as_deref(), GLOBAL_SETTINGS_TARGET),
        (config.project_settings_file.as_deref(), PROJECT_SETTINGS_TARGET),
    ];

    for (location, target) in sources {
        let Some(url) = location.filter(|l| is_remote(l)) else {
            continue;
        };

        utils.mkdir_all(&workdir.join(SETTINGS_DIR))?;
        debug!("Fetching Maven settings from {}", url);
        utils.download_file(url, &workdir.join(target)).await?;
    }

    Ok(localize_settings(config))
}

/// Copy of `config` with remote settings replaced by their download targets
pub fn localize_settings(config: &ScanConfig) -> ScanConfig {
    let mut localized = config.clone();

    for (location, target) in [
        (&mut localized.global_settings_file, GLOBAL_SETTINGS_TARGET),
        (&mut localized.project_settings_file, PROJECT_SETTINGS_TARGET),
    ] {
        if location.as_deref().is_some_and(is_remote) {
            *location = Some(target.to_string());
        }
    }

    localized
}

/// Absolute directory the script runs in; relative Maven paths resolve here
pub fn execution_dir(cwd: &Path, workdir: &Path) -> PathBuf {
    cwd.join(workdir).components().collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn absolute_path(cwd: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    cwd.join(path).components().collect()
}
