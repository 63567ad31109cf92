//! Step configuration for detectop
//!
//! A single [`ScanConfig`] drives one scan. It is read from a YAML file,
//! layered with command-line overrides and then handed read-only to the
//! argument builder.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".detectop.yaml";

/// Default location of the policy status file written by Detect
pub const DEFAULT_POLICY_STATUS_FILE: &str = "blackduck-policy-status.json";

/// Commented template written by `detectop config init`
pub const CONFIG_TEMPLATE: &str = r#"# detectop step configuration
serverUrl: https://blackduck.example.com
# token is better supplied via DETECTOP_TOKEN
projectName: my-project
version: "1.0.0"
versioningModel: major
# codeLocation defaults to <projectName>/<version>
unmap: false
scanOnChanges: false
scanners:
  - signature
scanPaths:
  - .
failOn: []
groups: []
scanProperties: []
includedPackageManagers: []
excludedPackageManagers: []
mavenExcludedScopes: []
detectTools: []
customEnvironmentVariables: []
"#;

/// Options for a single Detect scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    /// Black Duck server URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Black Duck API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Black Duck project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Project version, reduced by `versioning_model` before use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// One of `major`, `major-minor`, `semantic`, `full`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning_model: Option<String>,

    /// Code location name; derived from project and version when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_location: Option<String>,

    /// Source path handed to Detect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_path: Option<String>,

    /// Unmap previous code locations of this project version
    pub unmap: bool,

    /// Run a rapid scan that only reports changes
    pub scan_on_changes: bool,

    /// Raw Detect properties, whitespace separated per entry
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scan_properties: Vec<String>,

    /// Policy severities that fail the scan
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fail_on: Vec<String>,

    /// Enabled scanners (`signature`, `source`, ...)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scanners: Vec<String>,

    /// Paths handed to the signature scanner
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scan_paths: Vec<String>,

    /// Black Duck user groups granted access to the project
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_package_managers: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_package_managers: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub maven_excluded_scopes: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detect_tools: Vec<String>,

    /// Local Maven repository path
    #[serde(skip_serializing_if = "Option::is_none", rename = "m2Path")]
    pub m2_path: Option<String>,

    /// Maven project settings file (path or URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_settings_file: Option<String>,

    /// Maven global settings file (path or URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_settings_file: Option<String>,

    /// Extra `KEY=VALUE` pairs exported to the scan script
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_environment_variables: Vec<String>,

    /// Policy status JSON consulted after the scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_status_file: Option<String>,
}

impl ScanConfig {
    /// Path of the user-level config file (`~/.detectop/config.yaml`)
    pub fn home_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".detectop").join("config.yaml"))
    }

    /// Resolve which config file to read, if any.
    ///
    /// An explicit path always wins. Otherwise the project file in the
    /// current directory is preferred over the user-level file; when
    /// neither exists the step runs on defaults.
    pub fn resolve_path(explicit: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Ok(Some(PathBuf::from(path)));
        }

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Ok(Some(project));
        }

        let home = Self::home_path()?;
        if home.exists() {
            return Ok(Some(home));
        }

        Ok(None)
    }

    /// Load configuration using [`ScanConfig::resolve_path`]
    pub fn load_at(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_path(explicit)? {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        log::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ScanConfig = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, contents)?;

        // The file may carry the API token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Parse `custom_environment_variables` into key/value pairs
    pub fn environment(&self) -> Result<Vec<(String, String)>> {
        self.custom_environment_variables
            .iter()
            .map(|entry| match entry.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.to_string()))
                }
                _ => Err(ConfigError::Invalid(format!(
                    "environment variable '{}' must have the form KEY=VALUE",
                    entry
                ))
                .into()),
            })
            .collect()
    }

    /// Policy status file, falling back to the Detect default
    pub fn policy_status_path(&self) -> &str {
        self.policy_status_file
            .as_deref()
            .unwrap_or(DEFAULT_POLICY_STATUS_FILE)
    }

    /// Copy of the configuration that is safe to print
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        if let Some(token) = copy.token.as_mut() {
            *token = mask_secret(token);
        }
        copy
    }
}

/// Replace all but the last four characters of a secret with `*`
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
