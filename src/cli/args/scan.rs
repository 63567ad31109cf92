//! Scan option overrides
//!
//! Every [`ScanConfig`] field can be set from the command line or the
//! environment. Unset flags leave the config file value in place.

use clap::Args;

use crate::config::ScanConfig;

/// Command-line overrides for scan options
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Black Duck server URL
    #[arg(long, env = "DETECTOP_SERVER_URL", hide_env = true)]
    pub server_url: Option<String>,

    /// Black Duck API token
    #[arg(long, env = "DETECTOP_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Black Duck project name
    #[arg(long)]
    pub project_name: Option<String>,

    /// Project version
    #[arg(long)]
    pub project_version: Option<String>,

    /// Versioning model applied to the version (major, major-minor, semantic, full)
    #[arg(long)]
    pub versioning_model: Option<String>,

    /// Code location name (defaults to <project>/<version>)
    #[arg(long)]
    pub code_location: Option<String>,

    /// Source path handed to Detect
    #[arg(long)]
    pub dependency_path: Option<String>,

    /// Unmap previous code locations
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub unmap: Option<bool>,

    /// Run a rapid scan reporting only changes
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub scan_on_changes: Option<bool>,

    /// Additional Detect properties (repeatable)
    #[arg(long = "scan-property", allow_hyphen_values = true)]
    pub scan_properties: Vec<String>,

    /// Policy severities that fail the scan, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub fail_on: Vec<String>,

    /// Enabled scanners, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub scanners: Vec<String>,

    /// Signature scanner paths, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub scan_paths: Vec<String>,

    /// Black Duck user groups, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Package managers to include, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub included_package_managers: Vec<String>,

    /// Package managers to exclude, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub excluded_package_managers: Vec<String>,

    /// Maven scopes to exclude, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub maven_excluded_scopes: Vec<String>,

    /// Detect tools to enable, comma-separated or repeated
    #[arg(long, value_delimiter = ',')]
    pub detect_tools: Vec<String>,

    /// Local Maven repository path
    #[arg(long)]
    pub m2_path: Option<String>,

    /// Maven project settings file (path or URL)
    #[arg(long)]
    pub project_settings_file: Option<String>,

    /// Maven global settings file (path or URL)
    #[arg(long)]
    pub global_settings_file: Option<String>,

    /// Extra KEY=VALUE environment for the scan script (repeatable)
    #[arg(long = "env")]
    pub custom_environment_variables: Vec<String>,

    /// Policy status JSON consulted after the scan
    #[arg(long)]
    pub policy_status_file: Option<String>,
}

impl ScanArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply_to(&self, config: &mut ScanConfig) {
        override_value(&mut config.server_url, &self.server_url);
        override_value(&mut config.token, &self.token);
        override_value(&mut config.project_name, &self.project_name);
        override_value(&mut config.version, &self.project_version);
        override_value(&mut config.versioning_model, &self.versioning_model);
        override_value(&mut config.code_location, &self.code_location);
        override_value(&mut config.dependency_path, &self.dependency_path);
        override_value(&mut config.m2_path, &self.m2_path);
        override_value(&mut config.project_settings_file, &self.project_settings_file);
        override_value(&mut config.global_settings_file, &self.global_settings_file);
        override_value(&mut config.policy_status_file, &self.policy_status_file);

        if let Some(unmap) = self.unmap {
            config.unmap = unmap;
        }
        if let Some(scan_on_changes) = self.scan_on_changes {
            config.scan_on_changes = scan_on_changes;
        }

        override_list(&mut config.scan_properties, &self.scan_properties);
        override_list(&mut config.fail_on, &self.fail_on);
        override_list(&mut config.scanners, &self.scanners);
        override_list(&mut config.scan_paths, &self.scan_paths);
        override_list(&mut config.groups, &self.groups);
        override_list(
            &mut config.included_package_managers,
            &self.included_package_managers,
        );
        override_list(
            &mut config.excluded_package_managers,
            &self.excluded_package_managers,
        );
        override_list(&mut config.maven_excluded_scopes, &self.maven_excluded_scopes);
        override_list(&mut config.detect_tools, &self.detect_tools);
        override_list(
            &mut config.custom_environment_variables,
            &self.custom_environment_variables,
        );
    }
}

fn override_value(target: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

fn override_list(target: &mut Vec<String>, values: &[String]) {
    if !values.is_empty() {
        *target = values.to_vec();
    }
}
