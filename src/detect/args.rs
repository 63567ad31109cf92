//! Detect command-line argument construction
//!
//! [`build_detect_args`] is a pure function of its inputs: the same base
//! arguments, configuration and directory always give the same list in
//! the same order.
//!
//! Values that may contain spaces (project, version, groups, code
//! location) are wrapped as `"--prop='value'"` so they survive the shell
//! word splitting of the final command string.

use std::path::Path;

use crate::config::ScanConfig;

use super::maven::maven_parameters;
use super::version::version_name;

pub const UNMAP_TRUE: &str = "--detect.project.codelocation.unmap=true";
pub const UNMAP_FALSE: &str = "--detect.project.codelocation.unmap=false";
pub const REPORT_FLAG: &str = "--report";
pub const TOKEN_FLAG: &str = "--blackduck.api.token=";

/// Build the full Detect argument list.
///
/// `base` is emitted first, unchanged. `cwd` anchors the local Maven
/// repository path.
pub fn build_detect_args(base: &[String], config: &ScanConfig, cwd: &Path) -> Vec<String> {
    let mut args: Vec<String> = base.to_vec();
    let mut scan_properties = split_scan_properties(&config.scan_properties);

    let mut unmap = config.unmap;
    if config.scan_on_changes {
        args.push(REPORT_FLAG.to_string());
        unmap = false;
    }

    if unmap {
        let already_set = args.iter().chain(&scan_properties).any(|a| a == UNMAP_TRUE);
        if !already_set {
            args.push(UNMAP_TRUE.to_string());
        }
        scan_properties.retain(|p| p != UNMAP_FALSE);
    } else {
        scan_properties.retain(|p| p != UNMAP_TRUE);
    }

    args.extend(scan_properties);

    let project_name = config.project_name.as_deref().unwrap_or_default();
    let version = version_name(config.version.as_deref(), config.versioning_model.as_deref());

    args.push(format!(
        "--blackduck.url={}",
        config.server_url.as_deref().unwrap_or_default()
    ));
    args.push(format!(
        "{}{}",
        TOKEN_FLAG,
        config.token.as_deref().unwrap_or_default()
    ));
    args.push(format!("\"--detect.project.name='{}'\"", project_name));
    args.push(format!("\"--detect.project.version.name='{}'\"", version));

    if has_leading_value(&config.groups) {
        args.push(format!(
            "\"--detect.project.user.groups='{}'\"",
            config.groups.join(",")
        ));
    }

    if has_leading_value(&config.fail_on) {
        args.push(format!(
            "--detect.policy.check.fail.on.severities={}",
            config.fail_on.join(",")
        ));
    }

    args.push(format!(
        "\"--detect.code.location.name='{}'\"",
        code_location(config, project_name, &version)
    ));

    let maven = maven_parameters(config, cwd);
    if !maven.is_empty() {
        args.push(format!(
            "\"--detect.maven.build.command='{}'\"",
            maven.join(" ")
        ));
    }

    if config
        .scanners
        .iter()
        .any(|s| s == "signature" || s == "source")
    {
        args.push(format!(
            "--detect.blackduck.signature.scanner.paths={}",
            config.scan_paths.join(",")
        ));
    }

    // Only the implicit default is quoted.
    match config.dependency_path.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => args.push(format!("--detect.source.path={}", path)),
        None => args.push("--detect.source.path='.'".to_string()),
    }

    if !config.included_package_managers.is_empty() {
        args.push(format!(
            "--detect.included.detector.types={}",
            join_mapped(&config.included_package_managers, str::to_uppercase)
        ));
    }

    if !config.excluded_package_managers.is_empty() {
        args.push(format!(
            "--detect.excluded.detector.types={}",
            join_mapped(&config.excluded_package_managers, str::to_uppercase)
        ));
    }

    if !config.maven_excluded_scopes.is_empty() {
        args.push(format!(
            "--detect.maven.excluded.scopes={}",
            join_mapped(&config.maven_excluded_scopes, str::to_lowercase)
        ));
    }

    if !config.detect_tools.is_empty() {
        args.push(format!("--detect.tools={}", config.detect_tools.join(",")));
    }

    args
}

/// Split each scan property entry on whitespace, dropping empty fragments
pub fn split_scan_properties(properties: &[String]) -> Vec<String> {
    properties
        .iter()
        .flat_map(|p| p.split_whitespace())
        .map(str::to_string)
        .collect()
}

fn code_location(config: &ScanConfig, project_name: &str, version: &str) -> String {
    match config.code_location.as_deref() {
        Some(location) if !location.is_empty() => location.to_string(),
        _ if !project_name.is_empty() => format!("{}/{}", project_name, version),
        _ => String::new(),
    }
}

fn has_leading_value(values: &[String]) -> bool {
    values.first().is_some_and(|v| !v.is_empty())
}

fn join_mapped(values: &[String], f: fn(&str) -> String) -> String {
    values
        .iter()
        .map(|v| f(v))
        .collect::<Vec<_>>()
        .join(",")
}
