//! Post-scan report inspection
//!
//! After a scan with a fail-on policy the step reads the policy status
//! written by Detect, collects the generated risk reports and records
//! both in `blackduck-ip.json`.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::files::FileUtils;

/// Summary file written next to the scan results
pub const IP_REPORT_FILE: &str = "blackduck-ip.json";

/// Suffix of the PDF risk reports produced by Detect
pub const RISK_REPORT_SUFFIX: &str = "BlackDuck_RiskReport.pdf";

const IN_VIOLATION: &str = "IN_VIOLATION";

/// Policy status as written by Detect
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyStatus {
    #[serde(default)]
    policy_violations: Option<u32>,

    #[serde(default)]
    component_version_status_counts: Vec<StatusCount>,
}

#[derive(Debug, Deserialize)]
struct StatusCount {
    name: String,
    value: u32,
}

impl PolicyStatus {
    fn violation_count(&self) -> u32 {
        self.policy_violations.unwrap_or_else(|| {
            self.component_version_status_counts
                .iter()
                .find(|c| c.name == IN_VIOLATION)
                .map(|c| c.value)
                .unwrap_or(0)
        })
    }
}

/// IP compliance summary of a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpReport {
    pub tool_name: String,
    pub policy_violations: u32,
    pub reports: Vec<String>,
}

impl IpReport {
    pub fn passed(&self) -> bool {
        self.policy_violations == 0
    }
}

/// Number of policy violations in the status file; 0 when it is absent
pub fn read_violation_count<F: FileUtils + ?Sized>(files: &F, path: &Path) -> Result<u32> {
    if !files.file_exists(path) {
        debug!("No policy status at {}", path.display());
        return Ok(0);
    }

    let contents = files.read_file(path)?;
    let status: PolicyStatus =
        serde_json::from_slice(&contents).map_err(|e| ReportError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(status.violation_count())
}

/// Risk report files directly inside `dir`
pub fn find_risk_reports<F: FileUtils + ?Sized>(files: &F, dir: &Path) -> Result<Vec<String>> {
    Ok(files
        .list_files(dir)?
        .into_iter()
        .filter(|name| name.ends_with(RISK_REPORT_SUFFIX))
        .collect())
}

/// Gather the IP summary for the scan results in `dir`
pub fn collect<F: FileUtils + ?Sized>(
    files: &F,
    dir: &Path,
    policy_status_file: &str,
) -> Result<IpReport> {
    let violations = read_violation_count(files, &dir.join(policy_status_file))?;
    let reports = find_risk_reports(files, dir)?;

    Ok(IpReport {
        tool_name: "BlackDuck".to_string(),
        policy_violations: violations,
        reports,
    })
}

/// Write `report` as [`IP_REPORT_FILE`] into `dir`
pub fn write_ip_report<F: FileUtils + ?Sized>(
    files: &F,
    dir: &Path,
    report: &IpReport,
) -> Result<()> {
    let path = dir.join(IP_REPORT_FILE);
    let contents = serde_json::to_vec(report)?;
    files.write_file(&path, &contents)?;
    info!("Wrote {}", path.display());
    Ok(())
}
