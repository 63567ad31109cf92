//! Display models for table and JSON output
//!
//! Display models turn step results into CLI-friendly rows with
//! appropriate column names and serialization.

use serde::Serialize;
use tabled::Tabled;

use crate::detect::IpReport;

/// One Detect argument, numbered in emission order
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ArgumentDisplay {
    #[tabled(rename = "#")]
    pub index: usize,

    #[tabled(rename = "ARGUMENT")]
    pub argument: String,
}

impl ArgumentDisplay {
    /// Number `args` starting at 1
    pub fn from_args(args: &[String]) -> Vec<Self> {
        args.iter()
            .enumerate()
            .map(|(i, argument)| Self {
                index: i + 1,
                argument: argument.clone(),
            })
            .collect()
    }
}

/// Risk report file row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ReportFileDisplay {
    #[tabled(rename = "RISK REPORT")]
    pub file: String,
}

impl ReportFileDisplay {
    pub fn from_report(report: &IpReport) -> Vec<Self> {
        report
            .reports
            .iter()
            .map(|file| Self { file: file.clone() })
            .collect()
    }
}

/// Outcome of a scan step for JSON output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// `passed` or `failed`
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_violations: Option<u32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<String>,
}

impl ScanSummary {
    pub fn from_report(report: Option<&IpReport>) -> Self {
        match report {
            Some(ip) => Self {
                status: if ip.passed() { "passed" } else { "failed" }.to_string(),
                policy_violations: Some(ip.policy_violations),
                reports: ip.reports.clone(),
            },
            None => Self {
                status: "passed".to_string(),
                policy_violations: None,
                reports: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(violations: u32) -> IpReport {
        IpReport {
            tool_name: "BlackDuck".to_string(),
            policy_violations: violations,
            reports: vec!["app_BlackDuck_RiskReport.pdf".to_string()],
        }
    }

    #[test]
    fn test_arguments_numbered_from_one() {
        let rows = ArgumentDisplay::from_args(&["./detect.sh".to_string(), "--a=1".to_string()]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[1].argument, "--a=1");
    }

    #[test]
    fn test_summary_without_report() {
        let summary = ScanSummary::from_report(None);
        assert_eq!(summary.status, "passed");
        assert!(summary.policy_violations.is_none());

        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"status":"passed"}"#);
    }

    #[test]
    fn test_summary_with_violations() {
        let summary = ScanSummary::from_report(Some(&report(3)));
        assert_eq!(summary.status, "failed");
        assert_eq!(summary.policy_violations, Some(3));
        assert_eq!(summary.reports.len(), 1);
    }

    #[test]
    fn test_report_rows() {
        let rows = ReportFileDisplay::from_report(&report(0));
        assert_eq!(rows[0].file, "app_BlackDuck_RiskReport.pdf");
    }
}
