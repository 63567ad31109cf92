//! Report command: evaluate the results of the last scan

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::ScanConfig;
use crate::detect::report;
use crate::error::{Error, Result};
use crate::files::LocalFiles;
use crate::models::{ReportFileDisplay, ScanSummary};
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Read the policy status and risk reports in the working directory.
///
/// Nothing is written. Fails with a policy violation error when the
/// status file reports violations.
pub fn run(opts: &GlobalOptions, policy_status_file: Option<&str>) -> Result<()> {
    let config = ScanConfig::load_at(opts.config_ref())?;
    let status_file = policy_status_file.unwrap_or(config.policy_status_path());
    let ip = report::collect(&LocalFiles, &opts.workdir, status_file)?;

    match opts.format {
        OutputFormat::Json => {
            println!("{}", format_json("report", &ScanSummary::from_report(Some(&ip)))?);
        }
        OutputFormat::Table => println!(
            "{}",
            format_table(&ReportFileDisplay::from_report(&ip), "No risk reports found.")
        ),
        OutputFormat::Pretty => {
            let count = ip.policy_violations.to_string();
            let count = if ip.passed() { count.green() } else { count.red() };
            println!("Policy violations: {}", count);
            if ip.reports.is_empty() {
                println!("{}", "No risk reports found.".dimmed());
            }
            for file in &ip.reports {
                println!("Risk report: {}", file.cyan());
            }
        }
    }

    if ip.passed() {
        Ok(())
    } else {
        Err(Error::PolicyViolation(ip.policy_violations))
    }
}
