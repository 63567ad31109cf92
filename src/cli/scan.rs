//! Scan command implementation

use colored::Colorize;
use log::info;

use crate::cli::args::{GlobalOptions, ScanArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::detect::{IpReport, SystemUtils, run_detect};
use crate::error::Result;
use crate::models::{ReportFileDisplay, ScanSummary};
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Download Detect, run the scan and evaluate the policy result
pub async fn run(opts: &GlobalOptions, overrides: &ScanArgs) -> Result<()> {
    let ctx = CommandContext::new(opts, overrides)?;
    let utils = SystemUtils::new()?;

    info!("Running Detect in {}", ctx.step.workdir.display());
    let report = run_detect(&ctx.config, &ctx.step, &utils).await?;

    print_result(ctx.format, report.as_ref())
}

fn print_result(format: OutputFormat, report: Option<&IpReport>) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", format_json("scan", &ScanSummary::from_report(report))?);
        }
        OutputFormat::Table => match report {
            Some(ip) => println!(
                "{}",
                format_table(&ReportFileDisplay::from_report(ip), "No risk reports found.")
            ),
            None => println!("{} Detect scan finished", "✓".green()),
        },
        OutputFormat::Pretty => {
            println!("{} Detect scan finished", "✓".green());
            if let Some(ip) = report {
                println!(
                    "  Policy violations: {}",
                    ip.policy_violations.to_string().green()
                );
                for file in &ip.reports {
                    println!("  Risk report: {}", file.cyan());
                }
            }
        }
    }

    Ok(())
}
