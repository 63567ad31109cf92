//! Args command: show the Detect invocation without running it

use crate::cli::args::{GlobalOptions, ScanArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::detect::maven::{execution_dir, localize_settings};
use crate::detect::{base_args, build_detect_args};
use crate::error::Result;
use crate::models::ArgumentDisplay;
use crate::output::json::format_json;
use crate::output::table::format_table;

/// Print the arguments a scan would pass to `detect.sh`, token masked.
///
/// Remote Maven settings are not downloaded; they are shown at the
/// `.pipeline/` path a scan would download them to.
pub fn run(opts: &GlobalOptions, overrides: &ScanArgs) -> Result<()> {
    let ctx = CommandContext::new(opts, overrides)?;
    let exec_dir = execution_dir(&std::env::current_dir()?, &ctx.step.workdir);
    let config = localize_settings(&ctx.config.masked());

    let args = build_detect_args(&base_args(), &config, &exec_dir);

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json("args", &args)?),
        OutputFormat::Table => println!(
            "{}",
            format_table(&ArgumentDisplay::from_args(&args), "No arguments.")
        ),
        OutputFormat::Pretty => {
            for arg in &args {
                println!("{}", arg);
            }
        }
    }

    Ok(())
}
