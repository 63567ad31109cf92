//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod config;
pub mod context;
pub mod preview;
pub mod report;
pub mod scan;

pub use args::{OutputFormat, ScanArgs};
pub use context::CommandContext;

/// detectop - run Synopsys Detect scans as a pipeline step
#[derive(Parser, Debug)]
#[command(name = "detectop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "DETECTOP_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "DETECTOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Directory the scan runs in
    #[arg(long, global = true, default_value = ".")]
    pub workdir: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true, env = "DETECTOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Enable informational logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Download location of detect.sh (development only)
    #[arg(long, global = true, env = "DETECTOP_SCRIPT_URL", hide = true)]
    pub script_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and run a Detect scan
    #[command(after_help = "EXAMPLES:\n  \
            detectop scan                                    # Options from .detectop.yaml\n  \
            detectop scan --project-name app --project-version 1.2.0\n  \
            detectop scan --fail-on BLOCKER,CRITICAL         # Fail on policy violations\n  \
            detectop scan --scan-property --detect.timeout=600")]
    Scan {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the Detect arguments without running anything
    ///
    /// Remote Maven settings files are not downloaded; the arguments name
    /// the .pipeline/ paths a scan downloads them to.
    Args {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show the policy result of the last scan in the working directory
    Report {
        /// Policy status JSON to read
        #[arg(long)]
        policy_status_file: Option<String>,
    },

    /// Inspect or create the step configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   detectop completion bash > /etc/bash_completion.d/detectop
  zsh:    detectop completion zsh > \"${fpath[1]}/_detectop\"
  fish:   detectop completion fish > ~/.config/fish/completions/detectop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (token masked)
    Show {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Write a starter configuration file
    Init {
        /// Destination (defaults to ./.detectop.yaml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_flags_parse() {
        let cli = Cli::parse_from([
            "detectop",
            "scan",
            "--project-name",
            "demo",
            "--fail-on",
            "BLOCKER",
        ]);

        match cli.command {
            Commands::Scan { scan } => {
                assert_eq!(scan.project_name.as_deref(), Some("demo"));
                assert_eq!(scan.fail_on, vec!["BLOCKER"]);
            }
            _ => panic!("Expected scan command"),
        }
    }

    #[test]
    fn test_config_init_parse() {
        let cli = Cli::parse_from(["detectop", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true, .. })
        ));
    }
}
