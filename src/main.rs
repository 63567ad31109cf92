//! detectop - Synopsys Detect scans as a pipeline step

use clap::Parser;

mod cli;
mod client;
mod config;
mod detect;
mod error;
mod exec;
mod files;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, ConfigCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over the flags
fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Scan { scan } => cli::scan::run(&opts, &scan).await,
        Commands::Args { scan } => cli::preview::run(&opts, &scan),
        Commands::Report { policy_status_file } => {
            cli::report::run(&opts, policy_status_file.as_deref())
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show { scan } => cli::config::show(&opts, &scan),
            ConfigCommands::Init { path, force, scan } => {
                cli::config::init(path.as_deref(), force, &scan)
            }
        },
        Commands::Version => {
            println!("detectop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
