//! Config command implementations

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::args::{GlobalOptions, ScanArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::config::{CONFIG_TEMPLATE, PROJECT_CONFIG_FILE, ScanConfig};
use crate::error::{ConfigError, Result};
use crate::output::json::format_json;

/// Print the effective configuration with the token masked
pub fn show(opts: &GlobalOptions, overrides: &ScanArgs) -> Result<()> {
    let ctx = CommandContext::new(opts, overrides)?;
    let masked = ctx.config.masked();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json("config", &masked)?),
        _ => {
            match ScanConfig::resolve_path(opts.config_ref())? {
                Some(path) => println!("# Config file: {}", path.display()),
                None => println!("# No config file found, showing defaults"),
            }
            let yaml =
                serde_yaml::to_string(&masked).map_err(|e| ConfigError::Invalid(e.to_string()))?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// Write a starter config file.
///
/// Without overrides the commented template is written; otherwise the
/// configuration built from the given flags is saved.
pub fn init(path: Option<&Path>, force: bool, overrides: &ScanArgs) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
    }

    let mut config = ScanConfig::default();
    overrides.apply_to(&mut config);

    if config == ScanConfig::default() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, CONFIG_TEMPLATE)?;
    } else {
        config.save_to(&path)?;
    }

    println!(
        "{} Configuration written to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );

    Ok(())
}
