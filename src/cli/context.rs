//! Command execution context
//!
//! Loads the configuration, applies command-line overrides and resolves
//! where the step runs, so handlers start from a ready [`ScanConfig`].

use crate::cli::args::{GlobalOptions, ScanArgs};
use crate::cli::OutputFormat;
use crate::config::ScanConfig;
use crate::detect::{DETECT_SCRIPT_URL, StepOptions};
use crate::error::Result;

/// Context for command execution containing config and runtime options.
pub struct CommandContext {
    /// Configuration with CLI/env overrides applied
    pub config: ScanConfig,
    /// Working directory and script location
    pub step: StepOptions,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns an error if an explicitly named config file is missing or
    /// any config file fails to parse.
    pub fn new(opts: &GlobalOptions, overrides: &ScanArgs) -> Result<Self> {
        let mut config = ScanConfig::load_at(opts.config_ref())?;
        overrides.apply_to(&mut config);

        let step = StepOptions {
            workdir: opts.workdir.clone(),
            script_url: opts
                .script_url
                .clone()
                .unwrap_or_else(|| DETECT_SCRIPT_URL.to_string()),
        };

        Ok(Self {
            config,
            step,
            format: opts.format,
        })
    }
}
