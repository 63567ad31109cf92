//! Synopsys Detect scan step
//!
//! The step downloads `detect.sh`, assembles its arguments from a
//! [`ScanConfig`], runs it through bash and removes the script again.
//! When a fail-on policy is configured the generated reports decide
//! whether the step passes.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::client::Downloader;
use crate::config::{ScanConfig, mask_secret};
use crate::error::{Error, Result};
use crate::exec::{ShellRequest, ShellRunner};
use crate::files::FileUtils;

pub mod args;
pub mod maven;
#[cfg(test)]
pub mod mock;
pub mod report;
pub mod system;
pub mod version;

pub use args::{TOKEN_FLAG, build_detect_args};
pub use report::IpReport;
pub use system::SystemUtils;

/// Location of the Detect launcher script
pub const DETECT_SCRIPT_URL: &str = "https://detect.synopsys.com/detect.sh";

/// File name the script is stored under in the working directory
pub const DETECT_SCRIPT: &str = "detect.sh";

pub const DETECT_SHELL: &str = "/bin/bash";

/// Permissions given to the downloaded script
const SCRIPT_MODE: u32 = 0o700;

/// Every collaborator the step needs
pub trait DetectUtils: Downloader + ShellRunner + FileUtils {}

impl<T: Downloader + ShellRunner + FileUtils + ?Sized> DetectUtils for T {}

/// Where and how the step runs
#[derive(Debug, Clone)]
pub struct StepOptions {
    /// Directory the script is stored and executed in
    pub workdir: PathBuf,
    /// Download location of the script
    pub script_url: String,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            script_url: DETECT_SCRIPT_URL.to_string(),
        }
    }
}

/// Arguments the step starts every Detect invocation with
pub fn base_args() -> Vec<String> {
    vec![format!("./{}", DETECT_SCRIPT)]
}

/// Run a complete Detect scan.
///
/// Returns the IP report when a fail-on policy was inspected. A download
/// failure aborts before anything runs; the script is removed after the
/// shell command whether it succeeded or not.
pub async fn run_detect<U>(
    config: &ScanConfig,
    options: &StepOptions,
    utils: &U,
) -> Result<Option<IpReport>>
where
    U: DetectUtils + ?Sized,
{
    let env = step_environment(config)?;
    let script_path = options.workdir.join(DETECT_SCRIPT);

    info!("Downloading Detect from {}", options.script_url);
    utils.download_file(&options.script_url, &script_path).await?;

    let result = execute(config, options, &script_path, env, utils).await;

    if let Err(e) = utils.remove_file(&script_path) {
        warn!("Failed to delete {}: {}", script_path.display(), e);
    }

    result?;
    info!("Detect scan finished");

    if config.fail_on.is_empty() {
        return Ok(None);
    }

    let ip = report::collect(utils, &options.workdir, config.policy_status_path())?;
    report::write_ip_report(utils, &options.workdir, &ip)?;

    if !ip.passed() {
        return Err(Error::PolicyViolation(ip.policy_violations));
    }

    Ok(Some(ip))
}

async fn execute<U>(
    config: &ScanConfig,
    options: &StepOptions,
    script_path: &Path,
    env: Vec<(String, String)>,
    utils: &U,
) -> Result<()>
where
    U: DetectUtils + ?Sized,
{
    utils.chmod(script_path, SCRIPT_MODE)?;

    let exec_dir = maven::execution_dir(&utils.current_dir()?, &options.workdir);
    let resolved = maven::resolve_settings_files(config, &options.workdir, utils).await?;
    let args = build_detect_args(&base_args(), &resolved, &exec_dir);

    debug!("Detect command: {}", redact(&args));
    let script = args.join(" ");

    let request = ShellRequest {
        dir: options.workdir.clone(),
        shell: DETECT_SHELL.to_string(),
        script,
        env,
    };
    utils.run_shell(&request).await
}

/// Environment for the script: phone-home disabled plus custom variables
pub fn step_environment(config: &ScanConfig) -> Result<Vec<(String, String)>> {
    let mut env = vec![(
        "BLACKDUCK_SKIP_PHONE_HOME".to_string(),
        "true".to_string(),
    )];
    env.extend(config.environment()?);
    Ok(env)
}

/// Join `args` into a command line with the API token value masked
pub fn redact(args: &[String]) -> String {
    args.iter()
        .map(|arg| match arg.strip_prefix(TOKEN_FLAG) {
            Some(token) if !token.is_empty() => format!("{}{}", TOKEN_FLAG, mask_secret(token)),
            _ => arg.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
