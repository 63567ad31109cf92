//! Shell execution of the assembled scan command

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::error::{ExecError, Result};

/// A single shell invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    /// Working directory of the shell
    pub dir: PathBuf,
    /// Shell binary, e.g. `/bin/bash`
    pub shell: String,
    /// Command string passed to the shell with `-c`
    pub script: String,
    /// Extra environment for the child process
    pub env: Vec<(String, String)>,
}

/// Runs a command string through a shell
#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Run the request, failing when the process exits non-zero.
    async fn run_shell(&self, request: &ShellRequest) -> Result<()>;
}

/// Runs commands with `tokio::process`, streaming output to the parent
#[derive(Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl ShellRunner for ProcessRunner {
    async fn run_shell(&self, request: &ShellRequest) -> Result<()> {
        debug!(
            "Running {} in {}",
            request.shell,
            request.dir.display()
        );

        let status = Command::new(&request.shell)
            .arg("-c")
            .arg(&request.script)
            .current_dir(&request.dir)
            .envs(request.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ExecError::Spawn {
                shell: request.shell.clone(),
                reason: e.to_string(),
            })?;

        check_status(status)
    }
}

fn check_status(status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(ExecError::ExitStatus(code).into()),
        None => Err(ExecError::Terminated.into()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    fn request(dir: PathBuf, script: &str) -> ShellRequest {
        ShellRequest {
            dir,
            shell: "/bin/sh".to_string(),
            script: script.to_string(),
            env: vec![("DETECTOP_TEST_VALUE".to_string(), "42".to_string())],
        }
    }

    #[tokio::test]
    async fn test_run_shell_success_uses_dir_and_env() {
        let temp = tempdir().unwrap();
        let req = request(
            temp.path().to_path_buf(),
            "echo \"$DETECTOP_TEST_VALUE\" > out.txt",
        );

        ProcessRunner.run_shell(&req).await.unwrap();

        let out = std::fs::read_to_string(temp.path().join("out.txt")).unwrap();
        assert_eq!(out.trim(), "42");
    }

    #[tokio::test]
    async fn test_run_shell_non_zero_exit() {
        let temp = tempdir().unwrap();
        let req = request(temp.path().to_path_buf(), "exit 7");

        let err = ProcessRunner.run_shell(&req).await.unwrap_err();
        match err {
            Error::Exec(ExecError::ExitStatus(code)) => assert_eq!(code, 7),
            other => panic!("Expected ExitStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_shell_missing_shell() {
        let temp = tempdir().unwrap();
        let mut req = request(temp.path().to_path_buf(), "true");
        req.shell = "/nonexistent/shell".to_string();

        let err = ProcessRunner.run_shell(&req).await.unwrap_err();
        assert!(matches!(err, Error::Exec(ExecError::Spawn { .. })));
    }
}
