//! External tool invocation

use std::path::Path;
use std::process::{Command, Output};

use rel_core::error::{Result, ToolchainError};
use tracing::{debug, instrument};

/// A tool invocation rooted at a project directory
#[derive(Debug, Clone)]
pub struct ToolCommand<'a> {
    program: &'a str,
    args: Vec<&'a str>,
    envs: Vec<(&'a str, &'a str)>,
    dir: &'a Path,
}

impl<'a> ToolCommand<'a> {
    /// Invocation of `program` with `dir` as its working directory
    pub fn new(program: &'a str, dir: &'a Path) -> Self {
        Self {
            program,
            args: Vec::new(),
            envs: Vec::new(),
            dir,
        }
    }

    /// Append arguments
    pub fn args(mut self, args: &[&'a str]) -> Self {
        self.args.extend_from_slice(args);
        self
    }

    /// Set an environment variable for this invocation only
    pub fn env(mut self, key: &'a str, value: &'a str) -> Self {
        self.envs.push((key, value));
        self
    }

    /// Environment set for this invocation
    pub fn env_vars(&self) -> &[(&'a str, &'a str)] {
        &self.envs
    }

    /// Command line as shown in logs and errors
    pub fn display(&self) -> String {
        std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[instrument(skip(self), fields(command = %self.display(), dir = %self.dir.display()))]
    fn output(&self) -> Result<Output> {
        let program = which::which(self.program)
            .map_err(|_| ToolchainError::ToolNotFound(self.program.to_string()))?;

        debug!(program = %program.display(), env = ?self.env_vars(), "running command");
        Command::new(program)
            .args(&self.args)
            .envs(self.envs.iter().copied())
            .current_dir(self.dir)
            .output()
            .map_err(|e| {
                ToolchainError::CommandFailed {
                    command: self.display(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Run to completion, failing with the combined output on a non-zero exit
    pub fn run(&self) -> Result<()> {
        self.stdout().map(|_| ())
    }

    /// Run to completion and return stdout
    pub fn stdout(&self) -> Result<String> {
        let output = self.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolchainError::BuildFailed {
                command: self.display(),
                output: format!("{}{}", stdout, stderr),
            }
            .into());
        }

        Ok(stdout)
    }
}
