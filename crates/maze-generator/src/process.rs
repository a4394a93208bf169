//! Generator backed by a local command.
//!
//! Runs `<program> <args..> <width> <height>` (for example
//! `java -Xmx512M MazeBuilder 25 10`) and returns its stdout.

use std::path::PathBuf;
use std::process::Stdio;

use maze_model::MazeRequest;
use tokio::process::Command;
use tracing::debug;

use crate::MazeGenerator;
use crate::error::{GeneratorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessGenerator {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Arguments placed before the width and height.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, request: MazeRequest) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(request.width.to_string())
            .arg(request.height.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl MazeGenerator for ProcessGenerator {
    fn describe(&self) -> String {
        if self.args.is_empty() {
            format!("process `{}`", self.program)
        } else {
            format!("process `{} {}`", self.program, self.args.join(" "))
        }
    }

    async fn generate(&self, request: MazeRequest) -> Result<String> {
        debug!(program = %self.program, %request, "spawning generator process");
        let output = self
            .command(request)
            .output()
            .await
            .map_err(|e| GeneratorError::Transport(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let reported = [stderr.trim(), stdout.trim()]
                .into_iter()
                .find(|text| !text.is_empty())
                .unwrap_or("no output");
            return Err(GeneratorError::Rejected {
                detail: format!("{} exited with {}: {reported}", self.program, output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
