//! Generator settings resolved from configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use maze_generator::{GeneratorBackend, HttpGenerator, ProcessGenerator};
use serde::{Deserialize, Serialize};

/// Which transport reaches the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Run a local command.
    #[default]
    Process,
    /// POST to an HTTP endpoint.
    Http,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Process => "process",
            Self::Http => "http",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSettings {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub backend: BackendKind,
    pub timeout: Duration,
    pub process: ProcessSettings,
    pub http: HttpSettings,
}

impl GeneratorSettings {
    /// Build the transport selected by [`backend`](Self::backend).
    pub fn build_backend(&self) -> maze_generator::Result<GeneratorBackend> {
        Ok(match self.backend {
            BackendKind::Process => GeneratorBackend::Process(
                ProcessGenerator::new(self.process.program.clone())
                    .with_args(self.process.args.iter().cloned())
                    .with_working_dir(self.process.working_dir.clone()),
            ),
            BackendKind::Http => {
                GeneratorBackend::Http(HttpGenerator::new(self.http.endpoint.clone())?)
            }
        })
    }
}
