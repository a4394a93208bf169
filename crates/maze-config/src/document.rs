//! Raw TOML document shape, before validation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::settings::BackendKind;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigDocument {
    pub default_profile: String,
    pub profiles: BTreeMap<String, ProfileDocument>,
    pub sizing: SizingDocument,
    #[serde(default)]
    pub generator: GeneratorDocument,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileDocument {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SizingDocument {
    #[serde(default)]
    pub tiers: Vec<TierRuleDocument>,
    pub fallback: Option<TierDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TierRuleDocument {
    pub below_width: u32,
    pub below_height: u32,
    pub font_size: u32,
    pub rows: u32,
    pub cols: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TierDocument {
    pub font_size: u32,
    pub rows: u32,
    pub cols: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GeneratorDocument {
    pub backend: BackendKind,
    pub timeout_secs: u64,
    pub process: ProcessDocument,
    pub http: HttpDocument,
}

impl Default for GeneratorDocument {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            timeout_secs: maze_generator::DEFAULT_TIMEOUT.as_secs(),
            process: ProcessDocument::default(),
            http: HttpDocument::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ProcessDocument {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for ProcessDocument {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec!["-Xmx512M".to_string(), "MazeBuilder".to_string()],
            working_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct HttpDocument {
    pub endpoint: String,
}

impl Default for HttpDocument {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/mazebuilder.php".to_string(),
        }
    }
}
