//! Configuration loading for the maze tools.
//!
//! A configuration document declares named bounds profiles, the ordered
//! display tiers (plus an optional fallback tier), and the generator
//! transport. Loading validates everything up front, including that every
//! profile's bounds are covered by the sizing tiers.

mod document;
pub mod error;
pub mod settings;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use maze_model::{BoundsProfile, Dimension, DimensionBounds, DisplayTier};
use maze_sizing::{DisplaySizer, SizingRule};
use tracing::debug;

use crate::document::{ConfigDocument, ProfileDocument};
pub use crate::error::{ConfigError, Result};
pub use crate::settings::{BackendKind, GeneratorSettings, HttpSettings, ProcessSettings};

/// The configuration document shipped with the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "maze.toml";

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_profile: String,
    pub profiles: BTreeMap<String, BoundsProfile>,
    pub sizer: DisplaySizer,
    pub generator: GeneratorSettings,
}

impl AppConfig {
    /// Look up a profile by name, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<&BoundsProfile> {
        let name = name.unwrap_or(&self.default_profile);
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.to_string(),
                available: self.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    UserConfig(PathBuf),
    Builtin,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::UserConfig(path) => write!(f, "{}", path.display()),
            Self::Builtin => f.write_str("built-in defaults"),
        }
    }
}

/// Parse and validate a configuration document.
///
/// `origin` only labels parse errors.
pub fn parse_config(text: &str, origin: &str) -> Result<AppConfig> {
    let document: ConfigDocument = toml::from_str(text).map_err(|source| ConfigError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    build_config(document)
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    parse_config(&text, &path.display().to_string())
}

pub fn builtin_config() -> Result<AppConfig> {
    parse_config(DEFAULT_CONFIG, "built-in defaults")
}

/// Path of the per-user configuration file, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "maze").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Resolve configuration: explicit path, then the user config file, then
/// the built-in document.
pub fn resolve_config(explicit: Option<&Path>) -> Result<(AppConfig, ConfigSource)> {
    if let Some(path) = explicit {
        return Ok((load_config(path)?, ConfigSource::Explicit(path.to_path_buf())));
    }
    if let Some(path) = user_config_path().filter(|path| path.is_file()) {
        debug!(path = %path.display(), "using user config");
        let config = load_config(&path)?;
        return Ok((config, ConfigSource::UserConfig(path)));
    }
    Ok((builtin_config()?, ConfigSource::Builtin))
}

fn build_config(document: ConfigDocument) -> Result<AppConfig> {
    if document.profiles.is_empty() {
        return Err(ConfigError::NoProfiles);
    }
    let profiles = document
        .profiles
        .iter()
        .map(|(name, raw)| build_profile(name, raw).map(|profile| (name.clone(), profile)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    let mut rules = Vec::with_capacity(document.sizing.tiers.len());
    for (index, raw) in document.sizing.tiers.iter().enumerate() {
        let tier = checked_tier(index + 1, raw.font_size, raw.rows, raw.cols)?;
        if raw.below_width == 0 || raw.below_height == 0 {
            return Err(ConfigError::InvalidTier {
                index: index + 1,
                message: "thresholds must be positive".to_string(),
            });
        }
        rules.push(SizingRule::new(raw.below_width, raw.below_height, tier));
    }
    let fallback = document
        .sizing
        .fallback
        .map(|raw| checked_tier(rules.len() + 1, raw.font_size, raw.rows, raw.cols))
        .transpose()?;
    let sizer = DisplaySizer::new(rules, fallback);

    for profile in profiles.values() {
        if let Some(gap) = sizer.coverage_gap(profile) {
            return Err(ConfigError::SizingGap {
                profile: profile.name.clone(),
                width: gap.width,
                height: gap.height,
            });
        }
    }

    let raw_generator = document.generator;
    if raw_generator.timeout_secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    let generator = GeneratorSettings {
        backend: raw_generator.backend,
        timeout: Duration::from_secs(raw_generator.timeout_secs),
        process: ProcessSettings {
            program: raw_generator.process.program,
            args: raw_generator.process.args,
            working_dir: raw_generator.process.working_dir,
        },
        http: HttpSettings {
            endpoint: raw_generator.http.endpoint,
        },
    };

    let config = AppConfig {
        default_profile: document.default_profile,
        profiles,
        sizer,
        generator,
    };
    // The default profile must exist.
    config.profile(None)?;
    Ok(config)
}

fn build_profile(name: &str, raw: &ProfileDocument) -> Result<BoundsProfile> {
    let bounds = |field: Dimension, min: u32, max: u32| {
        DimensionBounds::new(min, max).map_err(|source| ConfigError::InvalidBounds {
            profile: name.to_string(),
            field,
            source,
        })
    };
    Ok(BoundsProfile::new(
        name,
        bounds(Dimension::Width, raw.min_width, raw.max_width)?,
        bounds(Dimension::Height, raw.min_height, raw.max_height)?,
    ))
}

fn checked_tier(index: usize, font_size: u32, rows: u32, cols: u32) -> Result<DisplayTier> {
    if font_size == 0 || rows == 0 || cols == 0 {
        return Err(ConfigError::InvalidTier {
            index,
            message: "font_size, rows and cols must be positive".to_string(),
        });
    }
    Ok(DisplayTier::new(font_size, rows, cols))
}
