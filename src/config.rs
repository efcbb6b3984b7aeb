use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::VersionBump;
use crate::error::Result;
use crate::git::{Signer, Sorting};
use crate::range::RangeMode;
use crate::release::{OnTagExists, VersionFloorScope};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "gitmoji-release.toml";

/// Represents the complete configuration for gitmoji-release.
///
/// Every section is optional. Enumerated values are kept as written and
/// validated when a workflow runs, so a bad value fails the command that
/// uses it rather than every command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub range: RangeConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub signature: Option<SignatureConfig>,
}

fn default_range_mode() -> String {
    RangeMode::Auto.to_string()
}

fn default_sorting() -> String {
    Sorting::default().to_string()
}

/// Commit range selection.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RangeConfig {
    /// `auto`, `direct`, `common-base` or `head-only`
    #[serde(default = "default_range_mode")]
    pub mode: String,

    #[serde(default)]
    pub strict_ancestor: bool,

    /// Comma separated sort flags, e.g. `topological,time`
    #[serde(default = "default_sorting")]
    pub sorting: String,
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig {
            mode: default_range_mode(),
            strict_ancestor: false,
            sorting: default_sorting(),
        }
    }
}

impl RangeConfig {
    /// Unknown modes resolve to `direct`
    pub fn mode(&self) -> RangeMode {
        self.mode.parse().unwrap_or_default()
    }

    pub fn sorting(&self) -> Result<Sorting> {
        self.sorting.parse()
    }
}

fn default_bump() -> String {
    VersionBump::default().to_string()
}

fn default_version_floor_scope() -> String {
    VersionFloorScope::default().to_string()
}

fn default_on_tag_exists() -> String {
    OnTagExists::default().to_string()
}

/// Automatic release settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_bump")]
    pub bump: String,

    #[serde(default = "default_version_floor_scope")]
    pub version_floor_scope: String,

    #[serde(default = "default_on_tag_exists")]
    pub on_tag_exists: String,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub prerelease: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            bump: default_bump(),
            version_floor_scope: default_version_floor_scope(),
            on_tag_exists: default_on_tag_exists(),
            draft: false,
            prerelease: false,
        }
    }
}

impl ReleaseConfig {
    pub fn bump(&self) -> Result<VersionBump> {
        self.bump.parse()
    }

    pub fn version_floor_scope(&self) -> Result<VersionFloorScope> {
        self.version_floor_scope.parse()
    }

    pub fn on_tag_exists(&self) -> Result<OnTagExists> {
        self.on_tag_exists.parse()
    }
}

fn default_fallback_to_includes() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Accept a marker anywhere in the subject when none starts it
    #[serde(default = "default_fallback_to_includes")]
    pub fallback_to_includes: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            fallback_to_includes: default_fallback_to_includes(),
        }
    }
}

/// Tagger identity used when the repository has none configured.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SignatureConfig {
    pub name: String,
    pub email: String,
}

impl From<&SignatureConfig> for Signer {
    fn from(signature: &SignatureConfig) -> Self {
        Signer::new(&signature.name, &signature.email)
    }
}

/// Path of the first configuration file found, if any.
///
/// Looks for `gitmoji-release.toml` in the current directory, then in the
/// user config directory.
pub fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional explicit path; it must exist when given
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => match discover_config() {
            Some(path) => path,
            None => {
                debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
