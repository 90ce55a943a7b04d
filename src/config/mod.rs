//! Configuration management for Brook.
//!
//! Configuration is read from `~/.config/brook/config.toml` (or the path given
//! with `--config`). If the file doesn't exist, a default configuration with
//! comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.feedbin.com/v2/";

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Remote service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto (default: Feedbin v2)
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Where the credential file lives (default: next to config.toml)
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load `path`, or `~/.config/brook/config.toml` when `None`.
    ///
    /// A missing file is written out with the commented defaults first.
    /// Fields absent from an existing file fall back to their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/brook/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve the credential file path, falling back to
    /// `~/.config/brook/credentials.toml`.
    pub fn credentials_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.credentials.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("credentials.toml")),
        }
    }

    fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("brook"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Commented template written on first run.
    fn default_config_content() -> String {
        r##"# Brook Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
# Endpoint paths are joined onto this URL, so keep the trailing slash
base_url = "https://api.feedbin.com/v2/"

# Request timeout in seconds
timeout_secs = 30

[credentials]
# Defaults to credentials.toml next to this file
# path = "/home/me/.config/brook/credentials.toml"

[colors]
# Menu border and selection highlight
border = "Cyan"
selection_bg = "Cyan"
selection_fg = "Black"

# Feed title shown next to each entry in the menu
feed_title = "DarkGray"

# Metadata colors in the entry view
metadata_author = "Yellow"
metadata_date = "Yellow"
metadata_link = "Blue"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Leaving the menu
quit = ["q", "Esc", "Ctrl+c"]

# Navigation (wraps around at either end)
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]

# Open the highlighted entry
select = ["Enter"]
"##
        .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<ConfigError> for crate::app::BrookError {
    fn from(err: ConfigError) -> Self {
        crate::app::BrookError::Config(err.to_string())
    }
}
