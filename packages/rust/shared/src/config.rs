//! Application configuration for Pressroom.
//!
//! User config lives at `~/.pressroom/pressroom.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PressroomError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "pressroom.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".pressroom";

// ---------------------------------------------------------------------------
// Config structs (matching pressroom.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Article layout geometry.
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default article bundle output directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default article language tag.
    #[serde(default = "default_language")]
    pub language: String,

    /// Pretty-print article.json by default.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            language: default_language(),
            pretty: default_true(),
        }
    }
}

fn default_output_dir() -> String {
    "~/pressroom-articles".into()
}
fn default_language() -> String {
    "en".into()
}
fn default_true() -> bool {
    true
}

/// `[layout]` section — the column grid the article document declares.
///
/// Serialized verbatim into the article's `layout` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Number of layout columns.
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Layout width in points.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Outer margin in points.
    #[serde(default = "default_margin")]
    pub margin: u32,

    /// Gutter between columns in points.
    #[serde(default = "default_gutter")]
    pub gutter: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            width: default_width(),
            margin: default_margin(),
            gutter: default_gutter(),
        }
    }
}

fn default_columns() -> u32 {
    7
}
fn default_width() -> u32 {
    1024
}
fn default_margin() -> u32 {
    60
}
fn default_gutter() -> u32 {
    20
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.pressroom/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PressroomError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.pressroom/pressroom.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PressroomError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PressroomError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PressroomError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PressroomError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PressroomError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
