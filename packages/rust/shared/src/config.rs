//! Application configuration for stepdoc.
//!
//! Lookup order: an explicit `--config` path, then `./stepdoc.toml`, then
//! `~/.stepdoc/stepdoc.toml`. CLI flags override config file values, which
//! override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StepdocError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "stepdoc.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".stepdoc";

// ---------------------------------------------------------------------------
// Config structs (matching stepdoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Resource filenames inside step directories.
    #[serde(default)]
    pub layout: ResourceLayout,

    /// Where documents are written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[layout]` section: how resources are named inside each directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLayout {
    /// Directory holding the tutorial overview.
    #[serde(default = "default_overview_dir")]
    pub overview_dir: String,

    /// Description file (required in every directory).
    #[serde(default = "default_description_file")]
    pub description_file: String,

    /// Glob for the source file; the first match is used.
    #[serde(default = "default_source_pattern")]
    pub source_pattern: String,

    /// Raw text placed before the test code. Unset means the section never appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_description_file: Option<String>,

    /// Test driver source.
    #[serde(default = "default_test_driver_file")]
    pub test_driver_file: String,

    /// Command used to run the step (optional resource).
    #[serde(default = "default_run_command_file")]
    pub run_command_file: String,

    /// Captured run output (required resource).
    #[serde(default = "default_run_output_file")]
    pub run_output_file: String,

    /// First character of metadata lines in description files.
    #[serde(default = "default_metadata_marker")]
    pub metadata_marker: char,
}

impl Default for ResourceLayout {
    fn default() -> Self {
        Self {
            overview_dir: default_overview_dir(),
            description_file: default_description_file(),
            source_pattern: default_source_pattern(),
            test_description_file: None,
            test_driver_file: default_test_driver_file(),
            run_command_file: default_run_command_file(),
            run_output_file: default_run_output_file(),
            metadata_marker: default_metadata_marker(),
        }
    }
}

fn default_overview_dir() -> String {
    "overview".into()
}
fn default_description_file() -> String {
    "desc.txt".into()
}
fn default_source_pattern() -> String {
    "*.hpp".into()
}
fn default_test_driver_file() -> String {
    "test_main.cpp".into()
}
fn default_run_command_file() -> String {
    "sample_run.sh".into()
}
fn default_run_output_file() -> String {
    "sample_output.txt".into()
}
fn default_metadata_marker() -> char {
    '%'
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the markdown files are written to.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the per-user config directory (`~/.stepdoc/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StepdocError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Find the config file to use, if any.
///
/// An explicit path must exist. Otherwise `./stepdoc.toml` is preferred over
/// the per-user file.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(StepdocError::config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }

    // No home directory is not fatal here; defaults still apply.
    if let Ok(dir) = config_dir() {
        let user = dir.join(CONFIG_FILE_NAME);
        if user.exists() {
            return Ok(Some(user));
        }
    }

    Ok(None)
}

/// Load the application config. Returns defaults if no config file is found.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match resolve_config_path(explicit)? {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StepdocError::io(path, e))?;

    let config = toml::from_str(&content).map_err(|e| {
        StepdocError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(?path, "loaded config file");
    Ok(config)
}

/// Render a config as pretty TOML.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| StepdocError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_tutorial_convention() {
        let layout = ResourceLayout::default();
        assert_eq!(layout.overview_dir, "overview");
        assert_eq!(layout.description_file, "desc.txt");
        assert_eq!(layout.source_pattern, "*.hpp");
        assert_eq!(layout.test_description_file, None);
        assert_eq!(layout.run_output_file, "sample_output.txt");
        assert_eq!(layout.metadata_marker, '%');
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = render_config(&config).expect("serialize");
        assert!(toml_str.contains("desc.txt"));
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r##"
[layout]
source_pattern = "*.rs"
test_description_file = "test_desc.txt"
metadata_marker = "#"

[output]
dir = "site"
"##;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.layout.source_pattern, "*.rs");
        assert_eq!(
            config.layout.test_description_file.as_deref(),
            Some("test_desc.txt")
        );
        assert_eq!(config.layout.metadata_marker, '#');
        assert_eq!(config.layout.description_file, "desc.txt");
        assert_eq!(config.output.dir, PathBuf::from("site"));
    }

    #[test]
    fn load_config_from_file_and_reject_garbage() {
        let dir = std::env::temp_dir().join(format!("stepdoc-config-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        std::fs::write(&good, "[output]\ndir = \"docs\"\n").unwrap();
        let config = load_config(Some(good.as_path())).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("docs"));

        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "[layout\n").unwrap();
        let err = load_config_from(&bad).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let err = load_config(Some(Path::new("/definitely/not/here/stepdoc.toml"))).unwrap_err();
        assert!(matches!(err, StepdocError::Config { .. }));
    }
}
