//! Configuration management for ptrstyle
//!
//! ptrstyle reads ~/.ptrstyle/config.toml when it exists, or the file given
//! with --config. Missing sections fall back to the SpiderMonkey defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// ptrstyle configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Which tracked files `--tree` restyles
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Version control settings
    #[serde(default)]
    pub tree: TreeConfig,

    /// Processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// File name suffixes to restyle
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Path prefixes to restyle
    #[serde(default = "default_directories")]
    pub directories: Vec<String>,

    /// Path prefixes never restyled, even inside `directories`
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            directories: default_directories(),
            blacklist: default_blacklist(),
        }
    }
}

/// Version control system used to list tracked files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    /// Mercurial when `.hg` exists in the working directory, git otherwise
    #[default]
    Auto,
    Git,
    Hg,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default)]
    pub vcs: VcsKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Worker threads (0 = one per CPU)
    #[serde(default)]
    pub jobs: usize,

    /// Number of context lines shown around changes with --diff
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            context_lines: default_context_lines(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also append logs to ~/.ptrstyle/ptrstyle.log
    #[serde(default)]
    pub debug: bool,
}

// Default functions for serde
fn default_extensions() -> Vec<String> {
    vec![".h".to_string(), ".cpp".to_string()]
}
fn default_directories() -> Vec<String> {
    ["js/src", "js/public", "js/xpconnect", "js/ipc"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}
fn default_blacklist() -> Vec<String> {
    vec!["js/src/ctypes/libffi".to_string()]
}
fn default_context_lines() -> usize { 3 }

const MAX_CONTEXT_LINES: usize = 10;
const MAX_JOBS: usize = 256;

/// Get the ptrstyle home directory (~/.ptrstyle)
pub fn config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".ptrstyle"))
}

/// Get the default configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the default configuration file content with comments
fn get_default_config_content() -> &'static str {
    r#"# ptrstyle Configuration File
#
# Values set here apply to every run. Use --config to point at another file.

[selection]
# File name suffixes restyled by --tree
extensions = [".h", ".cpp"]

# Only files under one of these path prefixes are restyled by --tree
directories = ["js/src", "js/public", "js/xpconnect", "js/ipc"]

# Files under these prefixes are never restyled by --tree
blacklist = ["js/src/ctypes/libffi"]

[tree]
# Version control used to list tracked files: "auto", "git", or "hg"
# auto - hg when a .hg directory exists in the working directory, git otherwise
vcs = "auto"

[processing]
# Worker threads used to restyle files (0 = one per CPU)
jobs = 0

# Number of context lines shown around changes with --diff (default: 3, max: 10)
context_lines = 3

[logging]
# Also append logs to ~/.ptrstyle/ptrstyle.log (default: false)
debug = false
"#
}

/// Write the default commented configuration file
pub fn save_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    fs::write(path, get_default_config_content())
        .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

    Ok(())
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration
///
/// An explicit path must exist. Without one, ~/.ptrstyle/config.toml is used
/// if present, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Ok(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    parse_config(&config_str)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.selection.extensions.is_empty() {
        anyhow::bail!("Invalid extensions: list is empty");
    }

    if let Some(ext) = config.selection.extensions.iter().find(|e| !e.starts_with('.')) {
        anyhow::bail!("Invalid extension: {} (must start with '.')", ext);
    }

    if config.processing.context_lines > MAX_CONTEXT_LINES {
        anyhow::bail!(
            "Invalid context_lines: {} (max {})",
            config.processing.context_lines,
            MAX_CONTEXT_LINES
        );
    }

    if config.processing.jobs > MAX_JOBS {
        anyhow::bail!("Invalid jobs: {} (max {})", config.processing.jobs, MAX_JOBS);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.selection.extensions, vec![".h", ".cpp"]);
        assert_eq!(config.selection.directories.len(), 4);
        assert_eq!(config.selection.blacklist, vec!["js/src/ctypes/libffi"]);
        assert_eq!(config.tree.vcs, VcsKind::Auto);
        assert_eq!(config.processing.jobs, 0);
        assert_eq!(config.processing.context_lines, 3);
        assert!(!config.logging.debug);
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let config = parse_config(get_default_config_content()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = parse_config("[tree]\nvcs = \"hg\"\n").unwrap();
        assert_eq!(config.tree.vcs, VcsKind::Hg);
        assert_eq!(config.selection, SelectionConfig::default());
        assert_eq!(config.processing.context_lines, 3);
    }

    #[test]
    fn test_unknown_vcs_rejected() {
        assert!(parse_config("[tree]\nvcs = \"svn\"\n").is_err());
    }

    #[test]
    fn test_validate_config_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_empty_extensions() {
        let mut config = Config::default();
        config.selection.extensions.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_extension_without_dot() {
        let mut config = Config::default();
        config.selection.extensions = vec!["cpp".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_context_lines() {
        let mut config = Config::default();
        config.processing.context_lines = 11;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_jobs() {
        let mut config = Config::default();
        config.processing.jobs = 1000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ptrstyle.toml");
        fs::write(&path, "[processing]\njobs = 2\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.processing.jobs, 2);
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_save_default_config_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        save_default_config(&path).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("[selection]"));
        assert!(toml_str.contains("[tree]"));
        assert!(toml_str.contains("[processing]"));
        assert!(toml_str.contains("[logging]"));
    }
}
