//! Configuration file loading with precedence handling.

use crate::state::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, ViewOptions};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tabview/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page on startup.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Sizes offered by the page-size selector.
    #[serde(default)]
    pub page_size_options: Option<Vec<usize>>,

    /// Whether the search input is available.
    #[serde(default)]
    pub show_search: Option<bool>,

    /// Placeholder shown in the empty search input.
    #[serde(default)]
    pub search_placeholder: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Columns to show, in order. Defaults to every key found in the data.
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    /// Columns excluded from the global search.
    #[serde(default)]
    pub unsearchable_columns: Option<Vec<String>>,

    /// Columns that cannot be sorted.
    #[serde(default)]
    pub unsortable_columns: Option<Vec<String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page on startup.
    pub page_size: usize,
    /// Page-size selector options; always contains `page_size`.
    pub page_size_options: Vec<usize>,
    /// Search input available.
    pub show_search: bool,
    /// Search placeholder.
    pub search_placeholder: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Explicit column selection, or `None` for every inferred key.
    pub columns: Option<Vec<String>>,
    /// Columns excluded from search.
    pub unsearchable_columns: Vec<String>,
    /// Columns excluded from sorting.
    pub unsortable_columns: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            show_search: true,
            search_placeholder: "Search...".to_string(),
            log_file_path: default_log_path(),
            columns: None,
            unsearchable_columns: Vec::new(),
            unsortable_columns: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// View options for the data-view engine.
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            loading: false,
            show_search: self.show_search,
            search_placeholder: self.search_placeholder.clone(),
            page_size: self.page_size,
            page_size_options: self.page_size_options.clone(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tabview/tabview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tabview").join("tabview.log")
    } else {
        PathBuf::from("tabview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tabview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `TABVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/tabview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TABVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TABVIEW_PAGE_SIZE`: Override page size (ignored unless a positive integer)
pub fn apply_env_overrides(config: ResolvedConfig) -> ResolvedConfig {
    let page_size = std::env::var("TABVIEW_PAGE_SIZE")
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&size| size > 0);

    match page_size {
        Some(size) => with_page_size(config, size),
        None => config,
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// A zero page size, or an empty options list, falls back to the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let page_size_options = config
        .page_size_options
        .map(|mut options| {
            options.retain(|&size| size > 0);
            options
        })
        .filter(|options| !options.is_empty())
        .unwrap_or(defaults.page_size_options);

    let merged = ResolvedConfig {
        page_size: defaults.page_size,
        page_size_options,
        show_search: config.show_search.unwrap_or(defaults.show_search),
        search_placeholder: config
            .search_placeholder
            .unwrap_or(defaults.search_placeholder),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        columns: config.columns.or(defaults.columns),
        unsearchable_columns: config
            .unsearchable_columns
            .unwrap_or(defaults.unsearchable_columns),
        unsortable_columns: config
            .unsortable_columns
            .unwrap_or(defaults.unsortable_columns),
    };

    let page_size = config
        .page_size
        .filter(|&size| size > 0)
        .unwrap_or(defaults.page_size);
    with_page_size(merged, page_size)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    config: ResolvedConfig,
    page_size_override: Option<usize>,
    columns_override: Option<Vec<String>>,
) -> ResolvedConfig {
    let mut config = match page_size_override.filter(|&size| size > 0) {
        Some(size) => with_page_size(config, size),
        None => config,
    };

    if let Some(columns) = columns_override {
        config.columns = Some(columns);
    }

    config
}

/// Set the page size, adding it to the selector options if missing.
fn with_page_size(mut config: ResolvedConfig, page_size: usize) -> ResolvedConfig {
    config.page_size = page_size;
    if !config.page_size_options.contains(&page_size) {
        config.page_size_options.push(page_size);
        config.page_size_options.sort_unstable();
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_tabview_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("tabview.log"),
            "Default log path should end with 'tabview.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }
}
