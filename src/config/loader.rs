//! Configuration file loading with precedence handling.

use crate::layout::{EngineTimings, LayoutParams, LayoutStrategy};
use crate::loader::LoaderOptions;
use crate::model::PageNumber;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MASONRY_FEED_CONFIG";

/// Environment variable overriding the layout strategy.
pub const STRATEGY_ENV_VAR: &str = "MASONRY_FEED_STRATEGY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

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

    /// A setting parsed but is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name as it appears in the config file.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/masonry-feed/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Gap between columns and between cards, in cells.
    #[serde(default)]
    pub gap: Option<f32>,

    /// Narrowest column before the grid drops a column, in cells.
    #[serde(default)]
    pub min_column_width: Option<f32>,

    /// Column assignment strategy ("shortest" or "breakpoints").
    #[serde(default)]
    pub strategy: Option<LayoutStrategy>,

    /// Articles per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Size of the synthetic catalogue.
    #[serde(default)]
    pub total_items: Option<usize>,

    /// First page requested (1-based).
    #[serde(default)]
    pub initial_page: Option<u32>,

    /// Fraction of the sentinel that must be on screen to trigger a fetch.
    #[serde(default)]
    pub visibility_threshold: Option<f32>,

    /// Pre-fetch distance beyond the viewport, in rows.
    #[serde(default)]
    pub root_margin: Option<f32>,

    /// Simulated latency of the first page in milliseconds.
    #[serde(default)]
    pub initial_latency_ms: Option<u64>,

    /// Simulated latency of every later page in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Layout debounce after new items arrive, in milliseconds.
    #[serde(default)]
    pub item_debounce_ms: Option<u64>,

    /// Layout debounce after a resize, in milliseconds.
    #[serde(default)]
    pub resize_debounce_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
/// Units are terminal cells and rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Gap between columns and cards.
    pub gap: f32,
    /// Minimum column width.
    pub min_column_width: f32,
    /// Column assignment strategy.
    pub strategy: LayoutStrategy,
    /// Articles per page.
    pub page_size: usize,
    /// Catalogue size.
    pub total_items: usize,
    /// First page requested. Validated to be >= 1.
    pub initial_page: u32,
    /// Sentinel visibility threshold in `[0, 1]`.
    pub visibility_threshold: f32,
    /// Sentinel pre-fetch distance.
    pub root_margin: f32,
    /// Simulated latency of the first page in milliseconds.
    pub initial_latency_ms: u64,
    /// Simulated latency of every later page in milliseconds.
    pub latency_ms: u64,
    /// Item-change layout debounce in milliseconds.
    pub item_debounce_ms: u64,
    /// Resize layout debounce in milliseconds.
    pub resize_debounce_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            gap: 2.0,
            min_column_width: 32.0,
            strategy: LayoutStrategy::ShortestColumn,
            page_size: 12,
            total_items: 50,
            initial_page: 1,
            visibility_threshold: 0.1,
            root_margin: 3.0,
            initial_latency_ms: 1000,
            latency_ms: 800,
            item_debounce_ms: 50,
            resize_debounce_ms: 100,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check ranges that the type system does not enforce.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad setting.
    pub fn validate(self) -> Result<Self, ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::InvalidValue {
                field,
                reason: reason.into(),
            }
        }

        if !(self.min_column_width.is_finite() && self.min_column_width >= 1.0) {
            return Err(invalid(
                "min_column_width",
                format!("must be at least 1 (got {})", self.min_column_width),
            ));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(invalid(
                "gap",
                format!("must be non-negative (got {})", self.gap),
            ));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        if self.initial_page == 0 {
            return Err(invalid("initial_page", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(invalid(
                "visibility_threshold",
                format!("must be between 0 and 1 (got {})", self.visibility_threshold),
            ));
        }
        if !(self.root_margin.is_finite() && self.root_margin >= 0.0) {
            return Err(invalid(
                "root_margin",
                format!("must be non-negative (got {})", self.root_margin),
            ));
        }
        Ok(self)
    }

    /// Layout parameters for the engine.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.gap, self.min_column_width)
    }

    /// Loader options for the incremental loader.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            initial_page: PageNumber::new(self.initial_page).unwrap_or_default(),
            visibility_threshold: self.visibility_threshold,
            root_margin: self.root_margin,
        }
    }

    /// Debounce delays for the layout engine.
    pub fn engine_timings(&self) -> EngineTimings {
        EngineTimings {
            item_debounce: Duration::from_millis(self.item_debounce_ms),
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
        }
    }

    /// Simulated latency of the first page.
    pub fn initial_latency(&self) -> Duration {
        Duration::from_millis(self.initial_latency_ms)
    }

    /// Simulated latency of every later page.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/masonry-feed/masonry-feed.log` on Unix-like
/// systems, or the appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("masonry-feed").join("masonry-feed.log")
    } else {
        PathBuf::from("masonry-feed.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
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
/// Returns `~/.config/masonry-feed/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("masonry-feed").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MASONRY_FEED_CONFIG` environment variable
/// 3. Default path `~/.config/masonry-feed/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
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
/// - `MASONRY_FEED_STRATEGY`: Override layout strategy
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the variable names an unknown
/// strategy.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(STRATEGY_ENV_VAR) {
        config.strategy =
            raw.parse::<LayoutStrategy>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: STRATEGY_ENV_VAR,
                    reason: e.to_string(),
                })?;
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        gap: config.gap.unwrap_or(defaults.gap),
        min_column_width: config.min_column_width.unwrap_or(defaults.min_column_width),
        strategy: config.strategy.unwrap_or(defaults.strategy),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        total_items: config.total_items.unwrap_or(defaults.total_items),
        initial_page: config.initial_page.unwrap_or(defaults.initial_page),
        visibility_threshold: config
            .visibility_threshold
            .unwrap_or(defaults.visibility_threshold),
        root_margin: config.root_margin.unwrap_or(defaults.root_margin),
        initial_latency_ms: config
            .initial_latency_ms
            .unwrap_or(defaults.initial_latency_ms),
        latency_ms: config.latency_ms.unwrap_or(defaults.latency_ms),
        item_debounce_ms: config.item_debounce_ms.unwrap_or(defaults.item_debounce_ms),
        resize_debounce_ms: config
            .resize_debounce_ms
            .unwrap_or(defaults.resize_debounce_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Values given explicitly on the command line.
///
/// `None` means the flag was not passed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--strategy`
    pub strategy: Option<LayoutStrategy>,
    /// `--gap`
    pub gap: Option<f32>,
    /// `--min-column-width`
    pub min_column_width: Option<f32>,
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--total`
    pub total_items: Option<usize>,
    /// `--initial-latency-ms`
    pub initial_latency_ms: Option<u64>,
    /// `--latency-ms`
    pub latency_ms: Option<u64>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: &CliOverrides) -> ResolvedConfig {
    if let Some(strategy) = overrides.strategy {
        config.strategy = strategy;
    }
    if let Some(gap) = overrides.gap {
        config.gap = gap;
    }
    if let Some(min_column_width) = overrides.min_column_width {
        config.min_column_width = min_column_width;
    }
    if let Some(page_size) = overrides.page_size {
        config.page_size = page_size;
    }
    if let Some(total_items) = overrides.total_items {
        config.total_items = total_items;
    }
    if let Some(initial_latency_ms) = overrides.initial_latency_ms {
        config.initial_latency_ms = initial_latency_ms;
    }
    if let Some(latency_ms) = overrides.latency_ms {
        config.latency_ms = latency_ms;
    }

    config
}

/// Run the whole precedence chain and validate the result.
///
/// # Errors
///
/// Returns any read, parse, env or validation error.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    overrides: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file);
    let with_env = apply_env_overrides(merged)?;
    apply_cli_overrides(with_env, overrides).validate()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
