use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use rollcall_core::OverlapPolicy;
use rollcall_engine::{ScrapeSettings, DEFAULT_POLL_INTERVAL};
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./rollcall.ron";
const DEFAULT_STORAGE_PATH: &str = "./rollcall_storage.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum OverlapSetting {
    #[default]
    SkipWhileInFlight,
    AllowOverlap,
}

impl From<OverlapSetting> for OverlapPolicy {
    fn from(setting: OverlapSetting) -> Self {
        match setting {
            OverlapSetting::SkipWhileInFlight => OverlapPolicy::SkipWhileInFlight,
            OverlapSetting::AllowOverlap => OverlapPolicy::AllowOverlap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub tile_selector: String,
    pub avatar_selector: String,
    pub label_selector: String,
    pub excluded_labels: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        let defaults = ScrapeSettings::default();
        Self {
            tile_selector: defaults.tile_selector,
            avatar_selector: defaults.avatar_selector,
            label_selector: defaults.label_selector,
            excluded_labels: defaults.excluded_labels,
        }
    }
}

impl From<ScrapeConfig> for ScrapeSettings {
    fn from(config: ScrapeConfig) -> Self {
        Self {
            tile_selector: config.tile_selector,
            avatar_selector: config.avatar_selector,
            label_selector: config.label_selector,
            excluded_labels: config.excluded_labels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Saved call page standing in for the active tab. `None` means no tab.
    pub page_path: Option<PathBuf>,
    pub page_base_url: Option<String>,
    pub page_charset: Option<String>,
    /// `None` keeps the roster in memory for this session only.
    pub storage_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
    pub overlap_policy: OverlapSetting,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    pub scrape: ScrapeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_path: None,
            page_base_url: None,
            page_charset: None,
            storage_path: Some(PathBuf::from(DEFAULT_STORAGE_PATH)),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            overlap_policy: OverlapSetting::default(),
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
            scrape: ScrapeConfig::default(),
        }
    }
}

/// Read the config file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_config(&content).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}
