//! Shared configuration for the mission planner
//!
//! This crate provides the single source of truth for canvas dimensions,
//! asset paths, eraser bounds and announcement store settings. Configuration
//! is persisted as pretty-printed JSON; every field has a default so partial
//! files load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Compact map layout width in pixels
pub const COMPACT_CANVAS_WIDTH: u32 = 595;

/// Compact map layout height in pixels
pub const COMPACT_CANVAS_HEIGHT: u32 = 451;

/// Wide map layout width in pixels
pub const WIDE_CANVAS_WIDTH: u32 = 635;

/// Wide map layout height in pixels
pub const WIDE_CANVAS_HEIGHT: u32 = 491;

/// Base map image, relative to the working directory
pub const DEFAULT_MAP_PATH: &str = "map.png";

/// Code required to post or delete announcements
pub const DEFAULT_ADMIN_CODE: &str = "BLUEFALCON";

/// Document collection holding announcements
pub const DEFAULT_COLLECTION: &str = "announcements";

/// Number of announcement slots on the board
pub const DEFAULT_SLOT_COUNT: usize = 3;

/// Timeout for a single store request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors reading or writing the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The two map layouts the planner has shipped with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CanvasPreset {
    /// 595x451
    #[default]
    Compact,
    /// 635x491
    Wide,
}

impl CanvasPreset {
    /// (width, height) in pixels
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            CanvasPreset::Compact => (COMPACT_CANVAS_WIDTH, COMPACT_CANVAS_HEIGHT),
            CanvasPreset::Wide => (WIDE_CANVAS_WIDTH, WIDE_CANVAS_HEIGHT),
        }
    }
}

/// Map canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels; the map is resized to fit
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Base map image
    pub map_path: PathBuf,
    /// Previously saved annotations to start from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_path: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::from_preset(CanvasPreset::default())
    }
}

impl CanvasConfig {
    /// Canvas config for a preset layout with the default map path
    pub fn from_preset(preset: CanvasPreset) -> Self {
        let (width, height) = preset.dimensions();
        Self {
            width,
            height,
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            canvas_path: None,
        }
    }
}

/// Eraser size control configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraserConfig {
    pub min_radius: u32,
    pub max_radius: u32,
    pub step: u32,
    pub default_radius: u32,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            min_radius: 5,
            max_radius: 40,
            step: 5,
            default_radius: 10,
        }
    }
}

/// Announcement store configuration
///
/// Without a `project_id` the planner runs offline: the board shows empty
/// slots and posting fails with an "unavailable" notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// Remote document database project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Collection holding announcement documents
    pub collection: String,
    /// Bearer token sent with each request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Code required to post or delete
    pub admin_code: String,
    /// Number of board slots
    pub slot_count: usize,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            collection: DEFAULT_COLLECTION.to_string(),
            api_token: None,
            admin_code: DEFAULT_ADMIN_CODE.to_string(),
            slot_count: DEFAULT_SLOT_COUNT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AnnouncementConfig {
    /// Check if a remote store is configured
    pub fn is_enabled(&self) -> bool {
        self.project_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

/// Complete planner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub canvas: CanvasConfig,
    pub eraser: EraserConfig,
    pub announcements: AnnouncementConfig,
}

/// Result of loading config from disk
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: PlannerConfig,
    /// Why the file was ignored in favor of defaults, if it was
    pub reset_reason: Option<String>,
}

impl PlannerConfig {
    /// Load configuration, failing on a missing or malformed file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration, falling back to defaults
    ///
    /// A missing file silently yields defaults. An unreadable or corrupt file
    /// also yields defaults, with the reason recorded for the caller to report.
    pub fn load_or_default(path: impl AsRef<Path>) -> LoadedConfig {
        let path = path.as_ref();

        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return LoadedConfig {
                config: PlannerConfig::default(),
                reset_reason: None,
            };
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                LoadedConfig {
                    config,
                    reset_reason: None,
                }
            }
            Err(e) => {
                warn!("{}", e);
                let reason = match e {
                    ConfigError::Parse { source, .. } => {
                        format!("Configuration file was corrupted: {}", source)
                    }
                    other => format!("Could not read configuration file: {}", other),
                };
                LoadedConfig {
                    config: PlannerConfig::default(),
                    reset_reason: Some(reason),
                }
            }
        }
    }

    /// Save configuration as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Config saved to {:?}", path);
        Ok(())
    }
}
