//! Configuration and settings management for HandleKit
//!
//! Supports JSON and TOML file formats stored in the platform config
//! directory. Configuration is organized into sections:
//! - History (undo depth)
//! - Handles (rotation snapping and range, minimum scale)
//! - Tools (creation defaults, VR pointer distance)
//!
//! Every section falls back to its defaults when missing from a file.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

const APP_DIR: &str = "handlekit";

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable changes; 0 keeps everything
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Manipulation handle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleSettings {
    /// Increment rotation handles snap to while shift is held
    pub rotation_snap_degrees: f64,
    /// Scale factors below this are ignored by scale handles
    pub min_scale: f64,
    /// Optional `[min, max]` clamp for axial rotation angles
    pub rotation_range_degrees: Option<[f64; 2]>,
}

impl Default for HandleSettings {
    fn default() -> Self {
        Self {
            rotation_snap_degrees: 22.5,
            min_scale: 1e-4,
            rotation_range_degrees: None,
        }
    }
}

impl HandleSettings {
    /// Snap increment in radians
    pub fn snap_increment(&self) -> f64 {
        self.rotation_snap_degrees.to_radians()
    }

    /// Rotation range in radians
    pub fn rotation_range(&self) -> Option<[f64; 2]> {
        self.rotation_range_degrees
            .map(|[min, max]| [min.to_radians(), max.to_radians()])
    }
}

/// Creation and hold tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// RGBA colour given to created primitives
    pub default_color: [f32; 4],
    /// Thickness of created lines
    pub line_thickness: f64,
    /// Pointer length of VR controllers while the hold tool is active
    pub hold_raycast_dist: f64,
    /// RGBA colour of measurements
    pub measure_color: [f32; 4],
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            default_color: [0.7, 0.2, 0.2, 1.0],
            line_thickness: 0.01,
            hold_raycast_dist: 20.0,
            measure_color: [0.976, 0.808, 0.012, 1.0],
        }
    }
}

/// Complete HandleKit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub history: HistorySettings,
    pub handles: HandleSettings,
    pub tools: ToolSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let snap = self.handles.rotation_snap_degrees;
        if !(snap > 0.0 && snap <= 360.0) {
            return Err(ConfigError::out_of_range("handles.rotation_snap_degrees", snap));
        }

        let min_scale = self.handles.min_scale;
        if !(min_scale > 0.0 && min_scale.is_finite()) {
            return Err(ConfigError::out_of_range("handles.min_scale", min_scale));
        }

        if let Some([min, max]) = self.handles.rotation_range_degrees {
            if !(min <= max) {
                return Err(ConfigError::out_of_range(
                    "handles.rotation_range_degrees",
                    format!("[{}, {}]", min, max),
                ));
            }
        }

        for (field, color) in [
            ("tools.default_color", self.tools.default_color),
            ("tools.measure_color", self.tools.measure_color),
        ] {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::out_of_range(field, format!("{:?}", color)));
            }
        }

        let thickness = self.tools.line_thickness;
        if !(thickness > 0.0 && thickness.is_finite()) {
            return Err(ConfigError::out_of_range("tools.line_thickness", thickness));
        }

        let dist = self.tools.hold_raycast_dist;
        if !(dist > 0.0 && dist.is_finite()) {
            return Err(ConfigError::out_of_range("tools.hold_raycast_dist", dist));
        }

        Ok(())
    }

    /// Platform configuration directory for HandleKit
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Default location of the configuration file
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the configuration directory if needed
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load `path` if it exists, defaults otherwise. A file that exists but
    /// does not load is an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
