//! HandleKit Settings Crate
//!
//! Configuration for the undo history, the manipulation handles and the
//! creation and hold tools, loaded from JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, HandleSettings, HistorySettings, ToolSettings, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
