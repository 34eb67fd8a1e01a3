//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the bcd-config.toml file.
//! It replaces what used to be compile-time switches (show seconds, disconnect
//! notification) with values chosen once at startup and handed to the clock face.

use crate::layout::MAX_RADIUS;
use crate::render::Palette;
use crate::ClockError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "bcd-config.toml";

/// Application configuration loaded from bcd-config.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Clock face options
    #[serde(default)]
    pub face: FaceConfig,
    /// Display geometry
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Clock face options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Draw a seconds unit and tick every second (otherwise every minute)
    pub show_seconds: bool,
    /// Pulse once when the phone connection drops
    pub disconnect_notification: bool,
    /// Dot radius override (1 to 255); defaults to 8 with seconds, 10 without
    pub radius: Option<u32>,
    /// Black dots on white instead of white on black
    pub invert: bool,
}

/// Display geometry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    /// Height of the date band across the top
    pub date_height: u32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            show_seconds: true,
            disconnect_notification: true,
            radius: None,
            invert: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 144,      // 1.26" memory LCD
            height: 168,     // 1.26" memory LCD
            date_height: 40, // fits FONT_10X20 with margin
        }
    }
}

/// How often the host delivers ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickGranularity {
    Second,
    Minute,
}

impl TickGranularity {
    pub fn period(self) -> Duration {
        match self {
            TickGranularity::Second => Duration::from_secs(1),
            TickGranularity::Minute => Duration::from_secs(60),
        }
    }
}

impl FaceConfig {
    pub fn granularity(&self) -> TickGranularity {
        if self.show_seconds {
            TickGranularity::Second
        } else {
            TickGranularity::Minute
        }
    }

    /// Two columns per field: hours and minutes, plus seconds when shown.
    pub fn column_count(&self) -> u32 {
        if self.show_seconds {
            6
        } else {
            4
        }
    }

    pub fn radius(&self) -> u32 {
        match self.radius {
            Some(radius) => radius.clamp(1, MAX_RADIUS),
            None if self.show_seconds => 8,
            None => 10,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.invert)
    }
}

impl Config {
    /// Load configuration from bcd-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                info!(
                    "Loaded configuration from {} (seconds: {})",
                    path.display(),
                    config.face.show_seconds
                );
                config
            }
            Err(ClockError::Io(_)) => {
                info!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Invalid config file {}: {}", path.display(), e);
                warn!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration, reporting missing or malformed files
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClockError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&contents)?)
    }

    /// Save configuration to specified path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ClockError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
