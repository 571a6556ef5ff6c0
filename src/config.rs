//! Configuration management for the haptic bridge
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling behavior tweaks without recompilation. The parse mode for the
//! pattern wire format and the engine recovery policy can be adjusted via
//! the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pattern::ParseMode;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub engine: EngineConfig,
}

/// Pattern wire-format parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Fail on unrecognized EventType/ParameterID instead of dropping them.
    /// The lenient default preserves the reference behavior.
    pub strict: bool,
}

impl ParserConfig {
    pub fn mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { strict: false }
    }
}

/// Engine session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Restart the engine automatically after a hardware stop/reset signal
    pub auto_recover: bool,
    /// Buffer size of the session event broadcast channel
    pub event_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_recover: true,
            event_channel_capacity: 128,
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// * `AppConfig` - Loaded configuration, or defaults if the file is
    ///   missing or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from Android assets directory
    ///
    /// Asset access requires going through the Android AssetManager; until
    /// that is wired up the Android build runs on defaults.
    #[cfg(target_os = "android")]
    pub fn load_android() -> Self {
        log::info!(
            "[Config] Using default configuration (Android asset loading not yet implemented)"
        );
        Self::default()
    }

    /// Load configuration for non-Android platforms
    #[cfg(not(target_os = "android"))]
    pub fn load() -> Self {
        Self::load_from_file("assets/haptics_config.json")
    }
}
