// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for a control surface session.
//!
//! Selects the device profile and its fixed options, the MIDI ports to open
//! and the log level. Files are YAML or TOML, chosen by extension; every
//! field has a default.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::control::{DeviceProfile, EncoderMode, ProfileKind, SurfaceProfile};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SurfaceConfig {
    /// Device profile settings
    #[serde(default)]
    pub device: DeviceConfig,
    /// MIDI port settings
    #[serde(default)]
    pub midi: MidiPortConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SurfaceConfig {
    /// Load a configuration file; `.toml` is parsed as TOML, anything else as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_yaml(&contents)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    pub fn validate(&self) -> Result<()> {
        if self.midi.client_name.trim().is_empty() {
            return Err(anyhow!("Client name must not be empty"));
        }
        self.logging.level()?;
        Ok(())
    }
}

/// Device profile settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Which profile to use
    #[serde(default)]
    pub profile: ProfileKind,
    /// Encoder LED ring display mode
    #[serde(default)]
    pub encoder_mode: EncoderMode,
    /// Name inbound X-Touch encoders through the forward table
    #[serde(default)]
    pub symmetric_encoders: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            profile: ProfileKind::default(),
            encoder_mode: EncoderMode::default(),
            symmetric_encoders: false,
        }
    }
}

impl DeviceConfig {
    /// Build the configured profile
    pub fn build_profile(&self) -> Result<DeviceProfile> {
        DeviceProfile::build(self.profile, self.encoder_mode, self.symmetric_encoders)
            .with_context(|| format!("Failed to build {:?} profile", self.profile))
    }
}

/// MIDI port settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MidiPortConfig {
    /// Client name announced to the MIDI system
    #[serde(default = "default_client_name")]
    pub client_name: String,
    /// Input port name fragment
    #[serde(default)]
    pub input: Option<String>,
    /// Output port name fragment
    #[serde(default)]
    pub output: Option<String>,
}

fn default_client_name() -> String {
    "surface".to_string()
}

impl Default for MidiPortConfig {
    fn default() -> Self {
        Self {
            client_name: default_client_name(),
            input: None,
            output: None,
        }
    }
}

impl MidiPortConfig {
    /// Input port fragment, falling back to the profile's hint
    pub fn input_port<'a>(&'a self, profile: &DeviceProfile) -> Option<&'a str> {
        self.input.as_deref().or(profile.default_port_hint())
    }

    /// Output port fragment, falling back to the profile's hint
    pub fn output_port<'a>(&'a self, profile: &DeviceProfile) -> Option<&'a str> {
        self.output.as_deref().or(profile.default_port_hint())
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level> {
        self.level
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid log level: {:?}", self.level))
    }
}
