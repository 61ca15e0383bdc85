// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Novation Launchpad MK2.
//!
//! Pads are velocity-addressed RGB: the value sent with a note is a palette
//! colour code, not an on/off flag. The channel selects how the LED shows it.
//! The pad grid has no faders or encoders.

use super::generic::{numeric_name, parse_numeric_name};
use super::SurfaceProfile;
use crate::control::codec;
use crate::control::error::{ControlError, Result};
use crate::control::event::{ButtonValue, ControlCategory};
use crate::midi::MidiMessage;

/// LED lighting mode, carried in the note-on channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedMode {
    #[default]
    Static,
    /// Alternate between the colour and the previously set one
    Flash,
    /// Fade the colour in and out
    Pulse,
}

impl LedMode {
    pub fn channel(&self) -> u8 {
        match self {
            LedMode::Static => 0,
            LedMode::Flash => 1,
            LedMode::Pulse => 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LaunchpadProfile;

impl LaunchpadProfile {
    pub fn new() -> Self {
        Self
    }

    fn unsupported(&self, category: ControlCategory) -> ControlError {
        ControlError::UnsupportedControl {
            profile: self.name(),
            category,
        }
    }
}

impl SurfaceProfile for LaunchpadProfile {
    fn name(&self) -> &'static str {
        "launchpad"
    }

    fn resolve_button(&self, name: &str) -> Result<u8> {
        parse_numeric_name(ControlCategory::Button, name)
    }

    fn button_name(&self, note: u8) -> Result<String> {
        numeric_name(ControlCategory::Button, note)
    }

    fn resolve_fader(&self, _name: &str) -> Result<u8> {
        Err(self.unsupported(ControlCategory::Fader))
    }

    fn fader_name(&self, _channel: u8) -> Result<String> {
        Err(self.unsupported(ControlCategory::Fader))
    }

    fn resolve_encoder(&self, _name: &str) -> Result<u8> {
        Err(self.unsupported(ControlCategory::Encoder))
    }

    fn encoder_name(&self, _controller: u8) -> Result<String> {
        Err(self.unsupported(ControlCategory::Encoder))
    }

    fn encode_button_value(&self, value: ButtonValue) -> Result<u8> {
        match value {
            ButtonValue::Raw(colour) => codec::check_data("colour code", colour),
            ButtonValue::Bool(on) => Ok(codec::button_bool_to_velocity(on)),
        }
    }

    fn decode_encoder_value(&self, _raw: u8) -> Result<i16> {
        Err(self.unsupported(ControlCategory::Encoder))
    }

    fn encode_encoder_value(&self, _value: f64) -> Result<u8> {
        Err(self.unsupported(ControlCategory::Encoder))
    }

    fn reset_message(&self) -> MidiMessage {
        MidiMessage::SystemReset
    }

    fn default_port_hint(&self) -> Option<&'static str> {
        Some("LAUNCHPAD MK2")
    }
}
