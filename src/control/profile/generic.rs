// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generic profile: control names are the raw numbers themselves.

use super::SurfaceProfile;
use crate::control::codec::{self, EncoderMode};
use crate::control::error::{ControlError, Result};
use crate::control::event::{ButtonValue, ControlCategory};
use crate::control::mapping::AddressKind;
use crate::midi::MidiMessage;

/// Parse a numeric control name ("3" -> 3) within the category's range.
pub(crate) fn parse_numeric_name(category: ControlCategory, name: &str) -> Result<u8> {
    let max = AddressKind::for_category(category).max();
    match name.parse::<u8>() {
        Ok(number) if number <= max && number.to_string() == name => Ok(number),
        _ => Err(ControlError::unknown(category, name)),
    }
}

/// Name for a numeric address within the category's range.
pub(crate) fn numeric_name(category: ControlCategory, number: u8) -> Result<String> {
    if number > AddressKind::for_category(category).max() {
        return Err(ControlError::unknown(category, number));
    }
    Ok(number.to_string())
}

/// Any MIDI surface, addressed by raw numbers
#[derive(Debug, Clone, Default)]
pub struct GenericProfile {
    encoder_mode: EncoderMode,
}

impl GenericProfile {
    pub fn new(encoder_mode: EncoderMode) -> Self {
        Self { encoder_mode }
    }

    pub fn encoder_mode(&self) -> EncoderMode {
        self.encoder_mode
    }
}

impl SurfaceProfile for GenericProfile {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn resolve_button(&self, name: &str) -> Result<u8> {
        parse_numeric_name(ControlCategory::Button, name)
    }

    fn button_name(&self, note: u8) -> Result<String> {
        numeric_name(ControlCategory::Button, note)
    }

    fn resolve_fader(&self, name: &str) -> Result<u8> {
        parse_numeric_name(ControlCategory::Fader, name)
    }

    fn fader_name(&self, channel: u8) -> Result<String> {
        numeric_name(ControlCategory::Fader, channel)
    }

    fn resolve_encoder(&self, name: &str) -> Result<u8> {
        parse_numeric_name(ControlCategory::Encoder, name)
    }

    fn encoder_name(&self, controller: u8) -> Result<String> {
        numeric_name(ControlCategory::Encoder, controller)
    }

    fn encode_button_value(&self, value: ButtonValue) -> Result<u8> {
        // Any non-zero raw value lights the button
        Ok(match value {
            ButtonValue::Bool(on) => codec::button_bool_to_velocity(on),
            ButtonValue::Raw(raw) => codec::button_bool_to_velocity(raw != 0),
        })
    }

    fn decode_encoder_value(&self, raw: u8) -> Result<i16> {
        Ok(codec::check_data("controller value", raw)? as i16)
    }

    fn encode_encoder_value(&self, value: f64) -> Result<u8> {
        codec::encoder_float_to_cc(value, self.encoder_mode)
    }

    fn reset_message(&self) -> MidiMessage {
        MidiMessage::SystemReset
    }
}
