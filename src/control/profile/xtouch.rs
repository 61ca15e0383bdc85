// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Behringer X-Touch Compact in standard MIDI mode.
//!
//! Buttons are notes, motor faders are pitch bend on channels 0-8, encoders
//! send relative CCs and take their LED ring level on CC 48-55.
//!
//! Encoder names are asymmetric: `encoder1`..`encoder8` resolve to CC 48-55
//! (`n + 47`), while an inbound controller `c` is named `encoder{c - 15}`, so
//! CC 48 comes back as `encoder33`. Devices in the field are configured
//! around this, so it stays the default; `with_symmetric_encoders` names
//! inbound controllers through the forward table instead.

use super::SurfaceProfile;
use crate::control::codec::{self, EncoderMode};
use crate::control::error::{ControlError, Result};
use crate::control::event::{ButtonValue, ControlCategory};
use crate::control::mapping::{NameMappingTable, RawAddress};
use crate::midi::MidiMessage;

/// Sysex that resets the surface
pub const RESET_SYSEX: [u8; 14] = [
    0xF0, 0x40, 0x41, 0x42, 0x59, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF7,
];

/// Sysex the surface answers with once the reset is done
pub const RESET_ACK_SYSEX: [u8; 14] = [
    0xF0, 0x40, 0x41, 0x42, 0x59, 0x02, 0x02, 0x02, 0x02, 0x01, 0x01, 0x01, 0x01, 0xF7,
];

/// Forward offset from encoder number to LED controller
const ENCODER_CC_OFFSET: u8 = 47;
/// Offset subtracted from an inbound controller to name it
const ENCODER_NAME_OFFSET: u8 = 15;
const FADER_MAIN_CHANNEL: u8 = 8;

/// Transport and utility buttons outside the grid
const BUTTON_CATALOG: [(&str, u8); 14] = [
    ("buttonEncoderDec15", 46),
    ("buttonEncoderInc15", 47),
    ("buttonEncoderDec16", 48),
    ("buttonEncoderInc16", 49),
    ("buttonMain", 50),
    ("buttonB", 84),
    ("buttonA", 85),
    ("buttonLoop", 86),
    ("buttonPrev", 91),
    ("buttonNext", 92),
    ("buttonStop", 93),
    ("buttonPlay", 94),
    ("buttonRec", 95),
    ("buttonTouchMain", 112),
];

/// Touch-sense and encoder push buttons; reserved but never resolved
const HIDDEN_BUTTON_PREFIXES: [&str; 2] = ["buttonTouch", "buttonEncoder"];

#[derive(Debug, Clone)]
pub struct XTouchProfile {
    buttons: NameMappingTable,
    faders: NameMappingTable,
    encoders: NameMappingTable,
    encoder_mode: EncoderMode,
    symmetric_encoders: bool,
}

impl XTouchProfile {
    pub fn new(encoder_mode: EncoderMode) -> Result<Self> {
        let mut buttons = NameMappingTable::builder(ControlCategory::Button);
        for (name, note) in BUTTON_CATALOG {
            buttons = buttons.entry(name, note);
        }
        let buttons = buttons
            // Bottom row
            .run(8, 0, |i| format!("button{}", i + 1))
            // Top row
            .run(8, 8, |i| format!("button{}1", i + 1))
            // Middle row
            .run(8, 16, |i| format!("button{}2", i + 1))
            // Lower upper row
            .run(8, 24, |i| format!("button{}3", i + 1))
            // Encoder push buttons (work up to encoder 14)
            .run(14, 32, |i| format!("buttonEncoder{}", i + 1))
            // Fader touch sense
            .run(8, 104, |i| format!("buttonTouch{}", i + 1));
        let buttons = HIDDEN_BUTTON_PREFIXES
            .iter()
            .fold(buttons, |b, prefix| b.hide_prefix(*prefix))
            .build()?;

        let faders = NameMappingTable::builder(ControlCategory::Fader)
            .run(8, 0, |i| format!("fader{}", i + 1))
            .entry("faderMain", FADER_MAIN_CHANNEL)
            .build()?;

        let encoders = NameMappingTable::builder(ControlCategory::Encoder)
            .run(8, 1 + ENCODER_CC_OFFSET, |i| format!("encoder{}", i + 1))
            .build()?;

        Ok(Self {
            buttons,
            faders,
            encoders,
            encoder_mode,
            symmetric_encoders: false,
        })
    }

    /// Variant whose inbound encoder names match the outbound ones
    pub fn with_symmetric_encoders(encoder_mode: EncoderMode) -> Result<Self> {
        Ok(Self {
            symmetric_encoders: true,
            ..Self::new(encoder_mode)?
        })
    }

    pub fn encoder_mode(&self) -> EncoderMode {
        self.encoder_mode
    }

    pub fn buttons(&self) -> &NameMappingTable {
        &self.buttons
    }

    pub fn faders(&self) -> &NameMappingTable {
        &self.faders
    }
}

impl SurfaceProfile for XTouchProfile {
    fn name(&self) -> &'static str {
        "x-touch"
    }

    fn resolve_button(&self, name: &str) -> Result<u8> {
        Ok(self.buttons.resolve(name)?.number)
    }

    fn button_name(&self, note: u8) -> Result<String> {
        self.buttons
            .reverse_resolve(RawAddress::note(note))
            .map(str::to_string)
    }

    fn resolve_fader(&self, name: &str) -> Result<u8> {
        Ok(self.faders.resolve(name)?.number)
    }

    fn fader_name(&self, channel: u8) -> Result<String> {
        self.faders
            .reverse_resolve(RawAddress::channel(channel))
            .map(str::to_string)
    }

    fn resolve_encoder(&self, name: &str) -> Result<u8> {
        Ok(self.encoders.resolve(name)?.number)
    }

    fn encoder_name(&self, controller: u8) -> Result<String> {
        if self.symmetric_encoders {
            return self
                .encoders
                .reverse_resolve(RawAddress::controller(controller))
                .map(str::to_string);
        }
        match controller.checked_sub(ENCODER_NAME_OFFSET) {
            Some(n) if n >= 1 && controller <= codec::DATA_MAX => Ok(format!("encoder{}", n)),
            _ => Err(ControlError::unknown(ControlCategory::Encoder, controller)),
        }
    }

    fn encode_button_value(&self, value: ButtonValue) -> Result<u8> {
        Ok(match value {
            ButtonValue::Bool(on) => codec::button_bool_to_velocity(on),
            ButtonValue::Raw(raw) => codec::button_bool_to_velocity(raw != 0),
        })
    }

    fn decode_encoder_value(&self, raw: u8) -> Result<i16> {
        codec::cc_to_relative_delta(raw)
    }

    fn encode_encoder_value(&self, value: f64) -> Result<u8> {
        codec::encoder_float_to_cc(value, self.encoder_mode)
    }

    fn reset_message(&self) -> MidiMessage {
        MidiMessage::SysEx(RESET_SYSEX.to_vec())
    }

    fn default_port_hint(&self) -> Option<&'static str> {
        Some("X-TOUCH COMPACT")
    }

    fn is_reset_ack(&self, bytes: &[u8]) -> bool {
        bytes == RESET_ACK_SYSEX.as_slice()
    }
}
