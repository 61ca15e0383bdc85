// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Value conversions between logical values and raw MIDI ranges.
//!
//! Every function here is pure. Conversions that can leave their wire range
//! return [`ControlError::OutOfRange`] instead of wrapping or clamping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ControlError, Result};
use crate::midi::PITCH_BEND_MAX;

/// Largest 7-bit data byte
pub const DATA_MAX: u8 = 127;

/// Velocity sent for a lit boolean button
pub const VELOCITY_ON: u8 = 127;

/// Encoder value meaning "ring off"
pub const ENCODER_OFF: f64 = -1.0;

/// Encoder LED ring display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderMode {
    /// One LED at the position
    Single,
    /// Bar from the centre
    Pan,
    /// Bar from the left
    #[default]
    Fan,
    /// Symmetric spread from the centre
    Spread,
}

impl EncoderMode {
    /// Offset in units of 16 added to the LED value
    pub fn offset(&self) -> u8 {
        match self {
            EncoderMode::Single => 0,
            EncoderMode::Pan => 1,
            EncoderMode::Fan => 2,
            EncoderMode::Spread => 3,
        }
    }
}

impl FromStr for EncoderMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(EncoderMode::Single),
            "pan" => Ok(EncoderMode::Pan),
            "fan" => Ok(EncoderMode::Fan),
            "spread" => Ok(EncoderMode::Spread),
            other => Err(format!(
                "invalid encoder mode {other:?} (expected: \"single\", \"pan\", \"fan\", \"spread\")"
            )),
        }
    }
}

impl fmt::Display for EncoderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncoderMode::Single => "single",
            EncoderMode::Pan => "pan",
            EncoderMode::Fan => "fan",
            EncoderMode::Spread => "spread",
        };
        f.write_str(name)
    }
}

/// Fader position (0.0 - 1.0) to 14-bit pitch-bend value: `floor(f * 16383)`.
pub fn fader_float_to_raw(value: f64) -> Result<u16> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ControlError::out_of_range("fader position", value, 1.0));
    }
    Ok((value * PITCH_BEND_MAX as f64).floor() as u16)
}

/// 14-bit pitch-bend value to fader position: `r / 16383`.
pub fn fader_raw_to_float(raw: u16) -> Result<f64> {
    if raw > PITCH_BEND_MAX {
        return Err(ControlError::out_of_range("pitch bend", raw, PITCH_BEND_MAX));
    }
    Ok(raw as f64 / PITCH_BEND_MAX as f64)
}

/// Boolean button state to note velocity
pub fn button_bool_to_velocity(on: bool) -> u8 {
    if on {
        VELOCITY_ON
    } else {
        0
    }
}

/// Relative encoder CC value to signed delta.
///
/// Values up to 32 are positive steps; anything above counts down from 64,
/// so 63 is -1 and 40 is -24.
pub fn cc_to_relative_delta(raw: u8) -> Result<i16> {
    if raw > DATA_MAX {
        return Err(ControlError::out_of_range("controller value", raw, DATA_MAX));
    }
    Ok(if raw <= 32 {
        raw as i16
    } else {
        raw as i16 - 64
    })
}

/// Encoder ring level to LED controller value.
///
/// `-1.0` switches the ring off; otherwise `1 + floor(f * 10) + 16 * offset`.
pub fn encoder_float_to_cc(value: f64, mode: EncoderMode) -> Result<u8> {
    if value == ENCODER_OFF {
        return Ok(0);
    }
    if !value.is_finite() {
        return Err(ControlError::out_of_range("encoder LED value", value, DATA_MAX));
    }

    let raw = 1.0 + (value * 10.0).floor() + 16.0 * mode.offset() as f64;
    if !(0.0..=DATA_MAX as f64).contains(&raw) {
        return Err(ControlError::out_of_range("encoder LED value", raw, DATA_MAX));
    }
    Ok(raw as u8)
}

/// Check a 7-bit data byte before it goes on the wire
pub fn check_data(what: &'static str, value: u8) -> Result<u8> {
    if value > DATA_MAX {
        return Err(ControlError::out_of_range(what, value, DATA_MAX));
    }
    Ok(value)
}

/// Check a MIDI channel (0-15)
pub fn check_channel(channel: u8) -> Result<u8> {
    if channel > 15 {
        return Err(ControlError::out_of_range("channel", channel, 15));
    }
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fader_float_to_raw() {
        assert_eq!(fader_float_to_raw(0.0).unwrap(), 0);
        assert_eq!(fader_float_to_raw(1.0).unwrap(), 16383);
        assert_eq!(fader_float_to_raw(0.3).unwrap(), 4914);
        assert!(fader_float_to_raw(1.01).is_err());
        assert!(fader_float_to_raw(-0.1).is_err());
        assert!(fader_float_to_raw(f64::NAN).is_err());
    }

    #[test]
    fn test_fader_round_trip_within_one_step() {
        for i in 0..=1000 {
            let f = i as f64 / 1000.0;
            let back = fader_raw_to_float(fader_float_to_raw(f).unwrap()).unwrap();
            assert!((back - f).abs() <= 1.0 / 16383.0, "f = {}", f);
            assert!(back <= f);
        }
    }

    #[test]
    fn test_fader_raw_to_float() {
        assert_eq!(fader_raw_to_float(0).unwrap(), 0.0);
        assert_eq!(fader_raw_to_float(16383).unwrap(), 1.0);
        assert!(fader_raw_to_float(16384).is_err());
    }

    #[test]
    fn test_button_bool_to_velocity() {
        assert_eq!(button_bool_to_velocity(true), 127);
        assert_eq!(button_bool_to_velocity(false), 0);
    }

    #[test]
    fn test_cc_to_relative_delta() {
        for raw in 0..=127u8 {
            let expected = if raw <= 32 { raw as i16 } else { raw as i16 - 64 };
            assert_eq!(cc_to_relative_delta(raw).unwrap(), expected);
        }
        assert_eq!(cc_to_relative_delta(1).unwrap(), 1);
        assert_eq!(cc_to_relative_delta(32).unwrap(), 32);
        assert_eq!(cc_to_relative_delta(33).unwrap(), -31);
        assert_eq!(cc_to_relative_delta(63).unwrap(), -1);
        assert!(cc_to_relative_delta(128).is_err());
    }

    #[test]
    fn test_encoder_float_to_cc() {
        assert_eq!(encoder_float_to_cc(ENCODER_OFF, EncoderMode::Fan).unwrap(), 0);
        assert_eq!(encoder_float_to_cc(0.0, EncoderMode::Fan).unwrap(), 33);
        assert_eq!(encoder_float_to_cc(0.0, EncoderMode::Single).unwrap(), 1);
        assert_eq!(encoder_float_to_cc(1.0, EncoderMode::Single).unwrap(), 11);
        assert_eq!(encoder_float_to_cc(0.7, EncoderMode::Fan).unwrap(), 40);
        assert_eq!(encoder_float_to_cc(1.0, EncoderMode::Spread).unwrap(), 59);
    }

    #[test]
    fn test_encoder_float_to_cc_out_of_range() {
        assert!(encoder_float_to_cc(20.0, EncoderMode::Spread).is_err());
        assert!(encoder_float_to_cc(-0.5, EncoderMode::Single).is_err());
        assert!(encoder_float_to_cc(f64::INFINITY, EncoderMode::Fan).is_err());
    }

    #[test]
    fn test_encoder_mode_parse() {
        assert_eq!("fan".parse::<EncoderMode>(), Ok(EncoderMode::Fan));
        assert_eq!(" Spread ".parse::<EncoderMode>(), Ok(EncoderMode::Spread));
        assert!("wide".parse::<EncoderMode>().is_err());
        assert_eq!(EncoderMode::Pan.offset(), 1);
        assert_eq!(EncoderMode::default(), EncoderMode::Fan);
        assert_eq!(EncoderMode::Single.to_string(), "single");
    }

    #[test]
    fn test_check_ranges() {
        assert_eq!(check_data("velocity", 127).unwrap(), 127);
        assert!(check_data("velocity", 128).is_err());
        assert_eq!(check_channel(15).unwrap(), 15);
        assert!(check_channel(16).is_err());
    }
}
