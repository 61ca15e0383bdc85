// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Raw MIDI messages exchanged with a control surface.
//!
//! Only the message kinds a control surface speaks are modelled: note-on,
//! control change, pitch bend, sysex and system reset. Everything else on the
//! wire is ignored by [`MidiMessage::parse`].

use super::messages;

/// Largest value carried by a 14-bit pitch-bend message.
pub const PITCH_BEND_MAX: u16 = 16383;

/// Raw MIDI message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiMessage {
    /// Note On: channel (0-15), note (0-127), velocity (0-127, 0 = release)
    NoteOn { channel: u8, note: u8, velocity: u8 },
    /// Control Change: channel (0-15), controller (0-127), value (0-127)
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Pitch Bend: channel (0-15), value (0-16383)
    PitchBend { channel: u8, value: u16 },
    /// System exclusive, including the framing 0xF0 / 0xF7 bytes
    SysEx(Vec<u8>),
    /// System reset (0xFF)
    SystemReset,
}

impl MidiMessage {
    /// Parse raw MIDI bytes into a MidiMessage
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (&status, rest) = data.split_first()?;

        match status {
            messages::SYSTEM_RESET => return Some(MidiMessage::SystemReset),
            messages::SYSEX_START => {
                return match rest.last() {
                    Some(&messages::SYSEX_END) => Some(MidiMessage::SysEx(data.to_vec())),
                    _ => None,
                };
            }
            _ => {}
        }

        let msg_type = status & 0xF0;
        let channel = status & 0x0F;

        match msg_type {
            // Note Off is folded into Note On with velocity 0
            messages::NOTE_OFF if data.len() >= 3 => Some(MidiMessage::NoteOn {
                channel,
                note: data[1] & 0x7F,
                velocity: 0,
            }),
            messages::NOTE_ON if data.len() >= 3 => Some(MidiMessage::NoteOn {
                channel,
                note: data[1] & 0x7F,
                velocity: data[2] & 0x7F,
            }),
            messages::CONTROL_CHANGE if data.len() >= 3 => Some(MidiMessage::ControlChange {
                channel,
                controller: data[1] & 0x7F,
                value: data[2] & 0x7F,
            }),
            messages::PITCH_BEND if data.len() >= 3 => {
                let lsb = (data[1] & 0x7F) as u16;
                let msb = (data[2] & 0x7F) as u16;
                Some(MidiMessage::PitchBend {
                    channel,
                    value: (msb << 7) | lsb,
                })
            }
            _ => None,
        }
    }

    /// Encode to wire bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => vec![messages::NOTE_ON | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            MidiMessage::ControlChange {
                channel,
                controller,
                value,
            } => vec![
                messages::CONTROL_CHANGE | (channel & 0x0F),
                controller & 0x7F,
                value & 0x7F,
            ],
            MidiMessage::PitchBend { channel, value } => {
                let value = (*value).min(PITCH_BEND_MAX);
                vec![
                    messages::PITCH_BEND | (channel & 0x0F),
                    (value & 0x7F) as u8,
                    ((value >> 7) & 0x7F) as u8,
                ]
            }
            MidiMessage::SysEx(bytes) => bytes.clone(),
            MidiMessage::SystemReset => vec![messages::SYSTEM_RESET],
        }
    }

    /// Channel of a channel-voice message
    pub fn channel(&self) -> Option<u8> {
        match self {
            MidiMessage::NoteOn { channel, .. }
            | MidiMessage::ControlChange { channel, .. }
            | MidiMessage::PitchBend { channel, .. } => Some(*channel),
            MidiMessage::SysEx(_) | MidiMessage::SystemReset => None,
        }
    }
}
