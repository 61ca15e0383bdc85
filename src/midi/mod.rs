// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI I/O abstraction layer.
//!
//! This module provides the raw message model and a trait-based abstraction
//! for MIDI output, so the translation core can drive real hardware through
//! `midir` or record its traffic in memory.

pub mod message;
pub mod midir_backend;

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

pub use message::{MidiMessage, PITCH_BEND_MAX};
pub use midir_backend::{
    list_input_ports, list_output_ports, print_input_ports, print_output_ports, MidirInput,
    MidirOutput,
};

/// Trait for MIDI output implementations.
///
/// This trait abstracts over different MIDI backends. Sends are
/// fire-and-forget from the caller's point of view.
pub trait MidiOutput: Send {
    /// Send a MIDI message immediately.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if the message could not be sent
    fn send(&mut self, message: &MidiMessage) -> Result<()>;
}

impl<T: MidiOutput + ?Sized> MidiOutput for Box<T> {
    fn send(&mut self, message: &MidiMessage) -> Result<()> {
        (**self).send(message)
    }
}

/// In-memory output that records every message it is asked to send.
///
/// Clones share the same log, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct CaptureOutput {
    messages: Arc<Mutex<Vec<MidiMessage>>>,
}

impl CaptureOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far
    pub fn messages(&self) -> Vec<MidiMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Remove and return everything sent so far
    pub fn take(&self) -> Vec<MidiMessage> {
        self.messages
            .lock()
            .map(|mut m| std::mem::take(&mut *m))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MidiOutput for CaptureOutput {
    fn send(&mut self, message: &MidiMessage) -> Result<()> {
        self.messages
            .lock()
            .map_err(|_| anyhow!("capture log poisoned"))?
            .push(message.clone());
        Ok(())
    }
}

/// MIDI message constants
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const CONTROL_CHANGE: u8 = 0xB0;
    pub const PITCH_BEND: u8 = 0xE0;

    // System Messages
    pub const SYSEX_START: u8 = 0xF0;
    pub const SYSEX_END: u8 = 0xF7;
    pub const SYSTEM_RESET: u8 = 0xFF;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_output_send() {
        let mut output = CaptureOutput::new();
        let handle = output.clone();

        output
            .send(&MidiMessage::NoteOn {
                channel: 0,
                note: 60,
                velocity: 127,
            })
            .unwrap();

        let messages = handle.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to_bytes(), vec![0x90, 60, 127]);
    }

    #[test]
    fn test_capture_output_take() {
        let mut output = CaptureOutput::new();
        output.send(&MidiMessage::SystemReset).unwrap();
        assert_eq!(output.len(), 1);

        assert_eq!(output.take(), vec![MidiMessage::SystemReset]);
        assert!(output.is_empty());
    }

    #[test]
    fn test_boxed_output() {
        let capture = CaptureOutput::new();
        let mut boxed: Box<dyn MidiOutput> = Box::new(capture.clone());
        boxed.send(&MidiMessage::SystemReset).unwrap();
        assert_eq!(capture.len(), 1);
    }

    #[test]
    fn test_midi_message_constants() {
        assert_eq!(messages::NOTE_ON, 0x90);
        assert_eq!(messages::NOTE_OFF, 0x80);
        assert_eq!(messages::PITCH_BEND, 0xE0);
        assert_eq!(messages::SYSEX_START, 0xF0);
        assert_eq!(messages::SYSEX_END, 0xF7);
    }
}
