// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generic control surface engine.
//!
//! Inbound raw messages are translated through the active profile into
//! logical events and delivered to the subscriber for their category, one at
//! a time and in arrival order. Outbound calls resolve logical names through
//! the same profile and go out as raw messages. A failed translation is
//! logged and returned; it never poisons the controller.

use std::sync::mpsc::Receiver;

use tracing::{debug, info, trace, warn};

use super::codec;
use super::error::{ControlError, Result};
use super::event::{ButtonValue, ControlCategory, LogicalEvent, Subscribers};
use super::profile::{DeviceProfile, SurfaceProfile};
use crate::midi::{MidiMessage, MidiOutput};

/// Number of notes / controllers swept by [`ControlSurfaceController::clear_all_outputs`]
const DATA_SPAN: u8 = 128;
const CHANNEL_SPAN: u8 = 16;

/// Bidirectional translator between raw MIDI and logical control events
pub struct ControlSurfaceController<O: MidiOutput> {
    profile: DeviceProfile,
    output: O,
    subscribers: Subscribers,
}

impl<O: MidiOutput> ControlSurfaceController<O> {
    /// Create a controller for `profile` sending through `output`
    pub fn new(profile: impl Into<DeviceProfile>, output: O) -> Self {
        let profile = profile.into();
        debug!(profile = profile.name(), "control surface created");
        Self {
            profile,
            output,
            subscribers: Subscribers::default(),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consume the controller, returning its output
    pub fn into_output(self) -> O {
        self.output
    }

    /// Install the handler for one category, replacing any previous one
    pub fn on<F>(&mut self, category: ControlCategory, handler: F)
    where
        F: FnMut(&LogicalEvent) + Send + 'static,
    {
        if self.subscribers.set(category, Box::new(handler)).is_some() {
            debug!(%category, "replaced event handler");
        }
    }

    /// Route one category into a channel
    pub fn subscribe(&mut self, category: ControlCategory) -> Receiver<LogicalEvent> {
        self.subscribers.channel(category)
    }

    pub fn unsubscribe(&mut self, category: ControlCategory) {
        self.subscribers.clear(category);
    }

    // ---------------------------------------------------------------
    // Inbound
    // ---------------------------------------------------------------

    /// Translate one raw message.
    ///
    /// Returns the emitted event, `None` for messages that carry no control
    /// event (sysex, system reset), or the translation error.
    pub fn dispatch(&mut self, message: &MidiMessage) -> Result<Option<LogicalEvent>> {
        match message {
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => self.on_raw_note(*note, *velocity, *channel).map(Some),
            MidiMessage::ControlChange {
                channel,
                controller,
                value,
            } => self.on_raw_cc(*controller, *value, *channel).map(Some),
            MidiMessage::PitchBend { channel, value } => {
                self.on_raw_pitch_bend(*value, *channel).map(Some)
            }
            MidiMessage::SysEx(bytes) => {
                if self.profile.is_reset_ack(bytes) {
                    info!(profile = self.profile.name(), "device acknowledged reset");
                } else {
                    debug!(len = bytes.len(), "ignored inbound sysex");
                }
                Ok(None)
            }
            MidiMessage::SystemReset => Ok(None),
        }
    }

    /// Note-on from the surface: a button press (velocity > 0) or release
    pub fn on_raw_note(&mut self, note: u8, velocity: u8, channel: u8) -> Result<LogicalEvent> {
        let name = self.reported(self.profile.button_name(note), "note", note, channel)?;
        Ok(self.emit(LogicalEvent::button(name, velocity != 0)))
    }

    /// Control change from the surface: an encoder turn
    pub fn on_raw_cc(&mut self, controller: u8, value: u8, channel: u8) -> Result<LogicalEvent> {
        let translated = self
            .profile
            .encoder_name(controller)
            .and_then(|name| Ok((name, self.profile.decode_encoder_value(value)?)));
        let (name, value) = self.reported(translated, "controller", controller, channel)?;
        Ok(self.emit(LogicalEvent::encoder(name, value)))
    }

    /// Pitch bend from the surface: a fader move
    pub fn on_raw_pitch_bend(&mut self, value: u16, channel: u8) -> Result<LogicalEvent> {
        let translated = self
            .profile
            .fader_name(channel)
            .and_then(|name| Ok((name, codec::fader_raw_to_float(value)?)));
        let (name, position) = self.reported(translated, "channel", channel, channel)?;
        Ok(self.emit(LogicalEvent::fader(name, position)))
    }

    fn emit(&mut self, event: LogicalEvent) -> LogicalEvent {
        if !self.subscribers.emit(&event) {
            trace!(category = %event.category, name = %event.name, "no subscriber");
        }
        event
    }

    fn reported<T>(
        &self,
        result: Result<T>,
        field: &'static str,
        number: impl Into<u16>,
        channel: u8,
    ) -> Result<T> {
        if let Err(ref err) = result {
            let number: u16 = number.into();
            warn!(
                profile = self.profile.name(),
                field,
                number,
                channel,
                "dropped inbound event: {}",
                err
            );
        }
        result
    }

    // ---------------------------------------------------------------
    // Outbound
    // ---------------------------------------------------------------

    /// Light a button. Boolean profiles take on/off, the Launchpad takes a
    /// colour code; `channel` selects the LED mode where the device has one.
    pub fn set_button(&mut self, name: &str, value: impl Into<ButtonValue>, channel: u8) -> Result<()> {
        let note = self.profile.resolve_button(name)?;
        let velocity = self.profile.encode_button_value(value.into())?;
        let channel = codec::check_channel(channel)?;
        self.send(MidiMessage::NoteOn {
            channel,
            note,
            velocity,
        })
    }

    /// Move a motor fader to `value` (0.0 - 1.0)
    pub fn set_fader(&mut self, name: &str, value: f64) -> Result<()> {
        let channel = self.profile.resolve_fader(name)?;
        let value = codec::fader_float_to_raw(value)?;
        self.send(MidiMessage::PitchBend { channel, value })
    }

    /// Set an encoder's LED ring; `-1.0` turns it off
    pub fn set_encoder_led(&mut self, name: &str, value: f64) -> Result<()> {
        let controller = self.profile.resolve_encoder(name)?;
        let value = self.profile.encode_encoder_value(value)?;
        self.send(MidiMessage::ControlChange {
            channel: 0,
            controller,
            value,
        })
    }

    /// Zero every note, controller and pitch-bend channel once
    pub fn clear_all_outputs(&mut self) -> Result<()> {
        for i in 0..DATA_SPAN {
            self.send(MidiMessage::NoteOn {
                channel: 0,
                note: i,
                velocity: 0,
            })?;
            self.send(MidiMessage::ControlChange {
                channel: 0,
                controller: i,
                value: 0,
            })?;
        }
        for channel in 0..CHANNEL_SPAN {
            self.send(MidiMessage::PitchBend { channel, value: 0 })?;
        }
        debug!(profile = self.profile.name(), "cleared all outputs");
        Ok(())
    }

    /// Send the profile's native reset.
    ///
    /// Nothing waits for the device: callers must let it settle before
    /// sending anything else.
    pub fn reset_device(&mut self) -> Result<()> {
        let message = self.profile.reset_message();
        self.send(message)?;
        info!(profile = self.profile.name(), "reset sent");
        Ok(())
    }

    fn send(&mut self, message: MidiMessage) -> Result<()> {
        trace!(?message, "send");
        self.output.send(&message).map_err(ControlError::Transport)
    }
}
