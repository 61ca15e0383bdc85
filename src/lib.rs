// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Device-agnostic MIDI control surfaces.
//!
//! Raw note, control-change and pitch-bend traffic from pads, faders and
//! encoders is translated into named `button`, `fader` and `encoder` events,
//! and named outbound calls are translated back, through a per-device
//! profile.

pub mod config;
pub mod control;
pub mod midi;

pub use config::SurfaceConfig;
pub use control::{
    ButtonValue, ControlCategory, ControlError, ControlSurfaceController, DeviceProfile,
    EncoderMode, LogicalEvent, LogicalValue, ProfileKind, SurfaceProfile,
};
pub use midi::{CaptureOutput, MidiMessage, MidiOutput};
