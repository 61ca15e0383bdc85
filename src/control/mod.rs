// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control surface translation core.
//!
//! This module provides:
//! - Value codecs between logical values and raw MIDI ranges
//! - Name <-> address mapping tables
//! - Device profiles (generic, Launchpad, X-Touch)
//! - The controller engine translating in both directions

pub mod codec;
pub mod controller;
pub mod error;
pub mod event;
pub mod mapping;
pub mod profile;

pub use codec::EncoderMode;
pub use controller::ControlSurfaceController;
pub use error::{ControlError, Result};
pub use event::{ButtonValue, ControlCategory, LogicalEvent, LogicalValue};
pub use mapping::{AddressKind, NameMappingTable, RawAddress};
pub use profile::{
    DeviceProfile, GenericProfile, LaunchpadProfile, LedMode, ProfileKind, SurfaceProfile,
    XTouchProfile,
};
