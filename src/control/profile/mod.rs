// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Device profiles.
//!
//! A profile supplies everything device-specific: how logical names map to
//! notes, channels and controllers, and how values are encoded for that
//! hardware. The catalog is closed; [`DeviceProfile`] selects one variant at
//! construction and forwards the [`SurfaceProfile`] capabilities to it.

pub mod generic;
pub mod launchpad;
pub mod xtouch;

pub use generic::GenericProfile;
pub use launchpad::{LaunchpadProfile, LedMode};
pub use xtouch::XTouchProfile;

use serde::{Deserialize, Serialize};

use super::codec::EncoderMode;
use super::error::Result;
use super::event::ButtonValue;
use crate::midi::MidiMessage;

/// Capabilities every device profile provides
pub trait SurfaceProfile: Send {
    /// Short profile name for logs and errors
    fn name(&self) -> &'static str;

    /// Button name to note
    fn resolve_button(&self, name: &str) -> Result<u8>;

    /// Note to button name
    fn button_name(&self, note: u8) -> Result<String>;

    /// Fader name to pitch-bend channel
    fn resolve_fader(&self, name: &str) -> Result<u8>;

    /// Pitch-bend channel to fader name
    fn fader_name(&self, channel: u8) -> Result<String>;

    /// Encoder name to controller number
    fn resolve_encoder(&self, name: &str) -> Result<u8>;

    /// Controller number to encoder name
    fn encoder_name(&self, controller: u8) -> Result<String>;

    /// Outbound button value to note velocity
    fn encode_button_value(&self, value: ButtonValue) -> Result<u8>;

    /// Inbound controller value to encoder event value
    fn decode_encoder_value(&self, raw: u8) -> Result<i16>;

    /// Encoder ring level to LED controller value
    fn encode_encoder_value(&self, value: f64) -> Result<u8>;

    /// Message that resets the device to its power-on state
    fn reset_message(&self) -> MidiMessage;

    /// Port name fragment used when no port is configured
    fn default_port_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether an inbound sysex is the device's reset acknowledgement
    fn is_reset_ack(&self, _bytes: &[u8]) -> bool {
        false
    }
}

/// Which profile to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    #[default]
    Generic,
    Launchpad,
    #[serde(alias = "x-touch", alias = "x_touch")]
    XTouch,
}

/// The active device profile
#[derive(Debug, Clone)]
pub enum DeviceProfile {
    Generic(GenericProfile),
    Launchpad(LaunchpadProfile),
    XTouch(XTouchProfile),
}

impl DeviceProfile {
    /// Build a profile of the given kind.
    ///
    /// Table construction errors are returned here, before any traffic flows.
    pub fn build(kind: ProfileKind, encoder_mode: EncoderMode, symmetric_encoders: bool) -> Result<Self> {
        Ok(match kind {
            ProfileKind::Generic => DeviceProfile::Generic(GenericProfile::new(encoder_mode)),
            ProfileKind::Launchpad => DeviceProfile::Launchpad(LaunchpadProfile::new()),
            ProfileKind::XTouch => {
                let profile = if symmetric_encoders {
                    XTouchProfile::with_symmetric_encoders(encoder_mode)?
                } else {
                    XTouchProfile::new(encoder_mode)?
                };
                DeviceProfile::XTouch(profile)
            }
        })
    }

    pub fn kind(&self) -> ProfileKind {
        match self {
            DeviceProfile::Generic(_) => ProfileKind::Generic,
            DeviceProfile::Launchpad(_) => ProfileKind::Launchpad,
            DeviceProfile::XTouch(_) => ProfileKind::XTouch,
        }
    }

    fn inner(&self) -> &dyn SurfaceProfile {
        match self {
            DeviceProfile::Generic(p) => p,
            DeviceProfile::Launchpad(p) => p,
            DeviceProfile::XTouch(p) => p,
        }
    }
}

impl From<GenericProfile> for DeviceProfile {
    fn from(profile: GenericProfile) -> Self {
        DeviceProfile::Generic(profile)
    }
}

impl From<LaunchpadProfile> for DeviceProfile {
    fn from(profile: LaunchpadProfile) -> Self {
        DeviceProfile::Launchpad(profile)
    }
}

impl From<XTouchProfile> for DeviceProfile {
    fn from(profile: XTouchProfile) -> Self {
        DeviceProfile::XTouch(profile)
    }
}

impl SurfaceProfile for DeviceProfile {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn resolve_button(&self, name: &str) -> Result<u8> {
        self.inner().resolve_button(name)
    }

    fn button_name(&self, note: u8) -> Result<String> {
        self.inner().button_name(note)
    }

    fn resolve_fader(&self, name: &str) -> Result<u8> {
        self.inner().resolve_fader(name)
    }

    fn fader_name(&self, channel: u8) -> Result<String> {
        self.inner().fader_name(channel)
    }

    fn resolve_encoder(&self, name: &str) -> Result<u8> {
        self.inner().resolve_encoder(name)
    }

    fn encoder_name(&self, controller: u8) -> Result<String> {
        self.inner().encoder_name(controller)
    }

    fn encode_button_value(&self, value: ButtonValue) -> Result<u8> {
        self.inner().encode_button_value(value)
    }

    fn decode_encoder_value(&self, raw: u8) -> Result<i16> {
        self.inner().decode_encoder_value(raw)
    }

    fn encode_encoder_value(&self, value: f64) -> Result<u8> {
        self.inner().encode_encoder_value(value)
    }

    fn reset_message(&self) -> MidiMessage {
        self.inner().reset_message()
    }

    fn default_port_hint(&self) -> Option<&'static str> {
        self.inner().default_port_hint()
    }

    fn is_reset_ack(&self, bytes: &[u8]) -> bool {
        self.inner().is_reset_ack(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_each_kind() {
        for kind in [ProfileKind::Generic, ProfileKind::Launchpad, ProfileKind::XTouch] {
            let profile = DeviceProfile::build(kind, EncoderMode::Fan, false).unwrap();
            assert_eq!(profile.kind(), kind);
        }
    }

    #[test]
    fn test_dispatch_reaches_variant() {
        let profile = DeviceProfile::build(ProfileKind::XTouch, EncoderMode::Fan, false).unwrap();
        assert_eq!(profile.name(), "x-touch");
        assert_eq!(profile.resolve_button("buttonPlay").unwrap(), 94);
        assert_eq!(profile.default_port_hint(), Some("X-TOUCH COMPACT"));

        let profile: DeviceProfile = GenericProfile::default().into();
        assert_eq!(profile.resolve_button("3").unwrap(), 3);
        assert_eq!(profile.reset_message(), MidiMessage::SystemReset);
    }

    #[test]
    fn test_profile_kind_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            profile: ProfileKind,
        }

        let w: Wrapper = serde_yaml::from_str("profile: xtouch").unwrap();
        assert_eq!(w.profile, ProfileKind::XTouch);
        let w: Wrapper = serde_yaml::from_str("profile: x-touch").unwrap();
        assert_eq!(w.profile, ProfileKind::XTouch);
        let w: Wrapper = serde_yaml::from_str("profile: launchpad").unwrap();
        assert_eq!(w.profile, ProfileKind::Launchpad);
    }
}
