// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interactive demo driver.
//!
//! Feeds logical events back into the surface so the hardware can be tried
//! by hand. All state lives here, outside the translation core.

use surface::control::{self, ControlSurfaceController, LogicalEvent, LogicalValue, ProfileKind};
use surface::MidiOutput;

/// Fader channels on the X-Touch, main fader included
const XTOUCH_FADERS: usize = 9;
const NUDGE_STEP: f64 = 0.01;

/// Per-device demo behaviour
#[derive(Debug, Clone)]
pub enum Demo {
    /// Echo button state back to its LED
    Echo,
    /// Paint each pressed pad with the next colour
    Palette { colour: u8 },
    /// Encoders nudge faders, faders drive encoder rings
    Mirror { faders: [f64; XTOUCH_FADERS] },
}

impl Demo {
    pub fn for_profile(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Generic => Demo::Echo,
            ProfileKind::Launchpad => Demo::Palette { colour: 0 },
            ProfileKind::XTouch => Demo::Mirror {
                faders: [0.0; XTOUCH_FADERS],
            },
        }
    }

    /// React to one event
    pub fn handle<O: MidiOutput>(
        &mut self,
        surface: &mut ControlSurfaceController<O>,
        event: &LogicalEvent,
    ) -> control::Result<()> {
        match (self, event.value) {
            (Demo::Echo, LogicalValue::Bool(pressed)) => surface.set_button(&event.name, pressed, 0),
            (Demo::Palette { colour }, LogicalValue::Bool(true)) => {
                surface.set_button(&event.name, *colour, 0)?;
                *colour = (*colour + 1) % 128;
                Ok(())
            }
            (Demo::Mirror { .. }, LogicalValue::Bool(pressed)) => {
                surface.set_button(&event.name, pressed, 0)
            }
            (Demo::Mirror { faders }, LogicalValue::Int(delta)) => {
                // The main fader has no encoder
                let Some(i) = index_of(&event.name, "encoder").filter(|i| *i < XTOUCH_FADERS - 1) else {
                    return Ok(());
                };
                faders[i] = (faders[i] + delta as f64 * NUDGE_STEP).clamp(0.0, 1.0);
                surface.set_fader(&format!("fader{}", i + 1), faders[i])
            }
            (Demo::Mirror { faders }, LogicalValue::Float(position)) => {
                let Some(i) = index_of(&event.name, "fader").filter(|i| *i < XTOUCH_FADERS) else {
                    return Ok(());
                };
                faders[i] = position;
                surface.set_encoder_led(&format!("encoder{}", i + 1), position)
            }
            _ => Ok(()),
        }
    }
}

/// Zero-based index from names like "encoder3"
fn index_of(name: &str, prefix: &str) -> Option<usize> {
    name.strip_prefix(prefix)?
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
}
