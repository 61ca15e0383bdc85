// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Logical events and their subscribers.

use std::fmt;
use std::sync::mpsc::{self, Receiver};

/// Category of a physical control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCategory {
    /// Pads and discrete buttons, addressed by note
    Button,
    /// Motorized faders, addressed by pitch-bend channel
    Fader,
    /// Rotary encoders, addressed by controller number
    Encoder,
}

impl ControlCategory {
    pub const ALL: [ControlCategory; 3] = [
        ControlCategory::Button,
        ControlCategory::Fader,
        ControlCategory::Encoder,
    ];

    /// Event name seen by subscribers
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlCategory::Button => "button",
            ControlCategory::Fader => "fader",
            ControlCategory::Encoder => "encoder",
        }
    }

    fn index(&self) -> usize {
        match self {
            ControlCategory::Button => 0,
            ControlCategory::Fader => 1,
            ControlCategory::Encoder => 2,
        }
    }
}

impl fmt::Display for ControlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value carried by a logical event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogicalValue {
    /// Button pressed / released
    Bool(bool),
    /// Fader position, 0.0 - 1.0
    Float(f64),
    /// Encoder value, absolute or signed delta
    Int(i16),
}

impl LogicalValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LogicalValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            LogicalValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i16> {
        match self {
            LogicalValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// A translated inbound control event
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalEvent {
    pub category: ControlCategory,
    pub name: String,
    pub value: LogicalValue,
}

impl LogicalEvent {
    pub fn button(name: impl Into<String>, pressed: bool) -> Self {
        Self {
            category: ControlCategory::Button,
            name: name.into(),
            value: LogicalValue::Bool(pressed),
        }
    }

    pub fn fader(name: impl Into<String>, position: f64) -> Self {
        Self {
            category: ControlCategory::Fader,
            name: name.into(),
            value: LogicalValue::Float(position),
        }
    }

    pub fn encoder(name: impl Into<String>, value: i16) -> Self {
        Self {
            category: ControlCategory::Encoder,
            name: name.into(),
            value: LogicalValue::Int(value),
        }
    }
}

/// Outbound button value.
///
/// Boolean surfaces light on/off; velocity-addressed pads such as the
/// Launchpad take a raw colour code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonValue {
    Bool(bool),
    Raw(u8),
}

impl From<bool> for ButtonValue {
    fn from(value: bool) -> Self {
        ButtonValue::Bool(value)
    }
}

impl From<u8> for ButtonValue {
    fn from(value: u8) -> Self {
        ButtonValue::Raw(value)
    }
}

/// Callback invoked for every event of one category
pub type EventHandler = Box<dyn FnMut(&LogicalEvent) + Send>;

/// One handler slot per control category
#[derive(Default)]
pub struct Subscribers {
    handlers: [Option<EventHandler>; 3],
}

impl Subscribers {
    /// Install `handler` for `category`, returning the one it replaces
    pub fn set(&mut self, category: ControlCategory, handler: EventHandler) -> Option<EventHandler> {
        self.handlers[category.index()].replace(handler)
    }

    pub fn clear(&mut self, category: ControlCategory) -> Option<EventHandler> {
        self.handlers[category.index()].take()
    }

    pub fn is_subscribed(&self, category: ControlCategory) -> bool {
        self.handlers[category.index()].is_some()
    }

    /// Deliver an event; returns false when nobody listens
    pub fn emit(&mut self, event: &LogicalEvent) -> bool {
        match self.handlers[event.category.index()].as_mut() {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Route events of `category` into a channel
    pub fn channel(&mut self, category: ControlCategory) -> Receiver<LogicalEvent> {
        let (tx, rx) = mpsc::channel();
        self.set(
            category,
            Box::new(move |event| {
                let _ = tx.send(event.clone());
            }),
        );
        rx
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active: Vec<_> = ControlCategory::ALL
            .iter()
            .filter(|c| self.is_subscribed(**c))
            .collect();
        f.debug_struct("Subscribers").field("active", &active).finish()
    }
}
