// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the translation core.

use thiserror::Error;

use super::event::ControlCategory;

#[derive(Error, Debug)]
pub enum ControlError {
    /// Name or raw address not present in the active profile's mapping.
    #[error("unknown {category} control: {key}")]
    UnknownControl {
        category: ControlCategory,
        key: String,
    },

    /// The profile has no controls of this category at all.
    #[error("{profile} profile has no {category} controls")]
    UnsupportedControl {
        profile: &'static str,
        category: ControlCategory,
    },

    /// An encoded value would fall outside its wire range.
    #[error("{what} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("duplicate control name in {category} mapping: {name}")]
    DuplicateName {
        category: ControlCategory,
        name: String,
    },

    #[error("{category} address {number} mapped twice ({first} and {second})")]
    DuplicateAddress {
        category: ControlCategory,
        number: u8,
        first: String,
        second: String,
    },

    #[error("{category} control {name} has invalid address {number}")]
    InvalidAddress {
        category: ControlCategory,
        name: String,
        number: u8,
    },

    #[error("MIDI transport error: {0}")]
    Transport(#[source] anyhow::Error),
}

impl ControlError {
    pub(crate) fn unknown(category: ControlCategory, key: impl ToString) -> Self {
        ControlError::UnknownControl {
            category,
            key: key.to_string(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: impl Into<f64>, max: impl Into<f64>) -> Self {
        ControlError::OutOfRange {
            what,
            value: value.into(),
            min: 0.0,
            max: max.into(),
        }
    }

    /// Errors that only occur while a profile is being built
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            ControlError::DuplicateName { .. }
                | ControlError::DuplicateAddress { .. }
                | ControlError::InvalidAddress { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;
