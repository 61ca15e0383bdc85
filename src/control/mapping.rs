// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bidirectional mapping between logical control names and raw addresses.
//!
//! A table covers one control category. It is built once through
//! [`MappingBuilder`], which rejects duplicate names, duplicate addresses and
//! addresses outside the MIDI range, and is immutable afterwards.

use std::collections::HashMap;

use super::error::{ControlError, Result};
use super::event::ControlCategory;

/// What the number in a [`RawAddress`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Note number (0-127)
    Note,
    /// Controller number (0-127)
    Controller,
    /// Channel (0-15)
    Channel,
}

impl AddressKind {
    /// Highest valid number for this kind
    pub fn max(&self) -> u8 {
        match self {
            AddressKind::Note | AddressKind::Controller => 127,
            AddressKind::Channel => 15,
        }
    }

    /// Address kind used by a control category
    pub fn for_category(category: ControlCategory) -> Self {
        match category {
            ControlCategory::Button => AddressKind::Note,
            ControlCategory::Fader => AddressKind::Channel,
            ControlCategory::Encoder => AddressKind::Controller,
        }
    }
}

/// A raw MIDI address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawAddress {
    pub kind: AddressKind,
    pub number: u8,
}

impl RawAddress {
    pub fn note(number: u8) -> Self {
        Self {
            kind: AddressKind::Note,
            number,
        }
    }

    pub fn controller(number: u8) -> Self {
        Self {
            kind: AddressKind::Controller,
            number,
        }
    }

    pub fn channel(number: u8) -> Self {
        Self {
            kind: AddressKind::Channel,
            number,
        }
    }
}

/// Name <-> number bijection for one control category
#[derive(Debug, Clone)]
pub struct NameMappingTable {
    category: ControlCategory,
    by_name: HashMap<String, u8>,
    by_number: HashMap<u8, String>,
    /// Name prefixes that are reserved but never resolve in either direction
    hidden_prefixes: Vec<String>,
}

impl NameMappingTable {
    pub fn builder(category: ControlCategory) -> MappingBuilder {
        MappingBuilder {
            category,
            entries: Vec::new(),
            hidden_prefixes: Vec::new(),
        }
    }

    pub fn category(&self) -> ControlCategory {
        self.category
    }

    pub fn kind(&self) -> AddressKind {
        AddressKind::for_category(self.category)
    }

    /// Name to raw address
    pub fn resolve(&self, name: &str) -> Result<RawAddress> {
        if self.is_hidden(name) {
            return Err(ControlError::unknown(self.category, name));
        }
        self.by_name
            .get(name)
            .map(|&number| RawAddress {
                kind: self.kind(),
                number,
            })
            .ok_or_else(|| ControlError::unknown(self.category, name))
    }

    /// Raw address to name
    pub fn reverse_resolve(&self, address: RawAddress) -> Result<&str> {
        if address.kind != self.kind() {
            return Err(ControlError::unknown(self.category, address.number));
        }
        match self.by_number.get(&address.number) {
            Some(name) if !self.is_hidden(name) => Ok(name.as_str()),
            _ => Err(ControlError::unknown(self.category, address.number)),
        }
    }

    /// Names that resolve in both directions, in address order
    pub fn names(&self) -> Vec<&str> {
        let mut entries: Vec<(&u8, &String)> = self
            .by_number
            .iter()
            .filter(|(_, name)| !self.is_hidden(name))
            .collect();
        entries.sort_by_key(|(number, _)| **number);
        entries.into_iter().map(|(_, name)| name.as_str()).collect()
    }

    /// Number of entries, hidden ones included
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.hidden_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

/// Builder for [`NameMappingTable`]
#[derive(Debug, Clone)]
pub struct MappingBuilder {
    category: ControlCategory,
    entries: Vec<(String, u8)>,
    hidden_prefixes: Vec<String>,
}

impl MappingBuilder {
    /// Add one entry
    pub fn entry(mut self, name: impl Into<String>, number: u8) -> Self {
        self.entries.push((name.into(), number));
        self
    }

    /// Add a run of entries: `name(i)` maps to `first + i` for `i` in `0..count`
    pub fn run(mut self, count: u8, first: u8, name: impl Fn(u8) -> String) -> Self {
        for i in 0..count {
            self.entries.push((name(i), first.saturating_add(i)));
        }
        self
    }

    /// Reserve a name class: its addresses stay occupied but neither
    /// direction resolves
    pub fn hide_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hidden_prefixes.push(prefix.into());
        self
    }

    pub fn build(self) -> Result<NameMappingTable> {
        let category = self.category;
        let max = AddressKind::for_category(category).max();
        let mut by_name = HashMap::with_capacity(self.entries.len());
        let mut by_number: HashMap<u8, String> = HashMap::with_capacity(self.entries.len());

        for (name, number) in self.entries {
            if number > max {
                return Err(ControlError::InvalidAddress {
                    category,
                    name,
                    number,
                });
            }
            if let Some(first) = by_number.get(&number) {
                return Err(ControlError::DuplicateAddress {
                    category,
                    number,
                    first: first.clone(),
                    second: name,
                });
            }
            if by_name.contains_key(&name) {
                return Err(ControlError::DuplicateName { category, name });
            }
            by_number.insert(number, name.clone());
            by_name.insert(name, number);
        }

        Ok(NameMappingTable {
            category,
            by_name,
            by_number,
            hidden_prefixes: self.hidden_prefixes,
        })
    }
}
