// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! midir backend for hardware control surfaces.
//!
//! Ports are selected by index or by a case-insensitive substring of the
//! port name. Inbound packets are parsed on midir's callback thread and
//! handed to the caller through a channel, preserving arrival order.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use anyhow::{anyhow, Result};
use midir::{Ignore, MidiInputConnection, MidiOutputConnection};
use tracing::{debug, info};

use super::{MidiMessage, MidiOutput};

/// midir output connection.
pub struct MidirOutput {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidirOutput {
    /// Connect to the output port at `port_index`.
    pub fn new(client_name: &str, port_index: usize) -> Result<Self> {
        let output = midir::MidiOutput::new(client_name)
            .map_err(|e| anyhow!("Failed to create MIDI client: {}", e))?;

        let ports = output.ports();
        let port = ports.get(port_index).ok_or_else(|| {
            anyhow!(
                "MIDI output {} not found (only {} available)",
                port_index,
                ports.len()
            )
        })?;
        let port_name = output
            .port_name(port)
            .unwrap_or_else(|_| format!("Unknown {}", port_index));

        let connection = output
            .connect(port, &format!("{} Output", client_name))
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", port_name, e))?;

        info!(port = %port_name, "connected MIDI output");
        Ok(Self {
            connection,
            port_name,
        })
    }

    /// Connect to the first output port whose name contains `name`.
    pub fn new_by_name(client_name: &str, name: &str) -> Result<Self> {
        let index = find_port(&list_output_ports(), name)
            .ok_or_else(|| anyhow!("No MIDI output matching '{}' found", name))?;
        Self::new(client_name, index)
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiOutput for MidirOutput {
    fn send(&mut self, message: &MidiMessage) -> Result<()> {
        self.connection
            .send(&message.to_bytes())
            .map_err(|e| anyhow!("Failed to send MIDI message: {}", e))
    }
}

/// midir input connection delivering parsed messages in arrival order.
pub struct MidirInput {
    _connection: MidiInputConnection<()>,
    receiver: Receiver<MidiMessage>,
    port_name: String,
}

impl MidirInput {
    /// Connect to the input port at `port_index`.
    pub fn new(client_name: &str, port_index: usize) -> Result<Self> {
        let mut input = midir::MidiInput::new(client_name)
            .map_err(|e| anyhow!("Failed to create MIDI client: {}", e))?;
        // Sysex must come through for the reset acknowledgement
        input.ignore(Ignore::None);

        let ports = input.ports();
        let port = ports.get(port_index).ok_or_else(|| {
            anyhow!(
                "MIDI input {} not found (only {} available)",
                port_index,
                ports.len()
            )
        })?;
        let port_name = input
            .port_name(port)
            .unwrap_or_else(|_| format!("Unknown {}", port_index));

        let (tx, rx): (Sender<MidiMessage>, Receiver<MidiMessage>) = mpsc::channel();

        let connection = input
            .connect(
                port,
                &format!("{} Input", client_name),
                move |_stamp, data, _| match MidiMessage::parse(data) {
                    Some(msg) => {
                        let _ = tx.send(msg);
                    }
                    None => debug!(?data, "ignored MIDI packet"),
                },
                (),
            )
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", port_name, e))?;

        info!(port = %port_name, "connected MIDI input");
        Ok(Self {
            _connection: connection,
            receiver: rx,
            port_name,
        })
    }

    /// Connect to the first input port whose name contains `name`.
    pub fn new_by_name(client_name: &str, name: &str) -> Result<Self> {
        let index = find_port(&list_input_ports(), name)
            .ok_or_else(|| anyhow!("No MIDI input matching '{}' found", name))?;
        Self::new(client_name, index)
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Try to receive the next MIDI message (non-blocking)
    pub fn try_recv(&self) -> Option<MidiMessage> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next message.
    ///
    /// Returns `Ok(None)` on timeout and an error once the port is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<MidiMessage>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => Ok(Some(msg)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(anyhow!("MIDI input '{}' disconnected", self.port_name))
            }
        }
    }

    /// Receive all pending MIDI messages
    pub fn recv_all(&self) -> Vec<MidiMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = self.try_recv() {
            messages.push(msg);
        }
        messages
    }
}

/// Index of the first port whose name contains `name`, ignoring case.
pub fn find_port(ports: &[(usize, String)], name: &str) -> Option<usize> {
    let needle = name.to_lowercase();
    ports
        .iter()
        .find(|(_, n)| n.to_lowercase().contains(&needle))
        .map(|(i, _)| *i)
}

/// List all available MIDI inputs as (index, name) tuples.
pub fn list_input_ports() -> Vec<(usize, String)> {
    let Ok(input) = midir::MidiInput::new("surface probe") else {
        return Vec::new();
    };
    input
        .ports()
        .iter()
        .enumerate()
        .map(|(i, port)| {
            let name = input
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown {}", i));
            (i, name)
        })
        .collect()
}

/// List all available MIDI outputs as (index, name) tuples.
pub fn list_output_ports() -> Vec<(usize, String)> {
    let Ok(output) = midir::MidiOutput::new("surface probe") else {
        return Vec::new();
    };
    output
        .ports()
        .iter()
        .enumerate()
        .map(|(i, port)| {
            let name = output
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown {}", i));
            (i, name)
        })
        .collect()
}

/// Print all available MIDI inputs to stdout
pub fn print_input_ports() {
    print_ports("Available MIDI sources (inputs):", &list_input_ports());
}

/// Print all available MIDI outputs to stdout
pub fn print_output_ports() {
    print_ports("Available MIDI destinations (outputs):", &list_output_ports());
}

fn print_ports(title: &str, ports: &[(usize, String)]) {
    if ports.is_empty() {
        println!("No MIDI ports found.");
    } else {
        println!("{}", title);
        for (i, name) in ports {
            println!("  {}: {}", i, name);
        }
    }
}
