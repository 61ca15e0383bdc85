// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

mod demo;

use anyhow::{anyhow, Context, Result};
use std::env;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use demo::Demo;
use surface::control::{ControlCategory, ControlSurfaceController, LogicalEvent};
use surface::midi::{print_input_ports, print_output_ports, MidirInput, MidirOutput};
use surface::SurfaceConfig;

/// Time the X-Touch needs to come back after a reset
const RESET_SETTLE: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Surface = ControlSurfaceController<MidirOutput>;

fn print_usage() {
    println!("SURFACE - MIDI control surface bridge");
    println!();
    println!("Usage: surface [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list-midi             List available MIDI destinations (outputs)");
    println!("  --list-sources          List available MIDI sources (inputs)");
    println!("  --monitor <CONFIG>      Print logical events from the configured surface");
    println!("  --demo <CONFIG>         Run the interactive demo for the configured surface");
    println!("  --reset <CONFIG>        Send the device's native reset");
    println!("  --clear <CONFIG>        Zero every note, controller and fader");
    println!("  --help                  Show this help message");
}

fn init_logging(config: &SurfaceConfig) -> Result<()> {
    let level = config.logging.level()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}

fn load_config(args: &[String], option: &str) -> Result<SurfaceConfig> {
    let path = args
        .get(2)
        .ok_or_else(|| anyhow!("{} requires a configuration file", option))?;
    let config = SurfaceConfig::load(path)?;
    init_logging(&config)?;
    Ok(config)
}

fn open_output(config: &SurfaceConfig) -> Result<Surface> {
    let profile = config.device.build_profile()?;
    let port = config
        .midi
        .output_port(&profile)
        .ok_or_else(|| anyhow!("No output port configured for the {:?} profile", config.device.profile))?
        .to_string();
    let output = MidirOutput::new_by_name(&config.midi.client_name, &port)?;
    Ok(ControlSurfaceController::new(profile, output))
}

fn open_input(config: &SurfaceConfig, surface: &Surface) -> Result<MidirInput> {
    let port = config
        .midi
        .input_port(surface.profile())
        .ok_or_else(|| anyhow!("No input port configured for the {:?} profile", config.device.profile))?;
    MidirInput::new_by_name(&config.midi.client_name, port)
}

/// Pump inbound messages through the surface until the port goes away,
/// handing every emitted event to `on_event`.
fn run_loop<F>(surface: &mut Surface, input: &MidirInput, mut on_event: F) -> Result<()>
where
    F: FnMut(&mut Surface, LogicalEvent),
{
    let receivers: Vec<Receiver<LogicalEvent>> = ControlCategory::ALL
        .iter()
        .map(|category| surface.subscribe(*category))
        .collect();

    loop {
        let Some(message) = input.recv_timeout(POLL_INTERVAL)? else {
            continue;
        };
        // Translation errors are already logged; keep going
        let _ = surface.dispatch(&message);

        for rx in &receivers {
            while let Ok(event) = rx.try_recv() {
                on_event(surface, event);
            }
        }
    }
}

fn monitor(config: &SurfaceConfig) -> Result<()> {
    let mut surface = open_output(config)?;
    let input = open_input(config, &surface)?;

    println!("Monitoring {} (press Ctrl+C to stop)...", input.port_name());
    run_loop(&mut surface, &input, |_, event| {
        println!("{} {} {:?}", event.category, event.name, event.value);
    })
}

fn run_demo(config: &SurfaceConfig) -> Result<()> {
    let mut surface = open_output(config)?;
    let input = open_input(config, &surface)?;

    surface.clear_all_outputs().context("Failed to clear surface")?;
    let mut demo = Demo::for_profile(config.device.profile);
    info!(?demo, "demo running");

    run_loop(&mut surface, &input, |surface, event| {
        if let Err(e) = demo.handle(surface, &event) {
            warn!(name = %event.name, "demo could not answer event: {}", e);
        }
    })
}

fn reset(config: &SurfaceConfig) -> Result<()> {
    let mut surface = open_output(config)?;
    surface.reset_device()?;
    // No acknowledgement handling; give the device time to settle
    thread::sleep(RESET_SETTLE);
    println!("Reset sent to {}", surface.output().port_name());
    Ok(())
}

fn clear(config: &SurfaceConfig) -> Result<()> {
    let mut surface = open_output(config)?;
    surface.clear_all_outputs()?;
    println!("Cleared {}", surface.output().port_name());
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("SURFACE - MIDI control surface bridge");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--list-midi" => {
            print_output_ports();
        }
        "--list-sources" => {
            print_input_ports();
        }
        "--monitor" => {
            let config = load_config(&args, "--monitor")?;
            monitor(&config)?;
        }
        "--demo" => {
            let config = load_config(&args, "--demo")?;
            run_demo(&config)?;
        }
        "--reset" => {
            let config = load_config(&args, "--reset")?;
            reset(&config)?;
        }
        "--clear" => {
            let config = load_config(&args, "--clear")?;
            clear(&config)?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
