// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for SURFACE
//!
//! These tests drive the public API end to end: wire bytes in, logical
//! events out, named calls in, wire bytes out.

use std::sync::{Arc, Mutex};

use surface::control::profile::xtouch::RESET_SYSEX;
use surface::control::{
    ControlCategory, ControlError, ControlSurfaceController, DeviceProfile, EncoderMode,
    GenericProfile, LaunchpadProfile, LedMode, LogicalEvent, LogicalValue, ProfileKind,
    SurfaceProfile, XTouchProfile,
};
use surface::{CaptureOutput, MidiMessage, SurfaceConfig};

fn xtouch_surface(mode: EncoderMode) -> (ControlSurfaceController<CaptureOutput>, CaptureOutput) {
    let output = CaptureOutput::new();
    let profile = XTouchProfile::new(mode).unwrap();
    (ControlSurfaceController::new(profile, output.clone()), output)
}

/// Wire bytes for everything the surface sent
fn wire(output: &CaptureOutput) -> Vec<Vec<u8>> {
    output.messages().iter().map(|m| m.to_bytes()).collect()
}

#[test]
fn test_xtouch_outbound_wire_format() {
    let (mut xt, output) = xtouch_surface(EncoderMode::Fan);

    xt.set_button("buttonA", true, 0).unwrap();
    xt.set_fader("faderMain", 1.0).unwrap();
    xt.set_encoder_led("encoder4", 0.0).unwrap();
    xt.set_encoder_led("encoder7", 0.7).unwrap();

    assert_eq!(
        wire(&output),
        vec![
            vec![0x90, 85, 127],
            vec![0xE8, 0x7F, 0x7F],
            vec![0xB0, 51, 33],
            vec![0xB0, 54, 40],
        ]
    );
}

#[test]
fn test_xtouch_inbound_from_bytes() {
    let (mut xt, _) = xtouch_surface(EncoderMode::Fan);
    let buttons = xt.subscribe(ControlCategory::Button);
    let faders = xt.subscribe(ControlCategory::Fader);
    let encoders = xt.subscribe(ControlCategory::Encoder);

    let packets: [&[u8]; 5] = [
        &[0x90, 91, 127],    // buttonPrev pressed
        &[0x80, 91, 0],      // buttonPrev released
        &[0xE2, 0x00, 0x40], // fader3 to the middle
        &[0xB0, 51, 40],     // encoder turned left
        &[0xF8],             // clock, ignored
    ];

    for packet in packets {
        if let Some(message) = MidiMessage::parse(packet) {
            xt.dispatch(&message).unwrap();
        }
    }

    assert_eq!(buttons.try_recv().unwrap(), LogicalEvent::button("buttonPrev", true));
    assert_eq!(buttons.try_recv().unwrap(), LogicalEvent::button("buttonPrev", false));

    let fader = faders.try_recv().unwrap();
    assert_eq!(fader.name, "fader3");
    let position = fader.value.as_float().unwrap();
    assert!((position - 8192.0 / 16383.0).abs() < 1e-12);

    // Inbound names subtract 15 while outbound ones add 47
    assert_eq!(encoders.try_recv().unwrap(), LogicalEvent::encoder("encoder36", -24));
}

#[test]
fn test_bad_events_do_not_stop_the_stream() {
    let (mut xt, _) = xtouch_surface(EncoderMode::Fan);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    xt.on(ControlCategory::Button, move |e| sink.lock().unwrap().push(e.name.clone()));

    let stream = [
        MidiMessage::NoteOn { channel: 0, note: 94, velocity: 127 },
        MidiMessage::NoteOn { channel: 0, note: 104, velocity: 127 }, // touch sense
        MidiMessage::NoteOn { channel: 0, note: 70, velocity: 127 },  // unmapped
        MidiMessage::PitchBend { channel: 12, value: 0 },             // no fader
        MidiMessage::NoteOn { channel: 0, note: 95, velocity: 127 },
    ];

    let failures = stream
        .iter()
        .filter(|m| matches!(xt.dispatch(m), Err(ControlError::UnknownControl { .. })))
        .count();

    assert_eq!(failures, 3);
    assert_eq!(*seen.lock().unwrap(), vec!["buttonPlay", "buttonRec"]);
}

#[test]
fn test_xtouch_button_table_round_trip() {
    let profile = XTouchProfile::new(EncoderMode::Fan).unwrap();

    for name in profile.buttons().names() {
        let note = profile.resolve_button(name).unwrap();
        assert_eq!(profile.button_name(note).unwrap(), name);
    }

    for i in 1..=14 {
        assert!(profile.resolve_button(&format!("buttonEncoder{}", i)).is_err());
    }
    for i in 1..=8 {
        assert!(profile.resolve_button(&format!("buttonTouch{}", i)).is_err());
    }
    for note in (32..=49).chain(104..=112) {
        assert!(profile.button_name(note).is_err(), "note {} resolved", note);
    }
}

#[test]
fn test_clear_all_outputs_covers_address_space_once() {
    let (mut xt, output) = xtouch_surface(EncoderMode::Fan);
    xt.clear_all_outputs().unwrap();

    let messages = output.messages();
    let notes = messages
        .iter()
        .filter(|m| matches!(m, MidiMessage::NoteOn { velocity: 0, .. }))
        .count();
    let ccs = messages
        .iter()
        .filter(|m| matches!(m, MidiMessage::ControlChange { value: 0, .. }))
        .count();
    let bends = messages
        .iter()
        .filter(|m| matches!(m, MidiMessage::PitchBend { value: 0, .. }))
        .count();

    assert_eq!((notes, ccs, bends), (128, 128, 16));
    assert_eq!(messages.len(), 272);
}

#[test]
fn test_reset_then_ack() {
    let (mut xt, output) = xtouch_surface(EncoderMode::Fan);
    xt.reset_device().unwrap();
    assert_eq!(wire(&output), vec![RESET_SYSEX.to_vec()]);

    let ack = MidiMessage::parse(&[
        0xF0, 0x40, 0x41, 0x42, 0x59, 0x02, 0x02, 0x02, 0x02, 0x01, 0x01, 0x01, 0x01, 0xF7,
    ])
    .unwrap();
    assert_eq!(xt.dispatch(&ack).unwrap(), None);
}

#[test]
fn test_launchpad_colour_modes() {
    let output = CaptureOutput::new();
    let mut lp = ControlSurfaceController::new(LaunchpadProfile::new(), output.clone());

    lp.set_button("11", 5u8, LedMode::Static.channel()).unwrap();
    lp.set_button("11", 72u8, LedMode::Flash.channel()).unwrap();
    lp.set_button("88", 45u8, LedMode::Pulse.channel()).unwrap();

    assert_eq!(
        wire(&output),
        vec![vec![0x90, 11, 5], vec![0x91, 11, 72], vec![0x92, 88, 45]]
    );

    assert!(matches!(
        lp.set_encoder_led("encoder1", 0.5),
        Err(ControlError::UnsupportedControl { .. })
    ));
    let event = lp.dispatch(&MidiMessage::NoteOn { channel: 0, note: 81, velocity: 127 }).unwrap();
    assert_eq!(event, Some(LogicalEvent::button("81", true)));
}

#[test]
fn test_generic_profile_numeric_round_trip() {
    let output = CaptureOutput::new();
    let mut generic = ControlSurfaceController::new(GenericProfile::new(EncoderMode::Single), output.clone());

    generic.set_button("60", true, 3).unwrap();
    generic.set_fader("15", 0.0).unwrap();
    generic.set_encoder_led("7", 1.0).unwrap();
    assert_eq!(
        wire(&output),
        vec![vec![0x93, 60, 127], vec![0xEF, 0, 0], vec![0xB0, 7, 11]]
    );

    let event = generic
        .dispatch(&MidiMessage::ControlChange { channel: 0, controller: 7, value: 100 })
        .unwrap()
        .unwrap();
    assert_eq!(event.value, LogicalValue::Int(100));
}

#[test]
fn test_fader_round_trip_through_wire() {
    let (mut xt, output) = xtouch_surface(EncoderMode::Fan);
    let faders = xt.subscribe(ControlCategory::Fader);

    for i in 0..=20 {
        let f = i as f64 / 20.0;
        xt.set_fader("fader5", f).unwrap();
        let sent = output.take().pop().unwrap();
        let echoed = MidiMessage::parse(&sent.to_bytes()).unwrap();
        xt.dispatch(&echoed).unwrap();

        let event = faders.try_recv().unwrap();
        assert_eq!(event.name, "fader5");
        assert!((event.value.as_float().unwrap() - f).abs() <= 1.0 / 16383.0);
    }
}

#[test]
fn test_profile_from_config() {
    let config = SurfaceConfig::from_yaml(
        r#"
device:
  profile: xtouch
  encoder_mode: single
  symmetric_encoders: true
"#,
    )
    .unwrap();

    let profile = config.device.build_profile().unwrap();
    assert_eq!(profile.kind(), ProfileKind::XTouch);

    let output = CaptureOutput::new();
    let mut xt = ControlSurfaceController::new(profile, output.clone());
    xt.set_encoder_led("encoder1", 0.0).unwrap();
    assert_eq!(wire(&output), vec![vec![0xB0, 48, 1]]);

    let event = xt.on_raw_cc(48, 1, 0).unwrap();
    assert_eq!(event.name, "encoder1");
}

#[test]
fn test_independent_controllers() {
    let (mut a, out_a) = xtouch_surface(EncoderMode::Fan);
    let (mut b, out_b) = xtouch_surface(EncoderMode::Spread);

    a.set_encoder_led("encoder1", 0.0).unwrap();
    b.set_encoder_led("encoder1", 0.0).unwrap();

    assert_eq!(wire(&out_a), vec![vec![0xB0, 48, 33]]);
    assert_eq!(wire(&out_b), vec![vec![0xB0, 48, 49]]);
}

#[test]
fn test_device_profile_enum_matches_variant() {
    let direct = XTouchProfile::new(EncoderMode::Pan).unwrap();
    let wrapped = DeviceProfile::build(ProfileKind::XTouch, EncoderMode::Pan, false).unwrap();

    for controller in [16u8, 48, 55, 127] {
        assert_eq!(
            direct.encoder_name(controller).unwrap(),
            wrapped.encoder_name(controller).unwrap()
        );
    }
    assert_eq!(
        direct.encode_encoder_value(0.5).unwrap(),
        wrapped.encode_encoder_value(0.5).unwrap()
    );
}
