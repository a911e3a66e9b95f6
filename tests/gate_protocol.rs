use std::time::Duration;

use wernstrom::{
    engine::{EngineCall, RecordingEngine},
    pitch::{midi_to_frequency, transpose},
    voice::{GateAction, SLOT_COUNT},
    SynthConfig, VoiceController,
};

type Controller = VoiceController<RecordingEngine>;

fn controller() -> Controller {
    let mut controller = VoiceController::new(&SynthConfig::default(), RecordingEngine::new());
    controller.engine_mut().take_calls();
    controller
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Collect gate calls made so far, stamped with the controller clock.
fn stamp_gates(controller: &mut Controller, log: &mut Vec<(Duration, GateAction)>) {
    let now = controller.now();
    for call in controller.engine_mut().take_calls() {
        if let EngineCall::Gate(action) = call {
            log.push((now, action));
        }
    }
}

/// Step the clock 1 ms at a time up to `end`, stamping gate calls.
fn run_until(controller: &mut Controller, end: Duration, log: &mut Vec<(Duration, GateAction)>) {
    stamp_gates(controller, log);
    while controller.now() < end {
        controller.advance(ms(1));
        stamp_gates(controller, log);
    }
}

#[test]
fn single_note_on_closes_then_opens_after_delay() {
    let mut controller = controller();
    let mut log = Vec::new();

    controller.note_on(60, 0);
    run_until(&mut controller, ms(50), &mut log);

    assert_eq!(
        log,
        vec![(ms(0), GateAction::Close), (ms(10), GateAction::Open)]
    );
}

#[test]
fn press_and_release_settles_closed_for_every_note_and_shift() {
    let config = SynthConfig::default();
    for shift in config.scheduler.octave_min..=config.scheduler.octave_max {
        for pitch in 0..=127u8 {
            let mut controller = controller();
            let note = controller.note_on(pitch, shift);
            assert_eq!(note, transpose(pitch, shift));
            controller.note_off(note);
            controller.settle();

            let snapshot = controller.snapshot();
            assert!(snapshot.slots.iter().all(Option::is_none), "pitch {pitch} shift {shift}");
            assert!(!snapshot.gate_open, "pitch {pitch} shift {shift}");
            assert_eq!(controller.engine().gate_log().last(), Some(&GateAction::Close));
        }
    }
}

#[test]
fn overlapping_release_keeps_gate_open() {
    let mut controller = controller();
    controller.note_on(60, 0);
    controller.note_on(64, 0);
    controller.note_off(60);
    controller.settle();

    let snapshot = controller.snapshot();
    let held: Vec<u8> = snapshot.slots.iter().flatten().copied().collect();
    assert_eq!(held, vec![64]);
    assert!(snapshot.gate_open);
}

#[test]
fn quick_tap_settles_closed() {
    let mut controller = controller();
    controller.note_on(60, 0);
    controller.note_off(60);
    controller.settle();

    assert!(controller.scheduler().pool().is_empty());
    assert!(!controller.snapshot().gate_open);
    assert_eq!(
        controller.engine().gate_log(),
        vec![GateAction::Close, GateAction::Open, GateAction::Close]
    );
}

#[test]
fn release_racing_a_new_press_does_not_close_the_gate() {
    let mut controller = controller();
    let mut log = Vec::new();

    controller.note_on(60, 0);
    run_until(&mut controller, ms(100), &mut log);

    // the release's close comes due at 110 ms while 67 is held, so it is dropped
    controller.note_off(60);
    run_until(&mut controller, ms(103), &mut log);
    controller.note_on(67, 0);
    run_until(&mut controller, ms(200), &mut log);

    assert_eq!(
        log,
        vec![
            (ms(0), GateAction::Close),
            (ms(10), GateAction::Open),
            (ms(103), GateAction::Close),
            (ms(113), GateAction::Open),
        ]
    );
    assert!(controller.snapshot().gate_open);
}

#[test]
fn twelfth_note_is_not_tracked() {
    let mut controller = controller();
    for pitch in 60..72 {
        controller.note_on(pitch, 0);
    }
    controller.settle();

    let pool = controller.scheduler().pool();
    assert_eq!(pool.occupied(), SLOT_COUNT);
    assert!(!pool.contains(71));
    assert!(pool.contains(60) && pool.contains(70));
    assert!(controller.snapshot().gate_open);
}

#[test]
fn releasing_absent_note_leaves_state_unchanged() {
    let mut controller = controller();
    controller.note_on(60, 0);
    controller.settle();
    controller.engine_mut().take_calls();

    let before = controller.snapshot();
    controller.note_off(61);
    controller.settle();

    assert_eq!(controller.snapshot(), before);
    assert!(controller.engine().calls().is_empty());
}

#[test]
fn octave_shift_request_clamps_to_upper_bound() {
    let mut controller = controller();
    assert_eq!(controller.set_octave_shift(10), 3);
    assert_eq!(controller.shift_octave(-10), -2);
}

#[test]
fn note_on_glides_both_pitches_and_sets_level_at_once() {
    let mut controller = controller();
    controller.note_on(57, 1);

    let glide = ms(100);
    let calls = controller.engine().calls();
    assert!(calls.contains(&EngineCall::SetFrequency {
        voice: 0,
        hz: midi_to_frequency(69),
        ramp: glide
    }));
    assert!(calls.contains(&EngineCall::SetFrequency {
        voice: 2,
        hz: midi_to_frequency(57),
        ramp: glide
    }));
    assert!(calls.contains(&EngineCall::SetAmplitude {
        voice: 1,
        level: 0.2,
        ramp: Duration::ZERO
    }));
}

#[cfg(feature = "serde")]
#[test]
fn zero_gate_delay_config_still_separates_close_and_open() {
    let config: SynthConfig =
        serde_json::from_str(r#"{ "scheduler": { "gate_delay_ms": 0 } }"#).expect("valid config");
    let mut controller = VoiceController::new(&config, RecordingEngine::new());
    controller.engine_mut().take_calls();
    let mut log = Vec::new();

    controller.note_on(60, 0);
    assert_eq!(controller.engine().gate_log(), vec![GateAction::Close]);
    run_until(&mut controller, ms(5), &mut log);

    // the release's close is still deferred, so the held 64 keeps the gate open
    controller.note_off(60);
    controller.note_on(64, 0);
    run_until(&mut controller, ms(20), &mut log);

    assert_eq!(
        log,
        vec![
            (ms(0), GateAction::Close),
            (ms(1), GateAction::Open),
            (ms(5), GateAction::Close),
            (ms(6), GateAction::Open),
        ]
    );
    assert!(controller.snapshot().gate_open);
}
