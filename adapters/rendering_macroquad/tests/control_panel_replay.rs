use ward_replay_core::{PlaybackSpeed, Tick};
use ward_replay_rendering_macroquad::ControlPanelInputState;

fn run_toggle_sequence(sequence: &[bool]) -> Vec<bool> {
    let mut state = ControlPanelInputState::default();
    let mut toggles = Vec::new();
    for &pressed in sequence {
        toggles.push(state.take_toggle());
        if pressed {
            state.register_toggle();
        }
    }

    // Flush any trailing latched press so the harness observes the final toggle.
    toggles.push(state.take_toggle());
    toggles
}

#[test]
fn toggle_button_sequence_is_deterministic() {
    let button_sequence = [false, true, false, true, true, false];
    let expected = vec![false, false, true, false, true, true, false];

    let first_run = run_toggle_sequence(&button_sequence);
    let second_run = run_toggle_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn scrub_latch_fires_exactly_once() {
    let mut state = ControlPanelInputState::default();
    assert_eq!(state.take_scrub(), None);

    state.register_scrub(Tick::new(7));
    assert_eq!(state.take_scrub(), Some(Tick::new(7)));
    assert_eq!(state.take_scrub(), None);
}

#[test]
fn scrub_latch_keeps_the_latest_request() {
    let mut state = ControlPanelInputState::default();
    state.register_scrub(Tick::new(3));
    state.register_scrub(Tick::new(9));
    assert_eq!(state.take_scrub(), Some(Tick::new(9)));
}

#[test]
fn speed_latch_fires_exactly_once() {
    let mut state = ControlPanelInputState::default();
    assert_eq!(state.take_speed(), None);

    state.register_speed(PlaybackSpeed::Fast);
    assert_eq!(state.take_speed(), Some(PlaybackSpeed::Fast));
    assert_eq!(state.take_speed(), None);
}

#[test]
fn latches_are_independent() {
    let mut state = ControlPanelInputState::default();
    state.register_toggle();
    state.register_scrub(Tick::new(2));
    state.register_speed(PlaybackSpeed::Max);

    assert_eq!(state.take_scrub(), Some(Tick::new(2)));
    assert!(state.take_toggle());
    assert_eq!(state.take_speed(), Some(PlaybackSpeed::Max));
    assert!(!state.take_toggle());
}
