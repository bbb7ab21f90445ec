use std::time::Duration;

use ward_replay_core::{PlaybackSpeed, Tick};
use ward_replay_system_playback::{PlaybackController, PlaybackPhase};

fn loaded(max_ticks: u64) -> PlaybackController {
    let mut controller = PlaybackController::new();
    controller.load_run(Tick::new(max_ticks));
    controller
}

#[test]
fn starts_idle_and_ignores_transport_operations() {
    let mut controller = PlaybackController::new();
    assert_eq!(controller.phase(), PlaybackPhase::Idle);

    controller.play();
    controller.seek(Tick::new(5));
    assert!(!controller.advance(Duration::from_secs(10)));

    assert_eq!(controller.phase(), PlaybackPhase::Idle);
    assert_eq!(controller.current_tick(), Tick::ZERO);
}

#[test]
fn load_run_rewinds_and_pauses() {
    let mut controller = loaded(10);
    controller.play();
    assert!(controller.advance(Duration::from_millis(500)));

    controller.load_run(Tick::new(4));
    assert_eq!(controller.phase(), PlaybackPhase::Paused);
    assert_eq!(controller.current_tick(), Tick::ZERO);
    assert_eq!(controller.max_ticks(), Tick::new(4));

    // Time accumulated against the replaced run must not fire.
    controller.play();
    assert!(!controller.advance(Duration::from_millis(499)));
    assert_eq!(controller.current_tick(), Tick::ZERO);
}

#[test]
fn advance_steps_one_tick_per_interval() {
    let mut controller = loaded(10);
    controller.play();

    assert!(!controller.advance(Duration::from_millis(499)));
    assert!(controller.advance(Duration::from_millis(1)));
    assert_eq!(controller.current_tick(), Tick::new(1));

    // A long frame catches up one tick per whole interval.
    assert!(controller.advance(Duration::from_millis(1600)));
    assert_eq!(controller.current_tick(), Tick::new(4));
    assert!(controller.is_playing());
}

#[test]
fn play_at_the_bound_is_a_no_op() {
    let mut controller = loaded(3);
    controller.seek(Tick::new(3));
    controller.play();

    assert_eq!(controller.phase(), PlaybackPhase::Paused);
    assert!(!controller.advance(Duration::from_secs(5)));
    assert_eq!(controller.current_tick(), Tick::new(3));
}

#[test]
fn auto_stops_at_the_tick_bound() {
    let mut controller = loaded(5);
    controller.seek(Tick::new(4));
    controller.play();

    assert!(controller.advance(Duration::from_millis(500)));
    assert_eq!(controller.current_tick(), Tick::new(5));
    assert_eq!(controller.phase(), PlaybackPhase::Paused);

    // No further advances without a fresh play().
    assert!(!controller.advance(Duration::from_secs(60)));
    assert_eq!(controller.current_tick(), Tick::new(5));
}

#[test]
fn long_frame_never_overshoots_the_bound() {
    let mut controller = loaded(3);
    controller.play();

    assert!(controller.advance(Duration::from_secs(30)));
    assert_eq!(controller.current_tick(), Tick::new(3));
    assert_eq!(controller.phase(), PlaybackPhase::Paused);
}

#[test]
fn seek_clamps_into_range_and_pauses() {
    let mut controller = loaded(8);
    controller.play();

    controller.seek(Tick::new(100));
    assert_eq!(controller.current_tick(), Tick::new(8));
    assert_eq!(controller.phase(), PlaybackPhase::Paused);

    controller.seek(Tick::new(3));
    assert_eq!(controller.current_tick(), Tick::new(3));
}

#[test]
fn seek_discards_a_pending_pulse() {
    let mut controller = loaded(8);
    controller.play();
    assert!(!controller.advance(Duration::from_millis(499)));

    controller.seek(Tick::new(2));
    controller.play();
    assert!(!controller.advance(Duration::from_millis(499)));
    assert_eq!(controller.current_tick(), Tick::new(2));
}

#[test]
fn pause_cancels_the_pending_pulse() {
    let mut controller = loaded(8);
    controller.play();
    assert!(!controller.advance(Duration::from_millis(499)));

    controller.pause();
    controller.play();
    assert!(!controller.advance(Duration::from_millis(499)));
    assert_eq!(controller.current_tick(), Tick::ZERO);

    assert!(controller.advance(Duration::from_millis(1)));
    assert_eq!(controller.current_tick(), Tick::new(1));
}

#[test]
fn set_speed_reschedules_without_carry_over() {
    let mut controller = loaded(8);
    controller.play();
    assert!(!controller.advance(Duration::from_millis(400)));

    controller.set_speed(PlaybackSpeed::Fast);
    assert!(!controller.advance(Duration::from_millis(99)));
    assert!(controller.advance(Duration::from_millis(1)));
    assert_eq!(controller.current_tick(), Tick::new(1));
    assert_eq!(controller.speed(), PlaybackSpeed::Fast);
}

#[test]
fn toggle_flips_between_paused_and_playing() {
    let mut controller = loaded(8);
    controller.toggle();
    assert!(controller.is_playing());
    controller.toggle();
    assert_eq!(controller.phase(), PlaybackPhase::Paused);
}

#[test]
fn ticks_are_monotonic_while_playing() {
    let mut controller = loaded(20);
    controller.set_speed(PlaybackSpeed::Max);
    controller.play();

    let mut observed = Vec::new();
    for _ in 0..40 {
        let _ = controller.advance(Duration::from_millis(7));
        observed.push(controller.current_tick());
    }

    assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(observed.iter().all(|tick| *tick <= Tick::new(20)));
}

#[test]
fn zero_tick_run_is_a_valid_degenerate_case() {
    let mut controller = loaded(0);
    controller.play();
    assert_eq!(controller.phase(), PlaybackPhase::Paused);
    assert!(!controller.advance(Duration::from_secs(1)));
    assert_eq!(controller.current_tick(), Tick::ZERO);
}
