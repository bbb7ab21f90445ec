#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Playback state machine governing the currently viewed tick.
//!
//! The controller has no timer of its own. The hosting adapter calls
//! [`PlaybackController::advance`] once per frame with the elapsed wall-clock
//! delta, and the controller converts that delta into discrete tick steps at
//! the configured cadence through a duration accumulator. All mutation
//! happens on the caller's single thread of control, so play/pause/seek take
//! effect atomically with respect to the next pulse and no stale advance can
//! fire against superseded state.

use std::time::Duration;

use ward_replay_core::{PlaybackSpeed, Tick};

/// Lifecycle phase of the playback controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackPhase {
    /// No run is loaded; every transport operation is a no-op.
    #[default]
    Idle,
    /// A run is loaded and the clock is stopped.
    Paused,
    /// The clock advances automatically at the configured cadence.
    Playing,
}

/// Owns the current tick, play state, and cadence for one loaded run.
#[derive(Clone, Debug)]
pub struct PlaybackController {
    phase: PlaybackPhase,
    current_tick: Tick,
    max_ticks: Tick,
    speed: PlaybackSpeed,
    accumulator: Duration,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    /// Creates an idle controller with the default cadence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            current_tick: Tick::ZERO,
            max_ticks: Tick::ZERO,
            speed: PlaybackSpeed::default(),
            accumulator: Duration::ZERO,
        }
    }

    /// Loads a new run, replacing any previous one.
    ///
    /// The controller rewinds to tick zero, pauses, and discards any pending
    /// pulse so nothing scheduled against the replaced run can fire.
    pub fn load_run(&mut self, max_ticks: Tick) {
        self.phase = PlaybackPhase::Paused;
        self.current_tick = Tick::ZERO;
        self.max_ticks = max_ticks;
        self.accumulator = Duration::ZERO;
    }

    /// Starts automatic advancement.
    ///
    /// No-op while idle, already playing, or already at the tick bound.
    pub fn play(&mut self) {
        if self.phase == PlaybackPhase::Paused && self.current_tick < self.max_ticks {
            self.phase = PlaybackPhase::Playing;
        }
    }

    /// Stops automatic advancement and discards any pending pulse.
    pub fn pause(&mut self) {
        if self.phase == PlaybackPhase::Playing {
            self.phase = PlaybackPhase::Paused;
        }
        self.accumulator = Duration::ZERO;
    }

    /// Toggles between playing and paused. No-op while idle.
    pub fn toggle(&mut self) {
        match self.phase {
            PlaybackPhase::Idle => {}
            PlaybackPhase::Paused => self.play(),
            PlaybackPhase::Playing => self.pause(),
        }
    }

    /// Jumps to the requested tick, clamped into `[0, max_ticks]`.
    ///
    /// Seeking always pauses, so user scrubbing never races an in-flight
    /// automatic advance. No-op while idle.
    pub fn seek(&mut self, tick: Tick) {
        if self.phase == PlaybackPhase::Idle {
            return;
        }
        self.phase = PlaybackPhase::Paused;
        self.current_tick = tick.clamp_to(self.max_ticks);
        self.accumulator = Duration::ZERO;
    }

    /// Selects the cadence used for subsequent automatic advances.
    ///
    /// An in-flight partial interval is discarded rather than carried over;
    /// the next pulse fires one full interval after the change.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
        self.accumulator = Duration::ZERO;
    }

    /// Feeds one frame's elapsed time into the clock.
    ///
    /// While playing, whole intervals accumulated so far each advance the
    /// tick by one; reaching the tick bound pauses the controller and stops
    /// further advancement until the next [`play`](Self::play). Returns
    /// whether the current tick changed so hosts can rebuild their snapshot
    /// only when needed. Tick values observed across calls are monotonically
    /// non-decreasing while playing.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.phase != PlaybackPhase::Playing {
            return false;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let interval = self.speed.interval();
        let mut changed = false;

        while self.accumulator >= interval {
            self.accumulator -= interval;

            if self.current_tick >= self.max_ticks {
                self.pause();
                break;
            }

            self.current_tick = self.current_tick.next();
            changed = true;

            if self.current_tick >= self.max_ticks {
                self.pause();
                break;
            }
        }

        changed
    }

    /// Currently viewed tick, always within `[0, max_ticks]`.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Upper bound of the playable tick range for the loaded run.
    #[must_use]
    pub const fn max_ticks(&self) -> Tick {
        self.max_ticks
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Reports whether the clock is advancing automatically.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.phase, PlaybackPhase::Playing)
    }

    /// Currently selected cadence preset.
    #[must_use]
    pub const fn speed(&self) -> PlaybackSpeed {
        self.speed
    }
}
