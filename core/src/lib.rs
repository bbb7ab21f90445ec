#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ward Replay viewer.
//!
//! This crate defines the vocabulary that connects the snapshot builder, the
//! playback controller, and the rendering adapters. An external simulation
//! engine supplies a [`RunResult`] — an ordered log of [`Event`] values plus a
//! tick bound — and everything downstream derives from it: the builder folds
//! the log into a [`WorldSnapshot`], the controller owns the currently viewed
//! [`Tick`], and adapters present the result.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Discrete unit of simulated time. An event applies at exactly one tick.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Tick(u64);

impl Tick {
    /// Tick zero, before any event need exist.
    pub const ZERO: Tick = Tick(0);

    /// Creates a new tick wrapper with the provided value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the underlying tick value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the tick immediately after this one, saturating at the bound.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Clamps the tick into the inclusive range `[Tick::ZERO, bound]`.
    #[must_use]
    pub fn clamp_to(&self, bound: Tick) -> Self {
        Self(self.0.min(bound.0))
    }
}

/// Identifier of a simulated person, patient or staff alike.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    /// Creates a new agent identifier.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<String>,
    {
        Self(value.into())
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a location within the facility.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a new room identifier.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<String>,
    {
        Self(value.into())
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Infection status of a patient. Once infected, a patient never reverts
/// within a replay; no recovery events are modeled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfectionState {
    /// The patient has not been infected by any event up to the cutoff tick.
    Susceptible,
    /// The patient was the target of at least one infection event.
    Infected,
}

/// Tag attached to each event in the wire log.
///
/// The vocabulary is open: tags this viewer does not understand deserialize
/// to [`EventKind::Unknown`] and are ignored during replay rather than
/// rejected, keeping the log format forward compatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// An agent moved into a room.
    Move,
    /// A patient was infected.
    Infection,
    /// Any tag outside this viewer's vocabulary.
    #[serde(other)]
    Unknown,
}

/// Immutable record in the simulation event log.
///
/// Wire shape (extra fields are ignored):
/// `{ "t": <int>, "type": <tag>, "agent_id"?, "target"?, "room"? }`.
/// Every field beyond the tick and tag is optional; a partial event degrades
/// to a partial state update instead of an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Tick at which the event applies.
    #[serde(rename = "t")]
    pub tick: Tick,
    /// Tag describing the effect of the event.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Acting agent, present for movement events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    /// Affected patient, present for infection events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<AgentId>,
    /// Destination room, present for movement events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomId>,
}

impl Event {
    /// Creates a movement event for the provided agent and room.
    #[must_use]
    pub fn movement(tick: Tick, agent_id: AgentId, room: RoomId) -> Self {
        Self {
            tick,
            kind: EventKind::Move,
            agent_id: Some(agent_id),
            target: None,
            room: Some(room),
        }
    }

    /// Creates an infection event for the provided patient.
    #[must_use]
    pub fn infection(tick: Tick, target: AgentId) -> Self {
        Self {
            tick,
            kind: EventKind::Infection,
            agent_id: None,
            target: Some(target),
            room: None,
        }
    }
}

/// Completed simulation run as delivered by the external engine.
///
/// Accepts the engine's own field name `ticks_simulated` for the tick bound;
/// any additional run metadata (identifiers, timestamps) is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Ordered event log produced by the run.
    pub events: Vec<Event>,
    /// Upper bound of the playable tick range.
    #[serde(alias = "ticks_simulated")]
    pub max_ticks: Tick,
}

/// State derived for a single patient at a cutoff tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientState {
    /// Room the patient occupies, when known.
    pub room: Option<RoomId>,
    /// Infection status accumulated from the replayed log.
    pub infection: InfectionState,
}

/// State derived for a single staff member at a cutoff tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffState {
    /// Room the staff member last moved into, when the event carried one.
    pub room: Option<RoomId>,
}

/// Fully derived world state at a cutoff tick.
///
/// Snapshots are ephemeral values recomputed on demand, never mutated in
/// place across calls. The maps are ordered so that enumeration — and with
/// it marker placement — is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    /// Patients keyed by identifier.
    pub patients: BTreeMap<AgentId, PatientState>,
    /// Staff keyed by identifier; populated by movement events only.
    pub staff: BTreeMap<AgentId, StaffState>,
    /// Tracked rooms with their viral-load scalar. Seeded, not yet mutated
    /// by replay; reserved as an extension point.
    pub rooms: BTreeMap<RoomId, f32>,
}

/// Single patient known to exist before any event is replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedPatient {
    /// Identifier of the seeded patient.
    pub id: AgentId,
    /// Room the patient starts in.
    pub room: RoomId,
    /// Infection status the patient starts with.
    pub infection: InfectionState,
}

/// Initial occupancy used to seed every snapshot.
///
/// The defaults reproduce the engine's canonical two-patient ward; hosts
/// replaying logs from a differently seeded scenario supply their own census.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitialCensus {
    /// Patients that exist even when the log never mentions them.
    pub patients: Vec<SeedPatient>,
    /// Fixed set of rooms tracked for viral load.
    pub rooms: Vec<RoomId>,
}

impl Default for InitialCensus {
    fn default() -> Self {
        Self {
            patients: vec![
                SeedPatient {
                    id: AgentId::new("P_INDEX"),
                    room: RoomId::new("R_01"),
                    infection: InfectionState::Infected,
                },
                SeedPatient {
                    id: AgentId::new("P_001"),
                    room: RoomId::new("R_02"),
                    infection: InfectionState::Susceptible,
                },
            ],
            rooms: vec![RoomId::new("R_01"), RoomId::new("R_02")],
        }
    }
}

/// Discrete playback cadence presets offered to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackSpeed {
    /// One tick per second.
    Slow,
    /// One tick every half second.
    #[default]
    Normal,
    /// Ten ticks per second.
    Fast,
    /// As fast as the pulse source allows.
    Max,
}

impl PlaybackSpeed {
    /// Every preset in selector order.
    pub const ALL: [PlaybackSpeed; 4] = [Self::Slow, Self::Normal, Self::Fast, Self::Max];

    /// Duration between automatic tick advances.
    #[must_use]
    pub const fn interval(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(1000),
            Self::Normal => Duration::from_millis(500),
            Self::Fast => Duration::from_millis(100),
            Self::Max => Duration::from_millis(10),
        }
    }

    /// User-facing label for the preset.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Max => "max",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_clamps_to_bound() {
        assert_eq!(Tick::new(7).clamp_to(Tick::new(5)), Tick::new(5));
        assert_eq!(Tick::new(3).clamp_to(Tick::new(5)), Tick::new(3));
        assert_eq!(Tick::ZERO.clamp_to(Tick::ZERO), Tick::ZERO);
    }

    #[test]
    fn tick_next_saturates() {
        assert_eq!(Tick::new(4).next(), Tick::new(5));
        assert_eq!(Tick::new(u64::MAX).next(), Tick::new(u64::MAX));
    }

    #[test]
    fn event_parses_minimal_wire_shape() {
        let event: Event =
            serde_json::from_str(r#"{"t":2,"type":"MOVE","agent_id":"S1","room":"R_01"}"#)
                .expect("valid movement event");

        assert_eq!(event, Event::movement(Tick::new(2), AgentId::new("S1"), RoomId::new("R_01")));
    }

    #[test]
    fn event_ignores_extra_wire_fields() {
        let event: Event = serde_json::from_str(
            r#"{"t":5,"type":"INFECTION","target":"P_001","pathogen":"MRSA","source":"S1"}"#,
        )
        .expect("extra fields must be tolerated");

        assert_eq!(event, Event::infection(Tick::new(5), AgentId::new("P_001")));
    }

    #[test]
    fn unknown_event_tags_parse_without_error() {
        let event: Event = serde_json::from_str(r#"{"t":9,"type":"HAND_HYGIENE"}"#)
            .expect("unknown tags must not be rejected");

        assert_eq!(event.kind, EventKind::Unknown);
        assert!(event.agent_id.is_none());
        assert!(event.target.is_none());
        assert!(event.room.is_none());
    }

    #[test]
    fn partial_event_parses_with_absent_fields() {
        let event: Event = serde_json::from_str(r#"{"t":1,"type":"MOVE"}"#)
            .expect("movement without an agent is still a valid record");

        assert_eq!(event.kind, EventKind::Move);
        assert!(event.agent_id.is_none());
        assert!(event.room.is_none());
    }

    #[test]
    fn run_result_accepts_engine_field_alias() {
        let run: RunResult = serde_json::from_str(
            r#"{
                "id": "run-1",
                "scenario_id": "baseline",
                "ticks_simulated": 12,
                "event_log_size": 1,
                "events": [{"t":2,"type":"MOVE","agent_id":"S1","room":"R_01"}]
            }"#,
        )
        .expect("engine run log must parse");

        assert_eq!(run.max_ticks, Tick::new(12));
        assert_eq!(run.events.len(), 1);
    }

    #[test]
    fn event_round_trips_through_json() {
        let event = Event::movement(Tick::new(3), AgentId::new("S2"), RoomId::new("CORRIDOR"));
        let text = serde_json::to_string(&event).expect("serialize");
        let restored: Event = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(restored, event);
    }

    #[test]
    fn speed_presets_match_selector_contract() {
        assert_eq!(PlaybackSpeed::Slow.interval(), Duration::from_millis(1000));
        assert_eq!(PlaybackSpeed::Normal.interval(), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Fast.interval(), Duration::from_millis(100));
        assert_eq!(PlaybackSpeed::Max.interval(), Duration::from_millis(10));
        assert_eq!(PlaybackSpeed::default(), PlaybackSpeed::Normal);

        let labels: Vec<_> = PlaybackSpeed::ALL.iter().map(|speed| speed.label()).collect();
        assert_eq!(labels, vec!["slow", "normal", "fast", "max"]);
    }

    #[test]
    fn default_census_names_the_two_seed_patients() {
        let census = InitialCensus::default();
        assert_eq!(census.patients.len(), 2);
        assert_eq!(census.patients[0].id, AgentId::new("P_INDEX"));
        assert_eq!(census.patients[0].infection, InfectionState::Infected);
        assert_eq!(census.patients[1].id, AgentId::new("P_001"));
        assert_eq!(census.patients[1].infection, InfectionState::Susceptible);
        assert_eq!(census.rooms, vec![RoomId::new("R_01"), RoomId::new("R_02")]);
    }
}
