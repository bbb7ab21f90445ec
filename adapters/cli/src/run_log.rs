//! Loading of engine run logs, plus a built-in demo run.

use std::{fs, io, path::Path};

use thiserror::Error;
use ward_replay_core::{AgentId, Event, RoomId, RunResult, Tick};

/// Failures encountered while loading a run log from disk.
#[derive(Debug, Error)]
pub(crate) enum RunLogError {
    /// The file could not be read.
    #[error("failed to read run log: {0}")]
    Io(#[from] io::Error),
    /// The file contents were not a valid run log.
    #[error("failed to parse run log: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads a JSON run log in the engine's wire shape.
pub(crate) fn load(path: &Path) -> Result<RunResult, RunLogError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Small built-in run used when no log file is provided.
pub(crate) fn demo_run() -> RunResult {
    RunResult {
        events: vec![
            Event::movement(Tick::new(1), AgentId::new("S1"), RoomId::new("CORRIDOR")),
            Event::movement(Tick::new(2), AgentId::new("S1"), RoomId::new("R_01")),
            Event::movement(Tick::new(3), AgentId::new("S2"), RoomId::new("R_02")),
            Event::movement(Tick::new(5), AgentId::new("S1"), RoomId::new("R_02")),
            Event::infection(Tick::new(6), AgentId::new("P_001")),
            Event::movement(Tick::new(7), AgentId::new("S1"), RoomId::new("CORRIDOR")),
            Event::movement(Tick::new(9), AgentId::new("S2"), RoomId::new("CORRIDOR")),
        ],
        max_ticks: Tick::new(10),
    }
}
