#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Ward Replay adapters.
//!
//! Scene population is kept separate from drawing: [`populate_scene`] is a
//! pure function from a facility layout and a world snapshot to a list of
//! positioned markers, so placement is testable without a window, and any
//! [`RenderingBackend`] can present the result.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use ward_replay_core::{AgentId, InfectionState, PlaybackSpeed, RoomId, Tick, WorldSnapshot};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Palette shared by every backend, matching the facility's dark theme.
pub mod palette {
    use super::Color;

    /// Solid color used to clear each frame.
    pub const BACKGROUND: Color = Color::from_rgb_u8(0x0f, 0x17, 0x2a);
    /// Fill applied to room rectangles.
    pub const ROOM_FILL: Color = Color::from_rgb_u8(0x1e, 0x29, 0x3b);
    /// Outline applied to room rectangles.
    pub const ROOM_BORDER: Color = Color::from_rgb_u8(0x33, 0x41, 0x55);
    /// Room labels and panel readouts.
    pub const LABEL: Color = Color::from_rgb_u8(0x94, 0xa3, 0xb8);
    /// Infected patients.
    pub const INFECTED: Color = Color::from_rgb_u8(0xef, 0x44, 0x44);
    /// Susceptible patients.
    pub const SUSCEPTIBLE: Color = Color::from_rgb_u8(0x3b, 0x82, 0xf6);
    /// Staff markers.
    pub const STAFF: Color = Color::from_rgb_u8(0x10, 0xb9, 0x81);
    /// Patient outlines and identifier labels.
    pub const MARKER_OUTLINE: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);

    /// Fill color for a patient in the given infection state.
    #[must_use]
    pub const fn infection_color(state: ward_replay_core::InfectionState) -> Color {
        match state {
            ward_replay_core::InfectionState::Infected => INFECTED,
            ward_replay_core::InfectionState::Susceptible => SUSCEPTIBLE,
        }
    }
}

/// Radius of a patient marker in logical units.
pub const PATIENT_RADIUS: f32 = 15.0;

/// Radius of a staff marker in logical units.
pub const STAFF_RADIUS: f32 = 10.0;

/// Cyclic offsets keeping co-located staff markers from fully overlapping.
///
/// The index advances per staff member whose room resolves, in staff-map
/// enumeration order, so placement is a pure function of the snapshot.
pub const STAFF_OFFSETS: [Vec2; 4] = [
    Vec2::new(-30.0, -30.0),
    Vec2::new(30.0, 30.0),
    Vec2::new(-30.0, 30.0),
    Vec2::new(30.0, -30.0),
];

/// On-screen rectangle a room occupies, in logical canvas units.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomShape {
    /// Left edge of the rectangle.
    pub x: f32,
    /// Top edge of the rectangle.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
    /// Human-readable name painted inside the rectangle.
    pub label: String,
}

impl RoomShape {
    /// Creates a new room rectangle.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32, label: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: label.to_owned(),
        }
    }

    /// Center point of the rectangle, where occupants are anchored.
    #[must_use]
    pub fn centroid(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Static mapping from room identifiers to on-screen regions.
///
/// Read-only and process-wide: the facility is a build-time constant, not
/// data-driven. Rooms referenced by the log but absent here are simply not
/// drawn; staff without a resolvable room fall back to the corridor anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct FacilityLayout {
    rooms: Vec<(RoomId, RoomShape)>,
    corridor_anchor: Vec2,
    canvas_size: Vec2,
}

impl Default for FacilityLayout {
    fn default() -> Self {
        Self {
            rooms: vec![
                (
                    RoomId::new("R_01"),
                    RoomShape::new(50.0, 50.0, 200.0, 150.0, "Room 1 (Isolation)"),
                ),
                (
                    RoomId::new("R_02"),
                    RoomShape::new(300.0, 50.0, 200.0, 150.0, "Room 2"),
                ),
                (
                    RoomId::new("CORRIDOR"),
                    RoomShape::new(50.0, 200.0, 700.0, 80.0, "Main Corridor"),
                ),
            ],
            corridor_anchor: Vec2::new(50.0, 240.0),
            canvas_size: Vec2::new(800.0, 400.0),
        }
    }
}

impl FacilityLayout {
    /// Looks up the rectangle for a room, if the facility knows it.
    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&RoomShape> {
        self.rooms
            .iter()
            .find(|(room_id, _)| room_id == id)
            .map(|(_, shape)| shape)
    }

    /// Rooms in their fixed drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &(RoomId, RoomShape)> {
        self.rooms.iter()
    }

    /// Anchor point for staff whose room is unresolved.
    #[must_use]
    pub const fn corridor_anchor(&self) -> Vec2 {
        self.corridor_anchor
    }

    /// Logical size of the drawing surface.
    #[must_use]
    pub const fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }
}

/// Positioned patient marker ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientMarker {
    /// Identifier painted next to the marker.
    pub id: AgentId,
    /// Marker center in logical canvas units.
    pub position: Vec2,
    /// Infection state selecting the marker's fill color.
    pub infection: InfectionState,
}

/// Positioned staff marker ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct StaffMarker {
    /// Identifier painted next to the marker.
    pub id: AgentId,
    /// Marker center in logical canvas units.
    pub position: Vec2,
}

/// Playback readouts shown by the control panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackHud {
    /// Currently viewed tick.
    pub current_tick: Tick,
    /// Upper bound of the scrub range.
    pub max_ticks: Tick,
    /// Whether the clock is advancing automatically.
    pub playing: bool,
    /// Currently selected cadence preset.
    pub speed: PlaybackSpeed,
}

/// Scene description consumed by rendering backends.
///
/// Content is ordered back to front: rooms, then patients, then staff.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Logical size of the drawing surface the content is laid out on.
    pub canvas_size: Vec2,
    /// Room rectangles in drawing order.
    pub rooms: Vec<RoomShape>,
    /// Patients with a resolved room.
    pub patients: Vec<PatientMarker>,
    /// Staff, anchored to the corridor when their room is unresolved.
    pub staff: Vec<StaffMarker>,
    /// Playback readouts for the control panel.
    pub hud: PlaybackHud,
}

/// Derives a drawable scene from the layout and a world snapshot.
///
/// Pure and total: unknown room references skip the patient or anchor the
/// staff member at the corridor, and re-populating from an identical
/// snapshot yields an identical scene.
#[must_use]
pub fn populate_scene(
    layout: &FacilityLayout,
    snapshot: &WorldSnapshot,
    hud: PlaybackHud,
) -> Scene {
    let rooms = layout.iter().map(|(_, shape)| shape.clone()).collect();

    let patients = snapshot
        .patients
        .iter()
        .filter_map(|(id, state)| {
            let shape = state.room.as_ref().and_then(|room| layout.room(room))?;
            Some(PatientMarker {
                id: id.clone(),
                position: shape.centroid(),
                infection: state.infection,
            })
        })
        .collect();

    let mut staff = Vec::new();
    let mut offset_index = 0usize;
    for (id, state) in &snapshot.staff {
        let position = match state.room.as_ref().and_then(|room| layout.room(room)) {
            Some(shape) => {
                let offset = STAFF_OFFSETS[offset_index % STAFF_OFFSETS.len()];
                offset_index += 1;
                shape.centroid() + offset
            }
            None => layout.corridor_anchor(),
        };
        staff.push(StaffMarker {
            id: id.clone(),
            position,
        });
    }

    Scene {
        canvas_size: layout.canvas_size(),
        rooms,
        patients,
        staff,
        hud,
    }
}

/// Input gathered by adapters before updating the scene for a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Whether the user requested a play/pause toggle this frame.
    pub toggle_playback: bool,
    /// Absolute tick the user scrubbed to, if any.
    pub scrub_to: Option<Tick>,
    /// Cadence preset the user selected, if any.
    pub speed_selected: Option<PlaybackSpeed>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Ward Replay scenes.
pub trait RenderingBackend {
    /// Runs the backend until it is requested to exit.
    ///
    /// The `update_scene` closure receives the frame delta and the input
    /// captured by the adapter, and may replace the scene before it is
    /// rendered. The frame loop is the sole pulse source for playback.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
