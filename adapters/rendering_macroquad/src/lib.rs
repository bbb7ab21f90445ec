#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Ward Replay.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter uses Macroquad's immediate-mode UI module for the playback
//! control panel. All UI-specific calls live inside the local `ui` module to
//! avoid leaking Macroquad UI types throughout the renderer.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext};
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use std::time::Duration;
use ward_replay_core::{PlaybackSpeed, Tick};
use ward_replay_rendering::{
    palette, Color, FrameInput, Presentation, RenderingBackend, Scene, PATIENT_RADIUS,
    STAFF_RADIUS,
};

/// Height in pixels reserved below the canvas for the control panel.
const PANEL_HEIGHT: f32 = 120.0;

/// Tracks UI-sourced interactions so they can be merged with physical input
/// on the next frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    toggle_latched: bool,
    scrub_latched: Option<Tick>,
    speed_latched: Option<PlaybackSpeed>,
}

impl ControlPanelInputState {
    /// Returns whether the UI requested a play/pause toggle and clears the
    /// latch so the action fires only once.
    pub fn take_toggle(&mut self) -> bool {
        let latched = self.toggle_latched;
        self.toggle_latched = false;
        latched
    }

    /// Records that the panel's toggle button was pressed this frame.
    pub fn register_toggle(&mut self) {
        self.toggle_latched = true;
    }

    /// Returns the latched scrub target, clearing it so the seek fires once.
    pub fn take_scrub(&mut self) -> Option<Tick> {
        self.scrub_latched.take()
    }

    /// Records that the scrub slider was dragged to the provided tick.
    pub fn register_scrub(&mut self, tick: Tick) {
        self.scrub_latched = Some(tick);
    }

    /// Returns the latched speed selection, clearing it so it fires once.
    pub fn take_speed(&mut self) -> Option<PlaybackSpeed> {
        self.speed_latched.take()
    }

    /// Records that a speed preset button was pressed this frame.
    pub fn register_speed(&mut self, speed: PlaybackSpeed) {
        self.speed_latched = Some(speed);
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during one frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the viewer.
    quit_requested: bool,
    /// `Space` toggles play/pause.
    toggle_playback: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            toggle_playback: is_key_pressed(KeyCode::Space),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

/// Mapping from the scene's logical canvas to the window's canvas area.
#[derive(Clone, Copy, Debug)]
struct CanvasMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CanvasMetrics {
    fn from_scene(scene: &Scene, area_width: f32, area_height: f32) -> Self {
        let canvas = scene.canvas_size;
        let scale = if canvas.x <= f32::EPSILON || canvas.y <= f32::EPSILON {
            1.0
        } else {
            (area_width / canvas.x).min(area_height / canvas.y)
        };

        Self {
            scale,
            offset_x: ((area_width - canvas.x * scale) * 0.5).max(0.0),
            offset_y: ((area_height - canvas.y * scale) * 0.5).max(0.0),
        }
    }

    fn project(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }

    fn length(&self, logical: f32) -> f32 {
        logical * self.scale
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let initial_width = scene.canvas_size.x.max(1.0) as i32;
        let initial_height = (scene.canvas_size.y + PANEL_HEIGHT).max(1.0) as i32;
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: initial_width,
            window_height: initial_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut panel_input = ControlPanelInputState::default();
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let canvas_height = (screen_height - PANEL_HEIGHT).max(0.0);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let frame_input = FrameInput {
                    toggle_playback: panel_input.take_toggle() || keyboard.toggle_playback,
                    scrub_to: panel_input.take_scrub(),
                    speed_selected: panel_input.take_speed(),
                };
                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = CanvasMetrics::from_scene(&scene, screen_width, canvas_height);
                draw_rooms(&scene, &metrics);
                draw_patients(&scene, &metrics);
                draw_staff(&scene, &metrics);

                let panel_context = ControlPanelUiContext {
                    origin: MacroquadVec2::new(0.0, canvas_height),
                    size: MacroquadVec2::new(screen_width, PANEL_HEIGHT),
                    background: to_macroquad_color(palette::ROOM_FILL),
                    hud: scene.hud,
                };
                let mut root_ui = macroquad::ui::root_ui();
                let result = draw_control_panel_ui(&mut root_ui, panel_context);
                if result.toggle_pressed {
                    panel_input.register_toggle();
                }
                if let Some(tick) = result.scrub_target {
                    panel_input.register_scrub(tick);
                }
                if let Some(speed) = result.speed_choice {
                    panel_input.register_speed(speed);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_rooms(scene: &Scene, metrics: &CanvasMetrics) {
    let fill = to_macroquad_color(palette::ROOM_FILL);
    let border = to_macroquad_color(palette::ROOM_BORDER);
    let label = to_macroquad_color(palette::LABEL);

    for room in &scene.rooms {
        let origin = metrics.project(Vec2::new(room.x, room.y));
        let width = metrics.length(room.width);
        let height = metrics.length(room.height);

        macroquad::shapes::draw_rectangle(origin.x, origin.y, width, height, fill);
        macroquad::shapes::draw_rectangle_lines(origin.x, origin.y, width, height, 2.0, border);
        macroquad::text::draw_text(
            &room.label,
            origin.x + metrics.length(10.0),
            origin.y + metrics.length(20.0),
            metrics.length(16.0),
            label,
        );
    }
}

fn draw_patients(scene: &Scene, metrics: &CanvasMetrics) {
    let outline = to_macroquad_color(palette::MARKER_OUTLINE);

    for patient in &scene.patients {
        let center = metrics.project(patient.position);
        let radius = metrics.length(PATIENT_RADIUS);
        let fill = to_macroquad_color(palette::infection_color(patient.infection));

        macroquad::shapes::draw_circle(center.x, center.y, radius, fill);
        macroquad::shapes::draw_circle_lines(center.x, center.y, radius, 2.0, outline);
        macroquad::text::draw_text(
            patient.id.as_str(),
            center.x - metrics.length(12.0),
            center.y + metrics.length(25.0),
            metrics.length(14.0),
            outline,
        );
    }
}

fn draw_staff(scene: &Scene, metrics: &CanvasMetrics) {
    let fill = to_macroquad_color(palette::STAFF);

    for member in &scene.staff {
        let center = metrics.project(member.position);
        let radius = metrics.length(STAFF_RADIUS);

        macroquad::shapes::draw_circle(center.x, center.y, radius, fill);
        macroquad::text::draw_text(
            member.id.as_str(),
            center.x - metrics.length(15.0),
            center.y - metrics.length(15.0),
            metrics.length(14.0),
            fill,
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
