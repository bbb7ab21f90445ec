//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter
//! can remain agnostic of Macroquad's UI types. The panel exposes the full
//! transport surface: play/pause toggle, scrub slider, and speed presets.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use ward_replay_core::{PlaybackSpeed, Tick};
use ward_replay_rendering::PlaybackHud;

/// Outcome of rendering the control panel UI for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ControlPanelUiResult {
    /// Whether the play/pause button was pressed during this frame.
    pub toggle_pressed: bool,
    /// Tick the scrub slider was dragged to, when it moved.
    pub scrub_target: Option<Tick>,
    /// Speed preset whose button was pressed, if any.
    pub speed_choice: Option<PlaybackSpeed>,
}

/// Snapshot of the control panel's layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour applied to the window skin.
    pub background: Color,
    /// Playback readouts driving the widgets.
    pub hud: PlaybackHud,
}

/// Renders the control panel's interactive elements for the current frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 12.0, 12.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(8.0, 8.0, 6.0, 6.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let hud = context.hud;
    let mut result = ControlPanelUiResult::default();
    let mut scrub_value = hud.current_tick.get() as f32;

    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        let toggle_label = if hud.playing { "Pause" } else { "Play" };
        result.toggle_pressed = ui.button(None, toggle_label);

        ui.label(
            None,
            &format!("Tick: {} / {}", hud.current_tick.get(), hud.max_ticks.get()),
        );

        if hud.max_ticks > Tick::ZERO {
            ui.slider(
                hash!("scrub"),
                "tick",
                0.0..hud.max_ticks.get() as f32,
                &mut scrub_value,
            );
        }

        ui.label(None, &format!("Speed: {}", hud.speed.label()));
        for speed in PlaybackSpeed::ALL {
            if ui.button(None, speed.label()) && speed != hud.speed {
                result.speed_choice = Some(speed);
            }
        }
    });

    ui.pop_skin();

    // The slider mutates its backing value only on user interaction, so any
    // difference from the displayed tick is a scrub request.
    let scrubbed = Tick::new(scrub_value.round().max(0.0) as u64);
    if scrubbed != hud.current_tick {
        result.scrub_target = Some(scrubbed.clamp_to(hud.max_ticks));
    }

    result
}
