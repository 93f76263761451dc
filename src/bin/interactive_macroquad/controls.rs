use std::ops::Range;

use incline_rust::core::{FlightPhase, Landing};
use macroquad::prelude::*;
use macroquad::ui::{Id, Ui, hash, root_ui, widgets};

use crate::constants::{
    ARROW_SCALE_SLIDER, GRAVITY_SLIDER, INCLINE_SLIDER, LAUNCH_ANGLE_SLIDER, SPEED_SLIDER,
    TIME_MULTIPLIER_SLIDER,
};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch_pause: bool,
    pub(crate) launch_all: bool,
    pub(crate) relaunch: bool,
    pub(crate) reset: bool,
    pub(crate) add: bool,
    pub(crate) remove: bool,
    pub(crate) next: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch_pause: self.launch_pause || other.launch_pause,
            launch_all: self.launch_all || other.launch_all,
            relaunch: self.relaunch || other.relaunch,
            reset: self.reset || other.reset,
            add: self.add || other.add,
            remove: self.remove || other.remove,
            next: self.next || other.next,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch_pause: is_key_pressed(KeyCode::Space),
        launch_all: is_key_pressed(KeyCode::L),
        relaunch: is_key_pressed(KeyCode::Enter),
        reset: is_key_pressed(KeyCode::R),
        add: is_key_pressed(KeyCode::N),
        remove: is_key_pressed(KeyCode::Delete),
        next: is_key_pressed(KeyCode::Tab),
    }
}

// The slider works in f32; only write back when the user moved it so the
// f64 value is not rounded every frame.
fn slider_f64(ui: &mut Ui, id: Id, label: &str, range: Range<f32>, value: &mut f64) {
    let mut v = *value as f32;
    let before = v;
    ui.slider(id, label, range, &mut v);
    if v != before {
        *value = f64::from(v);
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let mut env = state.environment;
    let mut config = state.selected().config.clone();

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 120.0), vec2(380.0, 560.0))
        .label("Controls")
        .ui(&mut *root_ui(), |ui| {
            ui.label(None, "Environment");
            slider_f64(
                ui,
                hash!(),
                "Incline (deg)",
                INCLINE_SLIDER,
                &mut env.incline_angle_deg,
            );
            slider_f64(ui, hash!(), "Gravity (m/s^2)", GRAVITY_SLIDER, &mut env.gravity_mps2);
            slider_f64(
                ui,
                hash!(),
                "Simulation Speed",
                TIME_MULTIPLIER_SLIDER,
                &mut env.time_multiplier,
            );
            slider_f64(
                ui,
                hash!(),
                "Velocity arrows",
                ARROW_SCALE_SLIDER,
                &mut env.velocity_scale,
            );
            slider_f64(
                ui,
                hash!(),
                "Component arrows",
                ARROW_SCALE_SLIDER,
                &mut env.component_scale,
            );
            ui.checkbox(hash!(), "Show prediction", &mut env.show_prediction);
            ui.separator();

            ui.label(None, &format!("Projectile: {}", config.name));
            slider_f64(ui, hash!(), "Speed (m/s)", SPEED_SLIDER, &mut config.speed_mps);
            slider_f64(
                ui,
                hash!(),
                "Launch angle (deg)",
                LAUNCH_ANGLE_SLIDER,
                &mut config.launch_angle_deg,
            );
            let start_label = format!("Start: {} (toggle)", config.start.label());
            if ui.button(None, start_label.as_str()) {
                config.start = config.start.toggled();
            }
            ui.separator();

            if ui.button(None, "Launch / Pause (Space)") {
                actions.launch_pause = true;
            }
            if ui.button(None, "Launch all (L)") {
                actions.launch_all = true;
            }
            if ui.button(None, "Relaunch (Enter)") {
                actions.relaunch = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            if ui.button(None, "Add projectile (N)") {
                actions.add = true;
            }
            if ui.button(None, "Remove (Del)") {
                actions.remove = true;
            }
            if ui.button(None, "Next projectile (Tab)") {
                actions.next = true;
            }
        });

    state.set_environment(env);
    state.replace_selected_config(config);
    actions
}

pub(crate) fn phase_text(phase: FlightPhase, time_s: f64) -> &'static str {
    match phase {
        FlightPhase::Idle if time_s > 0.0 => "Paused",
        FlightPhase::Idle => "Ready",
        FlightPhase::Playing => "Flying",
        FlightPhase::Finished(Landing::Surface) => "Landed",
        FlightPhase::Finished(Landing::OutOfBounds) => "Out of bounds",
    }
}
