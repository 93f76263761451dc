use incline_rust::core::collision::surface_offsets;
use incline_rust::core::report::{FlightReport, PredictedEnd};
use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, TITLE_Y};
use crate::controls::phase_text;
use crate::render::{draw_ui_text, path_color};
use crate::state::AppRuntime;

pub(crate) fn draw_hud(
    state: &AppRuntime,
    report: &FlightReport,
    left: f32,
    screen_h: f32,
    font: Option<&Font>,
) {
    draw_header_block(state, left, font);
    draw_projectile_rows(state, left, font);
    draw_status_block(state, report, left, screen_h, font);
}

const CONTROLS_HINT: &str = "Controls: Space launch/pause | L launch all | Enter relaunch | \
    R reset | N add | Del remove | Tab next";

fn draw_header_block(state: &AppRuntime, left: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    draw_ui_text(
        "Incline Launch - Interactive",
        left,
        TITLE_Y,
        30,
        header_color,
        font,
    );
    let env = &state.environment;
    draw_ui_text(
        &format!(
            "Incline {:.1} deg | g = {:.2} m/s^2 | Speed x{:.2}",
            env.incline_angle_deg, env.gravity_mps2, env.time_multiplier
        ),
        left,
        TITLE_Y + 30.0,
        22,
        DARKGRAY,
        font,
    );
    draw_ui_text(CONTROLS_HINT, left + 12.0, CONTROLS_Y, 20, DARKGRAY, font);
}

fn draw_projectile_rows(state: &AppRuntime, left: f32, font: Option<&Font>) {
    for (idx, p) in state.projectiles.iter().enumerate() {
        // Measured against the incline the flight was launched on.
        let (along, above) = surface_offsets(p.state.position, p.state.launch_incline_deg());
        let marker = if idx == state.selected { ">" } else { " " };
        draw_ui_text(
            &format!(
                "{marker} {:<4} {:<13} t {:>6.2} s | v {:>6.2} m/s | along {:>7.2} m | \
                 above {:>6.2} m",
                p.config.name,
                phase_text(p.state.phase, p.state.time_s),
                p.state.time_s,
                p.state.velocity.length(),
                along,
                above
            ),
            left + 12.0,
            CONTROLS_Y + 26.0 + idx as f32 * 18.0,
            16,
            path_color(p.config.color, 255),
            font,
        );
    }
}

fn draw_status_block(
    state: &AppRuntime,
    report: &FlightReport,
    left: f32,
    screen_h: f32,
    font: Option<&Font>,
) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    let selected = state.selected();
    let c = &report.launch_components;

    draw_ui_text(
        &format!(
            "{}: speed {:.1} m/s | launch angle {:.1} deg | global {:.1} deg | start {}",
            selected.config.name,
            selected.config.speed_mps,
            selected.config.launch_angle_deg,
            selected.config.global_angle_deg(&state.environment),
            selected.config.start.label()
        ),
        left,
        screen_h - 76.0,
        22,
        header_color,
        font,
    );
    let end = match report.end {
        PredictedEnd::Surface => format!(
            "lands {:.2} m up the slope",
            report.distance_along_incline
        ),
        PredictedEnd::BelowFloor => "falls off the incline".to_string(),
        PredictedEnd::Horizon => "still flying at horizon".to_string(),
    };
    draw_ui_text(
        &format!(
            "Prediction -> {end}, flight {:.2} s, apex {:.2} m | v|| {:.2} m/s, v_perp {:.2} m/s",
            report.flight_time_s,
            report.apex_height,
            c.parallel.magnitude,
            c.perpendicular.magnitude
        ),
        left,
        screen_h - 45.0,
        18,
        DARKGRAY,
        font,
    );
    draw_ui_text(&state.status_line, left, screen_h - 14.0, 20, BLUE, font);
}
