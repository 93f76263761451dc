use incline_rust::core::report::FlightReport;
use incline_rust::core::{Vector2, predict};
use incline_rust::logging::init_tracing;
use macroquad::prelude::*;

use crate::constants::{
    BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN, MSAA_SAMPLES,
    RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::{apply_actions, step_simulation};
use crate::hud::draw_hud;
use crate::render::{
    draw_axis_tick_labels, draw_grid, draw_incline, draw_path, draw_projectile,
    draw_velocity_arrows, fit_frame, path_color,
};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Incline Launch Interactive".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    init_tracing();

    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            tracing::warn!(path = UI_FONT_PATH, error = %err, "falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new();

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        let left = LEFT_MARGIN;
        let right = screen_w - RIGHT_MARGIN;
        let top = TOP_MARGIN;
        let bottom = screen_h - BOTTOM_MARGIN;

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);
        step_simulation(&mut state, frame_dt);

        // Snapshot for everything drawn this frame.
        let env = state.environment;
        let previews: Vec<Vec<Vector2>> = state
            .projectiles
            .iter()
            .map(|p| {
                if env.show_prediction && !p.state.is_playing() {
                    predict(&p.config, &env)
                } else {
                    Vec::new()
                }
            })
            .collect();
        let report = FlightReport::from_prediction(&state.selected().config, &env);

        let frame = fit_frame(
            previews
                .iter()
                .flatten()
                .copied()
                .chain(state.projectiles.iter().flat_map(|p| {
                    p.state
                        .path
                        .iter()
                        .copied()
                        .chain(std::iter::once(p.state.position))
                })),
            env.incline_angle_deg,
            left,
            right,
            top,
            bottom,
        );

        clear_background(Color::from_rgba(250, 251, 253, 255));
        draw_grid(&frame, Color::from_rgba(227, 231, 236, 255));
        draw_line(left, bottom, right, bottom, 2.0, DARKGRAY);
        draw_line(left, top, left, bottom, 2.0, DARKGRAY);
        draw_axis_tick_labels(&frame, ui_font.as_ref());
        draw_incline(&frame, env.incline_angle_deg);

        for (p, preview) in state.projectiles.iter().zip(&previews) {
            draw_path(&frame, preview, 2.0, path_color(p.config.color, 120));
        }
        for p in &state.projectiles {
            let mut trace = p.state.path.clone();
            trace.push(p.state.position);
            draw_path(&frame, &trace, 3.0, path_color(p.config.color, 255));
        }
        for (idx, p) in state.projectiles.iter().enumerate() {
            draw_projectile(&frame, p, idx == state.selected);
        }
        draw_velocity_arrows(&frame, state.selected(), &env);

        draw_hud(&state, &report, left, screen_h, ui_font.as_ref());

        next_frame().await;
    }
}
