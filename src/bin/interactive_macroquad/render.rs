use incline_rust::core::window::ViewWindow;
use incline_rust::core::{EnvironmentConfig, INCLINE_LENGTH, Projectile, Vector2, decompose};
use macroquad::prelude::*;

use crate::constants::{
    ARROW_HEAD_PX, INCLINE_COLOR, PROJECTILE_RADIUS_PX, X_GRID_LINES, Y_GRID_LINES,
};

/// Maps world coordinates into the plot rectangle on screen.
#[derive(Clone, Copy)]
pub(crate) struct ScreenFrame {
    pub(crate) window: ViewWindow,
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
}

impl ScreenFrame {
    pub(crate) fn world_to_screen(&self, world: Vector2) -> Vec2 {
        let plot_w = (self.right - self.left).max(1.0);
        let plot_h = (self.bottom - self.top).max(1.0);
        let tx = ((world.x - self.window.min.x) / self.window.width().max(1e-9)) as f32;
        let ty = ((world.y - self.window.min.y) / self.window.height().max(1e-9)) as f32;
        vec2(self.left + tx * plot_w, self.bottom - ty * plot_h)
    }
}

fn format_axis_value(value: f64, span: f64) -> String {
    if span >= 1000.0 {
        format!("{value:.0}")
    } else if span >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(frame: &ScreenFrame, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = frame.left + t * (frame.right - frame.left);
        draw_line(x, frame.top, x, frame.bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = frame.bottom - t * (frame.bottom - frame.top);
        draw_line(frame.left, y, frame.right, y, 1.0, color);
    }
}

pub(crate) fn draw_axis_tick_labels(frame: &ScreenFrame, font: Option<&Font>) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;
    let window = frame.window;

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = frame.left + t * (frame.right - frame.left);
        let value = window.min.x + f64::from(t) * window.width();
        let label = format_axis_value(value, window.width());
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            frame.bottom + 22.0,
            tick_font_size,
            label_color,
            font,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = frame.bottom - t * (frame.bottom - frame.top);
        let value = window.min.y + f64::from(t) * window.height();
        let label = format_axis_value(value, window.height());
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (frame.left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            label_color,
            font,
        );
    }

    draw_ui_text(
        "Distance (m)",
        frame.right - 130.0,
        frame.bottom + 48.0,
        18,
        label_color,
        font,
    );
    draw_ui_text(
        "Height (m)",
        frame.left + 10.0,
        frame.top - 8.0,
        18,
        label_color,
        font,
    );
}

pub(crate) fn draw_incline(frame: &ScreenFrame, incline_deg: f64) {
    let theta = incline_deg.to_radians();
    let foot = frame.world_to_screen(Vector2::ZERO);
    let top = frame.world_to_screen(Vector2::new(theta.cos(), theta.sin()) * INCLINE_LENGTH);
    let base = frame.world_to_screen(Vector2::new(theta.cos() * INCLINE_LENGTH, 0.0));

    draw_triangle(foot, top, base, Color::new(0.95, 0.62, 0.02, 0.18));
    draw_line(foot.x, foot.y, top.x, top.y, 4.0, INCLINE_COLOR);
}

pub(crate) fn draw_path(frame: &ScreenFrame, points: &[Vector2], thickness: f32, color: Color) {
    if points.len() < 2 {
        return;
    }
    let mut prev = frame.world_to_screen(points[0]);
    for point in points.iter().skip(1).copied() {
        let cur = frame.world_to_screen(point);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

pub(crate) fn draw_projectile(frame: &ScreenFrame, projectile: &Projectile, selected: bool) {
    let p = frame.world_to_screen(projectile.state.position);
    draw_circle(p.x, p.y, PROJECTILE_RADIUS_PX, path_color(projectile.config.color, 255));
    let outline = if selected { BLACK } else { DARKGRAY };
    draw_circle_lines(
        p.x,
        p.y,
        PROJECTILE_RADIUS_PX + if selected { 3.0 } else { 0.0 },
        2.0,
        outline,
    );
}

fn draw_arrow(from: Vec2, delta_world_px: Vec2, thickness: f32, color: Color) {
    // World y points up, screen y points down.
    let delta = vec2(delta_world_px.x, -delta_world_px.y);
    if delta.length_squared() < 1.0 {
        return;
    }
    let tip = from + delta;
    draw_line(from.x, from.y, tip.x, tip.y, thickness, color);

    let dir = delta.normalize();
    let side = vec2(-dir.y, dir.x);
    let head = ARROW_HEAD_PX.min(delta.length() * 0.5);
    draw_triangle(
        tip,
        tip - dir * head + side * (head * 0.45),
        tip - dir * head - side * (head * 0.45),
        color,
    );
}

/// Velocity arrow plus its parallel/perpendicular parts relative to the
/// incline. Scales are pixels per m/s.
pub(crate) fn draw_velocity_arrows(
    frame: &ScreenFrame,
    projectile: &Projectile,
    env: &EnvironmentConfig,
) {
    let origin = frame.world_to_screen(projectile.state.position);
    let velocity = projectile.state.velocity;
    let to_px = |v: Vector2, scale: f64| vec2((v.x * scale) as f32, (v.y * scale) as f32);

    draw_arrow(
        origin,
        to_px(velocity, env.velocity_scale),
        2.5,
        Color::from_rgba(30, 30, 35, 255),
    );

    let parts = decompose(velocity, env.incline_angle_deg);
    draw_arrow(
        origin,
        to_px(parts.parallel.vector, env.component_scale),
        2.0,
        Color::from_rgba(37, 99, 235, 220),
    );
    draw_arrow(
        origin,
        to_px(parts.perpendicular.vector, env.component_scale),
        2.0,
        Color::from_rgba(22, 163, 74, 220),
    );
}

pub(crate) fn path_color(color: [u8; 3], alpha: u8) -> Color {
    Color::from_rgba(color[0], color[1], color[2], alpha)
}

pub(crate) fn fit_frame(
    points: impl IntoIterator<Item = Vector2>,
    incline_deg: f64,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
) -> ScreenFrame {
    let mut window = ViewWindow::fit(points, incline_deg);
    let plot_ratio = f64::from((right - left).max(1.0) / (bottom - top).max(1.0));
    // Match the screen aspect so one metre is as wide as it is tall.
    let data_ratio = window.width() / window.height();
    if data_ratio < plot_ratio {
        let extra = (window.height() * plot_ratio - window.width()) * 0.5;
        window.min.x -= extra;
        window.max.x += extra;
    } else {
        let extra = (window.width() / plot_ratio - window.height()) * 0.5;
        window.min.y -= extra;
        window.max.y += extra;
    }
    ScreenFrame {
        window,
        left,
        right,
        top,
        bottom,
    }
}
