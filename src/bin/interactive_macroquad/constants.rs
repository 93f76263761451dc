use std::ops::Range;

use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1920;
pub const INITIAL_WINDOW_HEIGHT: i32 = 1080;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 420.0;
pub const RIGHT_MARGIN: f32 = 30.0;
pub const TOP_MARGIN: f32 = 140.0;
pub const BOTTOM_MARGIN: f32 = 150.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 92.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

// Ticks run at the core's nominal rate; cap catch-up after a long frame.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

pub const PROJECTILE_RADIUS_PX: f32 = 7.0;
pub const ARROW_HEAD_PX: f32 = 10.0;
pub const INCLINE_COLOR: Color = Color::new(0.95, 0.62, 0.02, 1.0);

pub const INCLINE_SLIDER: Range<f32> = 0.0..80.0;
pub const GRAVITY_SLIDER: Range<f32> = 0.5..30.0;
pub const TIME_MULTIPLIER_SLIDER: Range<f32> = 0.1..5.0;
pub const ARROW_SCALE_SLIDER: Range<f32> = 0.2..10.0;
pub const SPEED_SLIDER: Range<f32> = 0.0..100.0;
pub const LAUNCH_ANGLE_SLIDER: Range<f32> = -90.0..90.0;

pub const PALETTE: [[u8; 3]; 6] = [
    [230, 57, 70],
    [29, 78, 216],
    [22, 163, 74],
    [147, 51, 234],
    [234, 88, 12],
    [8, 145, 178],
];
