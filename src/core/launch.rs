use serde::Deserialize;

use crate::core::INCLINE_LENGTH;
use crate::core::angles::unit_at;
use crate::core::kinematics::KinematicState;
use crate::core::vector::Vector2;

pub const DEFAULT_GRAVITY_MPS2: f64 = 9.81;

/// Shared environment. The orchestrator owns the mutable copy and hands the
/// core a snapshot by value on every call.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Degrees, valid range [0, 80].
    pub incline_angle_deg: f64,
    pub gravity_mps2: f64,
    /// Pixels per m/s when drawing velocity arrows.
    pub velocity_scale: f64,
    /// Pixels per m/s when drawing parallel/perpendicular arrows.
    pub component_scale: f64,
    pub time_multiplier: f64,
    pub show_prediction: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            incline_angle_deg: 30.0,
            gravity_mps2: DEFAULT_GRAVITY_MPS2,
            velocity_scale: 2.0,
            component_scale: 2.0,
            time_multiplier: 1.0,
            show_prediction: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProjectileId(pub u64);

impl std::fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartPosition {
    /// Foot of the incline, at the origin.
    #[default]
    Bottom,
    /// Far end of the incline segment.
    Top,
}

impl StartPosition {
    pub fn toggled(self) -> Self {
        match self {
            Self::Bottom => Self::Top,
            Self::Top => Self::Bottom,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    #[serde(skip)]
    pub id: ProjectileId,
    pub name: String,
    pub color: [u8; 3],
    pub speed_mps: f64,
    /// Measured from the incline surface, not from the horizontal.
    pub launch_angle_deg: f64,
    pub start: StartPosition,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            id: ProjectileId::default(),
            name: "Projectile".to_string(),
            color: [230, 57, 70],
            speed_mps: 25.0,
            launch_angle_deg: 45.0,
            start: StartPosition::Bottom,
        }
    }
}

impl ProjectileConfig {
    pub fn global_angle_deg(&self, env: &EnvironmentConfig) -> f64 {
        global_angle_deg(env.incline_angle_deg, self.launch_angle_deg)
    }
}

pub fn global_angle_deg(incline_deg: f64, launch_angle_deg: f64) -> f64 {
    incline_deg + launch_angle_deg
}

pub fn start_position(start: StartPosition, incline_deg: f64) -> Vector2 {
    match start {
        StartPosition::Bottom => Vector2::ZERO,
        StartPosition::Top => Vector2::from(unit_at(incline_deg)) * INCLINE_LENGTH,
    }
}

pub fn launch_velocity(speed_mps: f64, global_angle_deg: f64) -> Vector2 {
    Vector2::from(unit_at(global_angle_deg)) * speed_mps
}

/// Start position and velocity in global coordinates.
///
/// No validation happens here: a negative speed or an out-of-range angle
/// simply yields the corresponding degenerate vectors.
pub fn resolve_initial_state(config: &ProjectileConfig, env: &EnvironmentConfig) -> KinematicState {
    resolve_on_incline(config, env.incline_angle_deg)
}

/// Same as [`resolve_initial_state`] but against an explicit incline angle,
/// used for projectiles whose incline was captured at launch.
pub fn resolve_on_incline(config: &ProjectileConfig, incline_deg: f64) -> KinematicState {
    KinematicState {
        position: start_position(config.start, incline_deg),
        velocity: launch_velocity(
            config.speed_mps,
            global_angle_deg(incline_deg, config.launch_angle_deg),
        ),
    }
}
