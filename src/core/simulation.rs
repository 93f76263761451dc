//! Per-projectile flight state machine.
//!
//! `Idle -> Playing -> Finished`, with `Finished -> Playing` only through an
//! explicit relaunch. Pausing drops `Playing` back to `Idle` while keeping the
//! elapsed time, so a later launch resumes the same flight.

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::collision::is_colliding;
use crate::core::kinematics::advance;
use crate::core::launch::{
    EnvironmentConfig, ProjectileConfig, ProjectileId, resolve_initial_state, resolve_on_incline,
};
use crate::core::vector::Vector2;

/// Nominal duration of one tick at the 60 Hz driver rate.
pub const NOMINAL_TICK_S: f64 = 1.0 / 60.0;
/// Surface hits before this much flight time are ignored.
pub const GRACE_PERIOD_S: f64 = 0.1;
pub const FLOOR_LIMIT_Y: f64 = -10.0;
pub const MAX_HORIZONTAL_X: f64 = 500.0;
/// Only every Nth tick is appended to the path.
pub const PATH_DECIMATION: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    Surface,
    OutOfBounds,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlightPhase {
    #[default]
    Idle,
    Playing,
    Finished(Landing),
}

/// How an in-flight projectile reacts to config or environment edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchPolicy {
    /// Speed, launch angle and gravity are re-read every tick, so an edit
    /// reshapes the flight from its original launch point.
    #[default]
    Live,
    /// The launch velocity is captured once and edits only apply on the next
    /// launch. Gravity is still read live.
    FrozenAtLaunch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Skipped,
    Flying,
    Finished(Landing),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub time_s: f64,
    pub phase: FlightPhase,
    pub position: Vector2,
    pub start_position: Vector2,
    pub velocity: Vector2,
    pub path: Vec<Vector2>,
    pub policy: LaunchPolicy,
    launch_velocity: Vector2,
    launch_incline_deg: f64,
}

impl SimulationState {
    pub fn new(config: &ProjectileConfig, env: &EnvironmentConfig) -> Self {
        let initial = resolve_initial_state(config, env);
        Self {
            time_s: 0.0,
            phase: FlightPhase::Idle,
            position: initial.position,
            start_position: initial.position,
            velocity: initial.velocity,
            path: vec![initial.position],
            policy: LaunchPolicy::default(),
            launch_velocity: initial.velocity,
            launch_incline_deg: env.incline_angle_deg,
        }
    }

    pub fn with_policy(mut self, policy: LaunchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, FlightPhase::Playing)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, FlightPhase::Finished(_))
    }

    /// Incline angle the flight is measured against. Fixed at launch.
    pub fn launch_incline_deg(&self) -> f64 {
        self.launch_incline_deg
    }

    /// Back to a fresh Idle state at the current config's start position.
    pub fn reset(&mut self, config: &ProjectileConfig, env: &EnvironmentConfig) {
        self.clear(config, env);
        debug!(projectile = %config.id, "reset");
    }

    fn clear(&mut self, config: &ProjectileConfig, env: &EnvironmentConfig) {
        let policy = self.policy;
        *self = Self::new(config, env).with_policy(policy);
    }

    /// Starts (or resumes) the flight. A finished projectile is relaunched;
    /// a playing one is left alone.
    pub fn launch(&mut self, config: &ProjectileConfig, env: &EnvironmentConfig) {
        match self.phase {
            FlightPhase::Playing => {}
            FlightPhase::Finished(_) => self.relaunch(config, env),
            FlightPhase::Idle if self.time_s > 0.0 => {
                self.phase = FlightPhase::Playing;
                debug!(projectile = %config.id, time_s = self.time_s, "resumed");
            }
            FlightPhase::Idle => {
                self.capture_launch(config, env);
                self.phase = FlightPhase::Playing;
                debug!(projectile = %config.id, "launched");
            }
        }
    }

    /// Clears time and path, re-resolves the start from the current config
    /// and goes straight to Playing.
    pub fn relaunch(&mut self, config: &ProjectileConfig, env: &EnvironmentConfig) {
        self.clear(config, env);
        self.capture_launch(config, env);
        self.phase = FlightPhase::Playing;
        debug!(projectile = %config.id, "relaunched");
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            self.phase = FlightPhase::Idle;
        }
    }

    fn capture_launch(&mut self, config: &ProjectileConfig, env: &EnvironmentConfig) {
        let initial = resolve_initial_state(config, env);
        self.time_s = 0.0;
        self.position = initial.position;
        self.start_position = initial.position;
        self.velocity = initial.velocity;
        self.path.clear();
        self.path.push(initial.position);
        self.launch_velocity = initial.velocity;
        self.launch_incline_deg = env.incline_angle_deg;
    }

    /// Advances one tick of `NOMINAL_TICK_S * time_multiplier` seconds.
    pub fn tick(&mut self, config: &ProjectileConfig, env: &EnvironmentConfig) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Skipped;
        }

        let next_time = self.time_s + (NOMINAL_TICK_S * env.time_multiplier);
        let initial_velocity = match self.policy {
            LaunchPolicy::Live => resolve_on_incline(config, self.launch_incline_deg).velocity,
            LaunchPolicy::FrozenAtLaunch => self.launch_velocity,
        };
        let next = advance(next_time, env, self.start_position, initial_velocity);

        if is_colliding(next.position, self.launch_incline_deg) && next_time > GRACE_PERIOD_S {
            self.finish(Landing::Surface, next_time, next.position, Vector2::ZERO);
            info!(
                projectile = %config.id,
                time_s = next_time,
                x = next.position.x,
                y = next.position.y,
                "landed on incline"
            );
            return TickOutcome::Finished(Landing::Surface);
        }

        if next.position.y < FLOOR_LIMIT_Y || next.position.x > MAX_HORIZONTAL_X {
            self.finish(Landing::OutOfBounds, next_time, next.position, next.velocity);
            info!(
                projectile = %config.id,
                time_s = next_time,
                x = next.position.x,
                y = next.position.y,
                "left the simulation bounds"
            );
            return TickOutcome::Finished(Landing::OutOfBounds);
        }

        self.time_s = next_time;
        self.position = next.position;
        self.velocity = next.velocity;
        if is_path_sample(next_time) {
            self.path.push(next.position);
        }
        TickOutcome::Flying
    }

    fn finish(&mut self, landing: Landing, time_s: f64, position: Vector2, velocity: Vector2) {
        self.phase = FlightPhase::Finished(landing);
        self.time_s = time_s;
        self.position = position;
        self.velocity = velocity;
    }
}

fn is_path_sample(time_s: f64) -> bool {
    let tick_index = (time_s / NOMINAL_TICK_S).round() as u64;
    tick_index % PATH_DECIMATION == 0
}

/// A projectile as the orchestrator holds it: its config plus its state.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub config: ProjectileConfig,
    pub state: SimulationState,
}

impl Projectile {
    pub fn new(config: ProjectileConfig, env: &EnvironmentConfig) -> Self {
        let state = SimulationState::new(&config, env);
        Self { config, state }
    }

    pub fn with_policy(mut self, policy: LaunchPolicy) -> Self {
        self.state.policy = policy;
        self
    }

    pub fn id(&self) -> ProjectileId {
        self.config.id
    }

    /// Replaces the config wholesale. Anything not in flight is reset so its
    /// start position never goes stale; a flying projectile keeps going unless
    /// its start choice moved.
    pub fn replace_config(&mut self, config: ProjectileConfig, env: &EnvironmentConfig) {
        let start_moved = config.start != self.config.start;
        self.config = config;
        if !self.state.is_playing() || start_moved {
            self.state.reset(&self.config, env);
        }
    }

    pub fn launch(&mut self, env: &EnvironmentConfig) {
        self.state.launch(&self.config, env);
    }

    pub fn relaunch(&mut self, env: &EnvironmentConfig) {
        self.state.relaunch(&self.config, env);
    }

    pub fn reset(&mut self, env: &EnvironmentConfig) {
        self.state.reset(&self.config, env);
    }

    pub fn pause(&mut self) {
        if self.state.is_playing() {
            self.state.pause();
            debug!(projectile = %self.config.id, time_s = self.state.time_s, "paused");
        }
    }

    pub fn tick(&mut self, env: &EnvironmentConfig) -> TickOutcome {
        self.state.tick(&self.config, env)
    }
}

/// Ticks every projectile against the same environment snapshot. Each
/// projectile only reads its own prior state, so the order is irrelevant.
pub fn advance_all(projectiles: &mut [Projectile], env: EnvironmentConfig) -> Vec<TickOutcome> {
    projectiles.iter_mut().map(|p| p.tick(&env)).collect()
}
