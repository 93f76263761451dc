use incline_rust::config::Scenario;
use incline_rust::core::{
    EnvironmentConfig, LaunchPolicy, Projectile, ProjectileConfig, ProjectileId,
};
use tracing::{info, warn};

use crate::constants::PALETTE;

pub(crate) struct AppRuntime {
    pub(crate) environment: EnvironmentConfig,
    pub(crate) policy: LaunchPolicy,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) selected: usize,
    pub(crate) next_id: u64,
    pub(crate) tick_accumulator_s: f32,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let scenario = match Scenario::from_env() {
            Some(Ok(scenario)) => {
                info!(projectiles = scenario.projectiles.len(), "loaded scenario");
                scenario
            }
            Some(Err(err)) => {
                warn!(error = %err, "ignoring scenario, using defaults");
                Scenario::default()
            }
            None => Scenario::default(),
        };

        let mut state = Self {
            environment: scenario.environment,
            policy: scenario.policy,
            projectiles: Vec::new(),
            selected: 0,
            next_id: 0,
            tick_accumulator_s: 0.0,
            status_line: "Ready".to_string(),
        };
        for config in scenario.projectiles {
            state.push_projectile(config);
        }
        if state.projectiles.is_empty() {
            state.add_projectile();
        }
        state
    }

    pub(crate) fn selected(&self) -> &Projectile {
        &self.projectiles[self.selected]
    }

    pub(crate) fn selected_mut(&mut self) -> &mut Projectile {
        &mut self.projectiles[self.selected]
    }

    fn push_projectile(&mut self, mut config: ProjectileConfig) {
        config.id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.projectiles
            .push(Projectile::new(config, &self.environment).with_policy(self.policy));
        self.selected = self.projectiles.len() - 1;
    }

    pub(crate) fn add_projectile(&mut self) {
        let n = self.next_id as usize;
        let config = ProjectileConfig {
            name: format!("P{}", n + 1),
            color: PALETTE[n % PALETTE.len()],
            ..Default::default()
        };
        self.push_projectile(config);
        self.status_line = format!("Added {}", self.selected().config.name);
    }

    pub(crate) fn remove_selected(&mut self) {
        if self.projectiles.len() <= 1 {
            self.status_line = "Keep at least one projectile".to_string();
            return;
        }
        let removed = self.projectiles.remove(self.selected);
        self.selected = self.selected.min(self.projectiles.len() - 1);
        self.status_line = format!("Removed {}", removed.config.name);
    }

    pub(crate) fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.projectiles.len();
    }

    /// Applies an edited environment. Anything not in flight is reset when
    /// the incline or gravity moved, so its start never goes stale.
    pub(crate) fn set_environment(&mut self, env: EnvironmentConfig) {
        let physics_changed = env.incline_angle_deg != self.environment.incline_angle_deg
            || env.gravity_mps2 != self.environment.gravity_mps2;
        self.environment = env;
        if !physics_changed {
            return;
        }
        for p in self.projectiles.iter_mut() {
            if !p.state.is_playing() {
                p.reset(&env);
            }
        }
    }

    pub(crate) fn replace_selected_config(&mut self, config: ProjectileConfig) {
        if config == self.selected().config {
            return;
        }
        let env = self.environment;
        self.selected_mut().replace_config(config, &env);
    }
}
