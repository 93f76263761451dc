//! Scenario files: the environment plus a list of projectiles, loaded from TOML.
//!
//! This is the input layer in front of the core, so all validation lives here.
//! The core itself accepts any number and lets NaN propagate.
//!
//! ```toml
//! policy = "live" # or "frozen_at_launch"
//!
//! [environment]
//! incline_angle_deg = 30.0
//! gravity_mps2 = 9.81
//!
//! [[projectiles]]
//! name = "A"
//! speed_mps = 25.0
//! launch_angle_deg = 45.0
//! start = "bottom"
//! ```

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::core::{EnvironmentConfig, LaunchPolicy, Projectile, ProjectileConfig, ProjectileId};

pub const SCENARIO_ENV_VAR: &str = "INCLINE_SCENARIO";

pub const INCLINE_RANGE_DEG: RangeInclusive<f64> = 0.0..=80.0;
pub const LAUNCH_ANGLE_RANGE_DEG: RangeInclusive<f64> = -90.0..=90.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read scenario '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} = {value} must be positive")]
    NotPositive { field: String, value: f64 },
    #[error("no projectile with id {0}")]
    UnknownProjectile(ProjectileId),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Applied to every projectile built from this scenario.
    pub policy: LaunchPolicy,
    pub environment: EnvironmentConfig,
    pub projectiles: Vec<ProjectileConfig>,
}

impl Scenario {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut scenario: Self = toml::from_str(text)?;
        scenario.assign_ids();
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads the file named by `INCLINE_SCENARIO`, if the variable is set.
    pub fn from_env() -> Option<Result<Self, ConfigError>> {
        std::env::var_os(SCENARIO_ENV_VAR).map(|path| Self::load(Path::new(&path)))
    }

    pub fn projectile(&self, id: ProjectileId) -> Result<&ProjectileConfig, ConfigError> {
        self.projectiles
            .iter()
            .find(|p| p.id == id)
            .ok_or(ConfigError::UnknownProjectile(id))
    }

    /// Idle projectiles for every config, carrying the scenario's policy.
    pub fn build_projectiles(&self) -> Vec<Projectile> {
        self.projectiles
            .iter()
            .cloned()
            .map(|config| Projectile::new(config, &self.environment).with_policy(self.policy))
            .collect()
    }

    /// Keeps only the projectile with `id`.
    pub fn retain_projectile(&mut self, id: ProjectileId) -> Result<(), ConfigError> {
        let config = self.projectile(id)?.clone();
        self.projectiles = vec![config];
        Ok(())
    }

    fn assign_ids(&mut self) {
        for (idx, projectile) in self.projectiles.iter_mut().enumerate() {
            projectile.id = ProjectileId(idx as u64);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_environment(&self.environment)?;
        for projectile in &self.projectiles {
            validate_projectile(projectile)?;
        }
        Ok(())
    }
}

pub fn validate_environment(env: &EnvironmentConfig) -> Result<(), ConfigError> {
    in_range("environment.incline_angle_deg", env.incline_angle_deg, &INCLINE_RANGE_DEG)?;
    positive("environment.gravity_mps2", env.gravity_mps2)?;
    positive("environment.time_multiplier", env.time_multiplier)?;
    finite("environment.velocity_scale", env.velocity_scale)?;
    finite("environment.component_scale", env.component_scale)?;
    Ok(())
}

pub fn validate_projectile(config: &ProjectileConfig) -> Result<(), ConfigError> {
    let field = |name: &str| format!("projectiles[{}].{name}", config.name);

    finite(&field("speed_mps"), config.speed_mps)?;
    if config.speed_mps < 0.0 {
        return Err(ConfigError::OutOfRange {
            field: field("speed_mps"),
            value: config.speed_mps,
            min: 0.0,
            max: f64::INFINITY,
        });
    }

    finite(&field("launch_angle_deg"), config.launch_angle_deg)?;
    if !LAUNCH_ANGLE_RANGE_DEG.contains(&config.launch_angle_deg) {
        warn!(
            projectile = %config.name,
            launch_angle_deg = config.launch_angle_deg,
            "launch angle outside the usual -90..=90 range"
        );
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            field: field.to_string(),
        })
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}

fn in_range(field: &str, value: f64, range: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    finite(field, value)?;
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Scenario};
    use crate::core::{LaunchPolicy, ProjectileId, StartPosition};

    #[test]
    fn parses_full_scenario() {
        let scenario = Scenario::from_toml_str(
            r#"
            [environment]
            incline_angle_deg = 20.0
            gravity_mps2 = 1.62
            time_multiplier = 2.0

            [[projectiles]]
            name = "A"
            speed_mps = 25.0
            launch_angle_deg = 45.0

            [[projectiles]]
            name = "B"
            start = "top"
            color = [10, 20, 30]
            "#,
        )
        .expect("scenario should parse");

        assert_eq!(scenario.environment.incline_angle_deg, 20.0);
        assert_eq!(scenario.environment.gravity_mps2, 1.62);
        assert!(scenario.environment.show_prediction);
        assert_eq!(scenario.projectiles.len(), 2);
        assert_eq!(scenario.projectiles[1].start, StartPosition::Top);
        assert_eq!(scenario.projectiles[1].color, [10, 20, 30]);

        let b = scenario.projectile(ProjectileId(1)).expect("second id");
        assert_eq!(b.name, "B");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let scenario = Scenario::from_toml_str("").expect("defaults are valid");
        assert_eq!(scenario.environment.incline_angle_deg, 30.0);
        assert!(scenario.projectiles.is_empty());
    }

    #[test]
    fn rejects_steep_incline() {
        let err = Scenario::from_toml_str("[environment]\nincline_angle_deg = 85.0\n")
            .expect_err("85 degrees is too steep");
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
        assert!(err.to_string().contains("incline_angle_deg"));
    }

    #[test]
    fn rejects_nan_and_negative_speed() {
        let err = Scenario::from_toml_str("[[projectiles]]\nspeed_mps = nan\n")
            .expect_err("NaN speed");
        assert!(matches!(err, ConfigError::NotFinite { .. }));

        let err = Scenario::from_toml_str("[[projectiles]]\nspeed_mps = -1.0\n")
            .expect_err("negative speed");
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn rejects_zero_gravity() {
        let err = Scenario::from_toml_str("[environment]\ngravity_mps2 = 0.0\n")
            .expect_err("gravity must be positive");
        assert!(matches!(err, ConfigError::NotPositive { .. }));
    }

    #[test]
    fn unknown_start_is_a_parse_error() {
        let err = Scenario::from_toml_str("[[projectiles]]\nstart = \"middle\"\n")
            .expect_err("bad start");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_projectile_lookup_fails() {
        let scenario = Scenario::default();
        assert!(matches!(
            scenario.projectile(ProjectileId(7)),
            Err(ConfigError::UnknownProjectile(ProjectileId(7)))
        ));
    }

    #[test]
    fn policy_reaches_built_projectiles() {
        let scenario = Scenario::from_toml_str(
            r#"
            policy = "frozen_at_launch"

            [[projectiles]]
            name = "A"

            [[projectiles]]
            name = "B"
            "#,
        )
        .expect("scenario should parse");
        assert_eq!(scenario.policy, LaunchPolicy::FrozenAtLaunch);

        let projectiles = scenario.build_projectiles();
        assert_eq!(projectiles.len(), 2);
        assert!(
            projectiles
                .iter()
                .all(|p| p.state.policy == LaunchPolicy::FrozenAtLaunch)
        );
        assert_eq!(projectiles[1].id(), ProjectileId(1));

        let default = Scenario::from_toml_str("").expect("defaults are valid");
        assert_eq!(default.policy, LaunchPolicy::Live);
    }

    #[test]
    fn retain_projectile_keeps_one_or_reports_unknown_id() {
        let text = "[[projectiles]]\nname = \"A\"\n\n[[projectiles]]\nname = \"B\"\n";
        let mut scenario = Scenario::from_toml_str(text).expect("scenario should parse");
        scenario
            .retain_projectile(ProjectileId(1))
            .expect("id 1 exists");
        assert_eq!(scenario.projectiles.len(), 1);
        assert_eq!(scenario.projectiles[0].name, "B");

        let err = scenario
            .retain_projectile(ProjectileId(7))
            .expect_err("id 7 is unknown");
        assert!(matches!(err, ConfigError::UnknownProjectile(ProjectileId(7))));
    }
}
