use approx::assert_abs_diff_eq;
use incline_rust::config::{ConfigError, Scenario};
use incline_rust::core::simulation::FLOOR_LIMIT_Y;
use incline_rust::core::{
    EnvironmentConfig, FlightPhase, Landing, Projectile, ProjectileConfig, StartPosition,
    TickOutcome, Vector2, advance, advance_all, decompose, is_colliding, predict,
    resolve_initial_state,
};

const MAX_TICKS: usize = 10_000;

fn run_to_end(projectiles: &mut [Projectile], env: EnvironmentConfig) -> usize {
    for tick in 0..MAX_TICKS {
        let outcomes = advance_all(projectiles, env);
        if outcomes.iter().all(|o| *o != TickOutcome::Flying) {
            return tick + 1;
        }
    }
    panic!("flight did not end within {MAX_TICKS} ticks");
}

#[test]
fn advance_follows_constant_gravity() {
    let env = EnvironmentConfig::default();
    let p0 = Vector2::new(3.0, -2.0);
    let v0 = Vector2::new(7.5, 12.0);

    for step in 0..=40 {
        let t = f64::from(step) * 0.25;
        let state = advance(t, &env, p0, v0);
        assert_eq!(state.position.x, p0.x + v0.x * t);
        assert_abs_diff_eq!(
            state.position.y,
            p0.y + v0.y * t - 0.5 * env.gravity_mps2 * t * t,
            epsilon = 1e-9
        );
        assert_eq!(state, advance(t, &env, p0, v0));
    }
}

#[test]
fn decomposition_recomposes_for_every_valid_incline() {
    let vectors = [
        Vector2::new(6.47, 24.15),
        Vector2::new(-13.0, 4.0),
        Vector2::new(0.0, -9.81),
    ];
    for incline in 0..=80 {
        for v in vectors {
            let back = decompose(v, f64::from(incline)).recompose();
            assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-9);
        }
    }
}

#[test]
fn flat_incline_collision_band() {
    for x in -5..=120 {
        let x = f64::from(x);
        assert!(is_colliding(Vector2::new(x, 0.0), 0.0), "x = {x}");
        assert!(!is_colliding(Vector2::new(x, 1.0), 0.0), "x = {x}");
    }
}

#[test]
fn default_launch_resolves_to_expected_vectors() {
    let env = EnvironmentConfig::default();
    let config = ProjectileConfig::default();
    let initial = resolve_initial_state(&config, &env);

    assert_eq!(initial.position, Vector2::ZERO);
    assert_abs_diff_eq!(initial.velocity.x, 6.47, epsilon = 0.01);
    assert_abs_diff_eq!(initial.velocity.y, 24.15, epsilon = 0.01);

    let top = ProjectileConfig {
        start: StartPosition::Top,
        ..ProjectileConfig::default()
    };
    let initial = resolve_initial_state(&top, &env);
    assert_abs_diff_eq!(initial.position.x, 86.6, epsilon = 0.01);
    assert_abs_diff_eq!(initial.position.y, 50.0, epsilon = 1e-9);
}

#[test]
fn prediction_ends_on_surface_or_below_floor() {
    let env = EnvironmentConfig::default();
    let points = predict(&ProjectileConfig::default(), &env);

    assert!(points.len() > 2);
    assert!(points.len() < 401);
    let last = points[points.len() - 1];
    assert!(is_colliding(last, env.incline_angle_deg) || last.y < FLOOR_LIMIT_Y);
}

#[test]
fn relaunch_after_landing_starts_from_current_config() {
    let env = EnvironmentConfig::default();
    let mut projectile = Projectile::new(ProjectileConfig::default(), &env);
    projectile.launch(&env);
    run_to_end(std::slice::from_mut(&mut projectile), env);
    assert_eq!(projectile.state.phase, FlightPhase::Finished(Landing::Surface));
    assert_eq!(projectile.state.velocity, Vector2::ZERO);

    projectile.config.speed_mps = 30.0;
    projectile.config.start = StartPosition::Top;
    projectile.relaunch(&env);

    let expected = resolve_initial_state(&projectile.config, &env);
    assert_eq!(projectile.state.phase, FlightPhase::Playing);
    assert_eq!(projectile.state.time_s, 0.0);
    assert_eq!(projectile.state.position, expected.position);
    assert_eq!(projectile.state.velocity, expected.velocity);
    assert_eq!(projectile.state.path, vec![expected.position]);
}

#[test]
fn scenario_file_drives_independent_projectiles() {
    let scenario = Scenario::from_toml_str(
        r#"
        [environment]
        incline_angle_deg = 10.0

        [[projectiles]]
        name = "A"

        [[projectiles]]
        name = "B"
        speed_mps = 40.0
        launch_angle_deg = 170.0
        "#,
    )
    .expect("scenario parses");
    let env = scenario.environment;

    let mut projectiles: Vec<Projectile> = scenario
        .projectiles
        .iter()
        .cloned()
        .map(|config| Projectile::new(config, &env))
        .collect();
    for p in &mut projectiles {
        p.launch(&env);
    }
    run_to_end(&mut projectiles, env);

    assert_eq!(
        projectiles[0].state.phase,
        FlightPhase::Finished(Landing::Surface)
    );
    assert_eq!(
        projectiles[1].state.phase,
        FlightPhase::Finished(Landing::OutOfBounds)
    );

    // Flying alone gives the same result as flying alongside B.
    let mut alone = Projectile::new(scenario.projectiles[0].clone(), &env);
    alone.launch(&env);
    run_to_end(std::slice::from_mut(&mut alone), env);
    assert_eq!(alone.state, projectiles[0].state);
}

#[test]
fn scenario_rejects_steep_incline() {
    let err = Scenario::from_toml_str("[environment]\nincline_angle_deg = 85.0\n")
        .expect_err("incline above range");
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
}
