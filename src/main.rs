use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;

use incline_rust::config::{Scenario, validate_environment, validate_projectile};
use incline_rust::core::report::{FlightReport, PredictedEnd};
use incline_rust::core::{
    EnvironmentConfig, FlightPhase, Landing, LaunchPolicy, Projectile, ProjectileConfig,
    ProjectileId, StartPosition, TickOutcome, advance_all,
};
use incline_rust::logging::init_tracing;
use incline_rust::plot::{PlotSeries, default_plot_path, render_prediction_png};

/// Upper bound on ticks when running flights to completion.
const MAX_TICKS: usize = 100_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StartArg {
    Bottom,
    Top,
}

impl From<StartArg> for StartPosition {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::Bottom => StartPosition::Bottom,
            StartArg::Top => StartPosition::Top,
        }
    }
}

/// Predict where projectiles launched from an incline come down.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Incline angle in degrees (0..=80)
    #[arg(long, default_value_t = 30.0, allow_hyphen_values = true)]
    incline: f64,
    /// Gravity in m/s^2
    #[arg(long, default_value_t = 9.81)]
    gravity: f64,
    /// Launch speed in m/s
    #[arg(long, default_value_t = 25.0)]
    speed: f64,
    /// Launch angle in degrees, measured from the incline surface
    #[arg(long, default_value_t = 45.0, allow_hyphen_values = true)]
    beta: f64,
    #[arg(long, value_enum, default_value_t = StartArg::Bottom)]
    start: StartArg,
    /// Simulation speed multiplier used with --ticks
    #[arg(long, default_value_t = 1.0)]
    multiplier: f64,
    /// TOML scenario file; replaces the single-projectile flags
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Render a PNG chart (timestamped name when no path is given)
    #[arg(long, num_args = 0..=1)]
    plot: Option<Option<PathBuf>>,
    /// Also run the tick state machine until every flight ends
    #[arg(long)]
    ticks: bool,
    /// Keep each flight's launch velocity even if its config is edited
    #[arg(long)]
    freeze_at_launch: bool,
    /// Only report the scenario projectile with this id (file order from 0)
    #[arg(long, requires = "scenario")]
    projectile: Option<u64>,
}

impl Args {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = self.base_scenario()?;
        if self.freeze_at_launch {
            scenario.policy = LaunchPolicy::FrozenAtLaunch;
        }
        if let Some(id) = self.projectile {
            scenario.retain_projectile(ProjectileId(id))?;
        }
        Ok(scenario)
    }

    fn base_scenario(&self) -> Result<Scenario> {
        if let Some(path) = &self.scenario {
            return Scenario::load(path).with_context(|| format!("loading {}", path.display()));
        }

        let environment = EnvironmentConfig {
            incline_angle_deg: self.incline,
            gravity_mps2: self.gravity,
            time_multiplier: self.multiplier,
            ..Default::default()
        };
        let projectile = ProjectileConfig {
            name: "cli".to_string(),
            speed_mps: self.speed,
            launch_angle_deg: self.beta,
            start: self.start.into(),
            ..Default::default()
        };
        validate_environment(&environment)?;
        validate_projectile(&projectile)?;
        Ok(Scenario {
            policy: LaunchPolicy::default(),
            environment,
            projectiles: vec![projectile],
        })
    }
}

fn end_text(end: PredictedEnd) -> &'static str {
    match end {
        PredictedEnd::Surface => "lands on incline",
        PredictedEnd::BelowFloor => "falls below floor",
        PredictedEnd::Horizon => "still flying at horizon",
    }
}

fn phase_text(phase: FlightPhase) -> &'static str {
    match phase {
        FlightPhase::Idle => "idle",
        FlightPhase::Playing => "flying",
        FlightPhase::Finished(Landing::Surface) => "landed",
        FlightPhase::Finished(Landing::OutOfBounds) => "out of bounds",
    }
}

fn print_report(config: &ProjectileConfig, env: &EnvironmentConfig, report: &FlightReport) {
    let c = &report.launch_components;
    println!("\n{} {} (start: {})", config.id, config.name, config.start.label());
    println!(
        "  Launch velocity:   ({:.3}, {:.3}) m/s at {:.1} deg global",
        report.launch_velocity.x,
        report.launch_velocity.y,
        config.global_angle_deg(env)
    );
    println!(
        "  Along incline:     {:.3} m/s | Perpendicular: {:.3} m/s",
        c.parallel.magnitude, c.perpendicular.magnitude
    );
    println!(
        "  Predicted end:     {} at ({:.3}, {:.3}) after {:.2} s",
        end_text(report.end),
        report.final_point.x,
        report.final_point.y,
        report.flight_time_s
    );
    if report.end == PredictedEnd::Surface {
        println!(
            "  Distance up slope: {:.3} m",
            report.distance_along_incline
        );
    }
    println!("  Apex height:       {:.3} m", report.apex_height);
}

fn run_ticks(projectiles: &mut [Projectile], env: EnvironmentConfig) -> usize {
    for p in projectiles.iter_mut() {
        p.launch(&env);
    }
    for tick in 1..=MAX_TICKS {
        let outcomes = advance_all(projectiles, env);
        if outcomes.iter().all(|o| *o != TickOutcome::Flying) {
            return tick;
        }
    }
    MAX_TICKS
}

fn run() -> Result<()> {
    let args = Args::parse();
    let scenario = args.scenario()?;
    let env = scenario.environment;
    if scenario.projectiles.is_empty() {
        return Err(anyhow!("scenario has no projectiles"));
    }

    let reports: Vec<FlightReport> = scenario
        .projectiles
        .iter()
        .map(|config| FlightReport::from_prediction(config, &env))
        .collect();
    println!(
        "Incline {:.1} deg | g = {:.2} m/s^2 | {} projectile(s)",
        env.incline_angle_deg,
        env.gravity_mps2,
        reports.len()
    );
    for (config, report) in scenario.projectiles.iter().zip(&reports) {
        print_report(config, &env, report);
    }

    let mut flown: Vec<Projectile> = Vec::new();
    if args.ticks {
        flown = scenario.build_projectiles();
        let ticks = run_ticks(&mut flown, env);
        info!(ticks, "tick simulation finished");
        println!("\nTick simulation ({ticks} ticks at x{:.2}):", env.time_multiplier);
        for p in &flown {
            println!(
                "  {} {}: {} at ({:.3}, {:.3}) t = {:.3} s, {} path samples",
                p.id(),
                p.config.name,
                phase_text(p.state.phase),
                p.state.position.x,
                p.state.position.y,
                p.state.time_s,
                p.state.path.len()
            );
        }
    }

    if let Some(plot) = &args.plot {
        let path = plot.clone().unwrap_or_else(default_plot_path);
        let series: Vec<PlotSeries<'_>> = scenario
            .projectiles
            .iter()
            .zip(&reports)
            .enumerate()
            .map(|(idx, (config, report))| PlotSeries {
                label: &config.name,
                color: config.color,
                predicted: &report.points,
                flown: flown.get(idx).map(|p| p.state.path.as_slice()),
            })
            .collect();
        render_prediction_png(&path, env.incline_angle_deg, &series)
            .map_err(|e| anyhow!("failed to render {}: {e}", path.display()))?;
        println!("\nPlot written to {}", path.display());
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        eprintln!("Run with --help for usage.");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use incline_rust::core::{LaunchPolicy, Projectile, StartPosition};

    use super::{Args, run_ticks};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn flags_build_a_single_projectile_scenario() {
        let args = Args::try_parse_from([
            "incline_rust",
            "--incline",
            "20",
            "--beta",
            "-10",
            "--start",
            "top",
        ])
        .expect("flags should parse");
        let scenario = args.scenario().expect("flags are in range");

        assert_close(scenario.environment.incline_angle_deg, 20.0, 1e-12);
        assert_eq!(scenario.projectiles.len(), 1);
        assert_close(scenario.projectiles[0].launch_angle_deg, -10.0, 1e-12);
        assert_eq!(scenario.projectiles[0].start, StartPosition::Top);
        assert!(args.plot.is_none());
    }

    #[test]
    fn out_of_range_incline_is_rejected() {
        let args = Args::try_parse_from(["incline_rust", "--incline", "95"])
            .expect("flags should parse");
        assert!(args.scenario().is_err());
    }

    #[test]
    fn plot_flag_without_path_uses_default_name() {
        let args = Args::try_parse_from(["incline_rust", "--plot"]).expect("flags should parse");
        assert_eq!(args.plot, Some(None));
    }

    #[test]
    fn ticks_run_until_the_default_flight_lands() {
        let args = Args::try_parse_from(["incline_rust"]).expect("flags should parse");
        let scenario = args.scenario().expect("defaults are valid");
        let env = scenario.environment;
        let mut flown: Vec<Projectile> = scenario.build_projectiles();

        let ticks = run_ticks(&mut flown, env);
        assert!(ticks < 300, "ticks={ticks}");
        assert!(flown[0].state.is_finished());
        assert_close(flown[0].state.time_s, 4.13, 0.05);
    }

    #[test]
    fn freeze_flag_sets_scenario_policy() {
        let args = Args::try_parse_from(["incline_rust", "--freeze-at-launch"])
            .expect("flags should parse");
        let scenario = args.scenario().expect("defaults are valid");
        assert_eq!(scenario.policy, LaunchPolicy::FrozenAtLaunch);
        assert!(
            scenario
                .build_projectiles()
                .iter()
                .all(|p| p.state.policy == LaunchPolicy::FrozenAtLaunch)
        );
    }

    #[test]
    fn projectile_filter_needs_a_scenario_file() {
        assert!(Args::try_parse_from(["incline_rust", "--projectile", "0"]).is_err());
    }
}
