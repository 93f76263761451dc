use incline_rust::core::simulation::NOMINAL_TICK_S;
use incline_rust::core::{Landing, TickOutcome, advance_all};

use crate::constants::MAX_TICKS_PER_FRAME;
use crate::controls::FrameActions;
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    let env = state.environment;

    if actions.launch_pause {
        let projectile = state.selected_mut();
        if projectile.state.is_playing() {
            projectile.pause();
            state.status_line = format!("Paused {}", state.selected().config.name);
        } else {
            projectile.launch(&env);
            state.status_line = format!("Launched {}", state.selected().config.name);
        }
    }

    if actions.launch_all {
        for p in state.projectiles.iter_mut() {
            p.launch(&env);
        }
        state.status_line = "Launched all".to_string();
    }

    if actions.relaunch {
        state.selected_mut().relaunch(&env);
        state.status_line = format!("Relaunched {}", state.selected().config.name);
    }

    if actions.reset {
        state.selected_mut().reset(&env);
        state.status_line = format!("Reset {}", state.selected().config.name);
    }

    if actions.add {
        state.add_projectile();
    }
    if actions.remove {
        state.remove_selected();
    }
    if actions.next {
        state.select_next();
    }
}

/// Runs as many nominal ticks as the frame time covers. All projectiles in a
/// tick see the same environment snapshot.
pub(crate) fn step_simulation(state: &mut AppRuntime, frame_dt: f32) {
    let tick_s = NOMINAL_TICK_S as f32;
    state.tick_accumulator_s += frame_dt;

    let mut steps = 0;
    while state.tick_accumulator_s >= tick_s {
        if steps == MAX_TICKS_PER_FRAME {
            state.tick_accumulator_s = 0.0;
            break;
        }
        state.tick_accumulator_s -= tick_s;
        steps += 1;

        let outcomes = advance_all(&mut state.projectiles, state.environment);
        for (p, outcome) in state.projectiles.iter().zip(outcomes) {
            let TickOutcome::Finished(landing) = outcome else {
                continue;
            };
            state.status_line = match landing {
                Landing::Surface => format!(
                    "{} landed {:.2} m from the foot after {:.2} s",
                    p.config.name,
                    p.state.position.length(),
                    p.state.time_s
                ),
                Landing::OutOfBounds => format!(
                    "{} left the field after {:.2} s",
                    p.config.name, p.state.time_s
                ),
            };
        }
    }
}
