//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically.

use super::particle::Burst;
use super::player::Intents;
use super::state::{GamePhase, GameState, Mode};

/// Countdown values at or below this count as expired
const CLOCK_EPSILON: f64 = 1e-9;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement directions
    pub intents: Intents,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // A pause toggle consumes the whole tick in both directions
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("resumed at tick {}", state.time_ticks);
                return;
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Bursts keep fading behind the results screen
            advance_particles(state, dt);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    match state.mode {
        Mode::Catcher => {
            state.clock -= f64::from(dt);
            if state.clock <= CLOCK_EPSILON {
                state.clock = 0.0;
                end_run(state);
                return;
            }
        }
        Mode::Survivor => state.clock += f64::from(dt),
    }

    state.player.update(&input.intents, &state.screen);

    let screen = state.screen;
    for snake in &mut state.snakes {
        snake.update(&screen);
    }
    // Retired snakes leave before anything can touch them
    state.snakes.retain(|s| s.alive);

    state.next_spawn -= dt;
    if state.next_spawn <= 0.0 {
        state.spawn_snake();
        state.next_spawn = state.sample_spawn_interval();
    }

    match state.mode {
        Mode::Catcher => collect_heads(state),
        Mode::Survivor => {
            if let Some(id) = find_collision(state) {
                log::debug!("player hit by snake {}", id);
                end_run(state);
            }
        }
    }

    advance_particles(state, dt);
}

/// Catcher: remove every snake whose head is within reach, scoring it once
fn collect_heads(state: &mut GameState) {
    let player_pos = state.player.pos;
    let reach_base = state.player.radius + state.config.pickup_slack;

    let mut caught = Vec::new();
    state.snakes.retain(|snake| {
        let head = snake.head();
        let reach = reach_base + snake.head_radius();
        if head.distance_squared(player_pos) <= reach * reach {
            caught.push((snake.id, snake.value, head));
            false
        } else {
            true
        }
    });

    for (id, value, head) in caught {
        state.score += value;
        log::debug!("caught snake {} for {} (score {})", id, value, state.score);
        if state.particles_enabled {
            Burst::PICKUP.emit(&mut state.fx_rng, head, &mut state.particles);
        }
    }
}

/// Survivor: id of the first snake with a segment touching the player
fn find_collision(state: &GameState) -> Option<u32> {
    let p = state.player.pos;
    let r = state.player.radius;
    state.snakes.iter().find_map(|snake| {
        snake
            .segments()
            .iter()
            .any(|seg| {
                let reach = r + seg.radius;
                seg.pos.distance_squared(p) <= reach * reach
            })
            .then_some(snake.id)
    })
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    if state.mode == Mode::Survivor && state.particles_enabled {
        let at = state.player.pos;
        Burst::IMPACT.emit(&mut state.fx_rng, at, &mut state.particles);
    }
    log::info!(
        "{} run over after {} ticks: {}",
        state.mode.as_str(),
        state.time_ticks,
        state.outcome()
    );
}

fn advance_particles(state: &mut GameState, dt: f32) {
    state.particles.retain_mut(|p| p.tick(dt));
}
