//! Per-frame simulation step
//!
//! Advances the droplet, handles wrap-around, pickups and obstacle hits.

use super::collision::{circles_overlap, first_hit};
use super::mode::GameMode;
use super::state::{GameEvent, GameState};
use crate::consts::MAX_SHAPES;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Net horizontal direction: -1 left, 0 none, 1 right
    pub direction: f32,
    /// Frame timestamp (ms), used to schedule the game over reset
    pub now_ms: f64,
}

/// Speed multiplier after `elapsed` seconds of play
#[inline]
pub fn speed_multiplier(elapsed: f32, ramp: f32, max: f32) -> f32 {
    (1.0 + elapsed * ramp).min(max)
}

/// Advance the game by `dt` seconds. `dt` is clamped to the tuning's frame cap.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.mode() != GameMode::Playing {
        return;
    }
    let dt = crate::clamp_frame_dt(dt, state.tuning.max_frame_dt);

    state.elapsed += dt;
    let multiplier = speed_multiplier(
        state.elapsed,
        state.tuning.speed_ramp,
        state.tuning.max_speed_multiplier,
    );

    // Steering
    let direction = input.direction.clamp(-1.0, 1.0);
    state.droplet.pos.x += direction * state.droplet.speed * multiplier * dt;
    state.clamp_droplet_x();

    // Falling
    state.droplet.pos.y += state.droplet.fall_speed * multiplier * dt;

    // Wrap back to the top with more obstacles
    let radius = state.droplet.radius;
    if state.droplet.pos.y - radius > state.height {
        state.droplet.pos.y = -radius;
        state.trail.reset(state.droplet.pos);
        state.shape_count = state
            .shape_count
            .saturating_add(state.tuning.shapes_per_wrap)
            .min(MAX_SHAPES);
        state.rebuild_shapes();
        state.events.push(GameEvent::Wrapped {
            shape_count: state.shape_count,
        });
        log::info!("Wrapped: {} shapes", state.shape_count);
    } else {
        state.trail.push(state.droplet.pos);
    }

    // Golden circles
    let pos = state.droplet.pos;
    for i in 0..state.golden_circles.len() {
        let circle = &state.golden_circles[i];
        if circles_overlap(pos, radius, circle.pos, circle.radius) {
            let circle_pos = circle.pos;
            state.score += 1;
            state.events.push(GameEvent::PickupCollected { pos: circle_pos });
            state.events.push(GameEvent::ScoreChanged { score: state.score });
            state.respawn_golden_circle(i);
        }
    }

    // Obstacles: the first hit ends the run
    if let Some(shape_index) = first_hit(pos, radius, &state.shapes) {
        state.events.push(GameEvent::ObstacleHit { shape_index });
        state.trigger_game_over(input.now_ms);
    }
}
