//! Population commands: spawn, burst, despawn, clear.

use super::random::rand_range;
use super::EngineCore;
use crate::body::{Body, CELL_UNASSIGNED};
use crate::math::Vec2;

/// Burst scatter half-width around the click point, pixels.
const BURST_SCATTER: f32 = 20.0;
/// Initial speed of burst-spawned bodies, aimed at the bounds center.
const BURST_SPEED: f32 = 5.0;

pub(super) fn spawn(engine: &mut EngineCore, x: f32, y: f32, vx: f32, vy: f32) -> Option<usize> {
    if engine.bodies.len() >= engine.config.max_bodies {
        return None;
    }
    let rng = &mut engine.rng_state;
    // Same radius band as seeding: diameter must fit a grid cell.
    let radius = rand_range(rng, 2.0, 4.0);
    let mut body = Body::new(x, y, radius);
    body.restitution = rand_range(rng, 0.5, 0.8);
    body.friction = rand_range(rng, 0.1, 0.4);
    body.static_friction = (body.friction * 1.5).max(body.friction);
    body.vel = Vec2::new(vx, vy);

    engine.bodies.push(body);
    Some(engine.bodies.len() - 1)
}

/// Scatter up to `count` bodies around `(x, y)`, each nudged toward the
/// bounds center. Stops quietly at the population cap.
pub(super) fn spawn_burst(engine: &mut EngineCore, x: f32, y: f32, count: u32) -> u32 {
    let center = Vec2::new(engine.bounds_w * 0.5, engine.bounds_h * 0.5);
    let mut spawned = 0;
    for _ in 0..count {
        let sx = x + rand_range(&mut engine.rng_state, -BURST_SCATTER, BURST_SCATTER);
        let sy = y + rand_range(&mut engine.rng_state, -BURST_SCATTER, BURST_SCATTER);
        let aim = (center - Vec2::new(sx, sy)).normalize() * BURST_SPEED;
        if spawn(engine, sx, sy, aim.x, aim.y).is_none() {
            break;
        }
        spawned += 1;
    }
    spawned
}

/// Remove up to `count` bodies from the tail. Indices of surviving bodies
/// are unchanged, so only the grid needs resetting.
pub(super) fn despawn(engine: &mut EngineCore, count: u32) {
    let keep = engine.bodies.len().saturating_sub(count as usize);
    engine.bodies.truncate(keep);
    reset_grid(engine);
}

pub(super) fn clear(engine: &mut EngineCore) {
    engine.bodies.clear();
    engine.contacts.clear();
    engine.frame = 0;
    engine.sim_time = 0.0;
    reset_grid(engine);
}

/// Drop every bucket and cached cell; the next tick re-homes all survivors.
fn reset_grid(engine: &mut EngineCore) {
    engine.grid.clear();
    for body in &mut engine.bodies {
        body.cell = CELL_UNASSIGNED;
    }
}
