//! Wall collisions: clamp, bounce, lateral friction, induced spin.

use crate::body::Body;

/// Lateral velocity keeps this fraction of friction as damping.
const WALL_FRICTION_DAMPING: f32 = 0.3;
/// Spin picked up per unit of (damped) sliding velocity along the wall.
const WALL_SPIN_FACTOR: f32 = 0.1;
/// Axis speeds below this engage static friction against the wall.
const WALL_REST_SPEED: f32 = 0.5;
/// Wall restitution loses this much per unit of impact speed.
const WALL_SPEED_FALLOFF: f32 = 0.01;

/// Clamp `body` into [0, width] x [0, height] (inset by its radius) and
/// apply the wall response: reversed, restitution-scaled normal velocity,
/// friction-damped tangential velocity, and a spin kick proportional to the
/// damped component. Wall restitution is speed-dependent, floored at
/// `restitution_floor` x nominal.
pub fn resolve_walls(body: &mut Body, width: f32, height: f32, restitution_floor: f32) {
    let speed = body.speed();
    let wall_restitution =
        body.restitution * (1.0 - speed * WALL_SPEED_FALLOFF).max(restitution_floor);

    // Left wall
    if body.pos.x - body.radius < 0.0 {
        body.pos.x = body.radius;

        let resting = body.vel.x.abs() < WALL_REST_SPEED;
        body.vel.x *= -wall_restitution;

        let friction = if resting { body.static_friction } else { body.friction };
        body.vel.y *= 1.0 - friction * WALL_FRICTION_DAMPING;
        body.angular_vel += body.vel.y * WALL_SPIN_FACTOR;
    }
    // Right wall
    else if body.pos.x + body.radius > width {
        body.pos.x = width - body.radius;

        let resting = body.vel.x.abs() < WALL_REST_SPEED;
        body.vel.x *= -wall_restitution;

        let friction = if resting { body.static_friction } else { body.friction };
        body.vel.y *= 1.0 - friction * WALL_FRICTION_DAMPING;
        body.angular_vel -= body.vel.y * WALL_SPIN_FACTOR;
    }

    // Top wall
    if body.pos.y - body.radius < 0.0 {
        body.pos.y = body.radius;

        let resting = body.vel.y.abs() < WALL_REST_SPEED;
        body.vel.y *= -wall_restitution;

        let friction = if resting { body.static_friction } else { body.friction };
        body.vel.x *= 1.0 - friction * WALL_FRICTION_DAMPING;
        body.angular_vel -= body.vel.x * WALL_SPIN_FACTOR;
    }
    // Bottom wall
    else if body.pos.y + body.radius > height {
        body.pos.y = height - body.radius;

        let resting = body.vel.y.abs() < WALL_REST_SPEED;
        body.vel.y *= -wall_restitution;

        let friction = if resting { body.static_friction } else { body.friction };
        body.vel.x *= 1.0 - friction * WALL_FRICTION_DAMPING;
        body.angular_vel += body.vel.x * WALL_SPIN_FACTOR;
    }
}
