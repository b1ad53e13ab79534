//! Brute-force O(n^2) pairwise gravity - the fallback for small
//! populations and the ground truth the tree is tested against.

use super::{attraction, GravityParams};
use crate::body::Body;
use crate::math::Vec2;

/// Sum the attraction of every other body on `body_idx`, with the same
/// minimum-distance floor the tree uses so the two paths agree at theta 0.
pub fn direct_acceleration(body_idx: usize, bodies: &[Body], params: &GravityParams) -> Vec2 {
    let body = &bodies[body_idx];
    let min_dist_sq = (body.radius * 2.0) * (body.radius * 2.0);

    let mut acc = Vec2::zero();
    for (other_idx, other) in bodies.iter().enumerate() {
        if other_idx == body_idx {
            continue;
        }
        acc += attraction(other.pos - body.pos, other.mass, min_dist_sq, params);
    }
    acc
}
