//! Gravity evaluation - Barnes-Hut tree or direct O(n^2) sum
//!
//! Both paths sit behind [`GravitySolver`] so the rest of the engine never
//! knows which one is active; the step loop picks the variant from config
//! each tick.

mod direct;

pub use direct::direct_acceleration;

use crate::body::Body;
use crate::math::Vec2;
use crate::spatial::QuadTree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Real gravitational constant; multiplied by the configured scale to get
/// visible motion at sandbox masses.
pub const G: f32 = 6.6743e-11;

/// Shared knobs for both force paths.
pub struct GravityParams {
    /// G * gravity_scale
    pub g_eff: f32,
    /// Below this distance an extra short-range attraction ramps in
    pub adhesion_distance: f32,
    pub adhesion_strength: f32,
}

/// Point-mass Newtonian attraction toward `delta`, with the squared
/// distance floored at `min_dist_sq` to avoid the 1/r^2 singularity, plus
/// the short-range adhesion ramp (zero at the threshold, maximum at
/// contact). A zero `delta` contributes nothing: the floor keeps the
/// divisions finite and the zero offset nulls the direction.
#[inline]
pub(crate) fn attraction(
    delta: Vec2,
    source_mass: f32,
    min_dist_sq: f32,
    params: &GravityParams,
) -> Vec2 {
    let dist_sq = delta.length_squared().max(min_dist_sq);
    let dist = dist_sq.sqrt();

    // a = G * M / r^2, directed along delta / r.
    let mut acc = delta * (params.g_eff * source_mass / (dist_sq * dist));

    if dist < params.adhesion_distance {
        let ramp = 1.0 - dist / params.adhesion_distance;
        acc += delta * (params.adhesion_strength * ramp / dist);
    }
    acc
}

/// Strategy selected at step time. A tagged variant rather than dynamic
/// dispatch: the set of solvers is closed.
pub enum GravitySolver<'a> {
    BarnesHut { tree: &'a QuadTree, theta: f32 },
    Direct,
}

impl GravitySolver<'_> {
    /// Gravitational acceleration of one body against all others.
    pub fn acceleration(&self, body_idx: usize, bodies: &[Body], params: &GravityParams) -> Vec2 {
        match self {
            GravitySolver::BarnesHut { tree, theta } => {
                tree.acceleration(body_idx, bodies, *theta, params)
            }
            GravitySolver::Direct => direct_acceleration(body_idx, bodies, params),
        }
    }

    /// Evaluate every body's acceleration into a scratch buffer. The pass
    /// only reads body state, so it parallelizes safely; all mutation
    /// happens after the join, preserving the tick's strict phase order.
    pub fn compute_into(&self, bodies: &[Body], params: &GravityParams, out: &mut Vec<Vec2>) {
        #[cfg(feature = "parallel")]
        {
            (0..bodies.len())
                .into_par_iter()
                .map(|i| self.acceleration(i, bodies, params))
                .collect_into_vec(out);
        }
        #[cfg(not(feature = "parallel"))]
        {
            out.clear();
            out.extend((0..bodies.len()).map(|i| self.acceleration(i, bodies, params)));
        }
    }
}

#[cfg(all(feature = "parallel", test))]
mod parallel_tests {
    use super::*;

    #[test]
    fn parallel_pass_matches_serial_evaluation() {
        let bodies: Vec<Body> = (0..32)
            .map(|i| Body::new(10.0 + 15.0 * i as f32, 7.0 * i as f32, 3.0))
            .collect();
        let params = GravityParams {
            g_eff: G * 50.0,
            adhesion_distance: 10.0,
            adhesion_strength: 0.2,
        };
        let solver = GravitySolver::Direct;

        let mut out = Vec::new();
        solver.compute_into(&bodies, &params, &mut out);

        for (i, acc) in out.iter().enumerate() {
            let serial = solver.acceleration(i, &bodies, &params);
            assert!((acc.x - serial.x).abs() < 1e-9);
            assert!((acc.y - serial.y).abs() < 1e-9);
        }
    }
}
