//! The tick pipeline. Phase order is load-bearing:
//!
//!   grid re-home -> tree rebuild -> gravity -> velocity integration ->
//!   contact detection -> impulse iterations -> positional correction ->
//!   position integration -> walls -> sleep bookkeeping
//!
//! Detection runs on post-gravity velocities so the solver sees the motion
//! it is about to resolve; correction moves positions before they are
//! integrated so the overlap does not compound.

use super::perf_stats::PerfTimer;
use super::EngineCore;
use crate::forces::GravitySolver;
use crate::math::Vec2;
use crate::solver;

pub(super) fn step(engine: &mut EngineCore, dt: f32) {
    if dt <= 0.0 || engine.bodies.is_empty() {
        return;
    }
    let perf = engine.perf_enabled;
    if perf {
        engine.perf_stats.reset();
    }
    let t_step = perf.then(PerfTimer::start);

    // Collision flags are per-tick render state.
    for body in &mut engine.bodies {
        body.colliding = false;
    }

    // Re-home bodies whose grid cell changed.
    let t = perf.then(PerfTimer::start);
    engine.grid.update(&mut engine.bodies);
    if let Some(t) = t {
        engine.perf_stats.grid_ms = t.elapsed_ms();
    }

    // Rebuild the quadtree (recycled arena) when Barnes-Hut is active.
    let t = perf.then(PerfTimer::start);
    if engine.config.use_barnes_hut {
        engine.tree.build(&engine.bodies);
    }
    if let Some(t) = t {
        engine.perf_stats.tree_ms = t.elapsed_ms();
    }

    // Gravity into the scratch buffer, then apply. Sleeping bodies get the
    // once-per-tick wake check from their evaluated pull and otherwise
    // discard it; static bodies ignore gravity entirely.
    let t = perf.then(PerfTimer::start);
    let params = engine.gravity_params();
    let gravity = if engine.config.use_barnes_hut {
        GravitySolver::BarnesHut { tree: &engine.tree, theta: engine.config.theta }
    } else {
        GravitySolver::Direct
    };
    gravity.compute_into(&engine.bodies, &params, &mut engine.accel_scratch);

    let sleep_params = engine.sleep_params();
    for (idx, body) in engine.bodies.iter_mut().enumerate() {
        if body.is_static() {
            continue;
        }
        let accel = engine.accel_scratch[idx];
        if body.sleeping {
            solver::try_wake(body, accel, &sleep_params);
            if body.sleeping {
                continue;
            }
        }
        body.acc = accel;
    }
    if let Some(t) = t {
        engine.perf_stats.forces_ms = t.elapsed_ms();
    }

    // Velocity half of semi-implicit Euler.
    let t = perf.then(PerfTimer::start);
    for body in &mut engine.bodies {
        if body.sleeping || body.is_static() {
            continue;
        }
        body.vel += body.acc * dt;
        body.acc = Vec2::zero();
    }
    let integrate_vel_ms = t.map(|t| t.elapsed_ms()).unwrap_or(0.0);

    // Contacts from the grid's 3x3 neighborhoods.
    let t = perf.then(PerfTimer::start);
    solver::detect_contacts(
        &engine.bodies,
        &engine.grid,
        &mut engine.neighbor_scratch,
        &mut engine.contacts,
    );
    if let Some(t) = t {
        engine.perf_stats.contacts_ms = t.elapsed_ms();
    }

    // Impulse iterations, then one Baumgarte correction pass.
    let t = perf.then(PerfTimer::start);
    solver::solve_contacts(
        &mut engine.bodies,
        &engine.contacts,
        engine.config.solver_iterations,
    );
    for contact in &engine.contacts {
        solver::positional_correction(&mut engine.bodies, contact);
    }
    if let Some(t) = t {
        engine.perf_stats.solver_ms = t.elapsed_ms();
    }

    // Position half; sleeping bodies stay frozen with their velocity kept.
    let t = perf.then(PerfTimer::start);
    for body in &mut engine.bodies {
        if body.sleeping || body.is_static() {
            continue;
        }
        body.pos += body.vel * dt;
        body.angle += body.angular_vel * dt;
        body.update_kinetic_energy();
    }
    if let Some(t) = t {
        engine.perf_stats.integrate_ms = integrate_vel_ms + t.elapsed_ms();
    }

    // Walls, then the sleep timers.
    let t = perf.then(PerfTimer::start);
    let (width, height) = (engine.bounds_w, engine.bounds_h);
    let restitution_floor = engine.config.wall_restitution_floor;
    for body in &mut engine.bodies {
        if body.sleeping {
            continue;
        }
        solver::resolve_walls(body, width, height, restitution_floor);
    }
    for body in &mut engine.bodies {
        solver::update_sleep_state(body, dt, &sleep_params);
    }
    if let Some(t) = t {
        engine.perf_stats.bounds_ms = t.elapsed_ms();
    }

    engine.frame += 1;
    engine.sim_time += dt as f64;

    if perf {
        engine.perf_stats.body_count = engine.bodies.len() as u32;
        engine.perf_stats.contact_count = engine.contacts.len() as u32;
        engine.perf_stats.sleeping_count = engine.sleeping_count() as u32;
        engine.perf_stats.tree_nodes = if engine.config.use_barnes_hut {
            engine.tree.node_count() as u32
        } else {
            0
        };
        let (occupied, max_bucket) = engine.grid.occupancy();
        engine.perf_stats.grid_occupied_cells = occupied;
        engine.perf_stats.grid_max_bucket = max_bucket;
        if let Some(t) = t_step {
            engine.perf_stats.step_ms = t.elapsed_ms();
        }
    }
}
