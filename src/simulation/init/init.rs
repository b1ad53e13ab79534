use super::perf_stats::PerfStats;
use super::random::rand_range;
use super::settings::EngineConfig;
use super::{EngineCore, RenderBuffers};
use crate::body::Body;
use crate::spatial::{QuadTree, UniformGrid};

pub(super) fn create_engine_core(width: f32, height: f32, initial_bodies: u32) -> EngineCore {
    let config = EngineConfig::default();
    let mut engine = EngineCore {
        grid: UniformGrid::new(width, height, config.cell_size),
        tree: QuadTree::new(width, height),
        config,
        bounds_w: width,
        bounds_h: height,

        bodies: Vec::with_capacity(initial_bodies as usize),
        contacts: Vec::new(),
        accel_scratch: Vec::new(),
        neighbor_scratch: Vec::new(),

        frame: 0,
        sim_time: 0.0,
        rng_state: 12345,

        render: RenderBuffers::default(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };
    for _ in 0..initial_bodies {
        seed_body(&mut engine);
    }
    engine
}

/// One randomly placed, randomly sized body. Material properties are drawn
/// per body so piles settle unevenly instead of in lockstep.
pub(super) fn seed_body(engine: &mut EngineCore) -> Option<usize> {
    if engine.bodies.len() >= engine.config.max_bodies {
        return None;
    }
    let rng = &mut engine.rng_state;
    // Diameter stays <= the grid cell size or 3x3 queries miss contacts.
    let radius = rand_range(rng, 2.0, 4.0);
    let x = rand_range(rng, radius, engine.bounds_w - radius);
    let y = rand_range(rng, radius, engine.bounds_h - radius);

    let mut body = Body::new(x, y, radius);
    body.restitution = rand_range(rng, 0.5, 0.8);
    body.friction = rand_range(rng, 0.1, 0.4);
    body.static_friction = (body.friction * 1.5).max(body.friction);
    body.angle = rand_range(rng, 0.0, std::f32::consts::TAU);
    // Small initial stir so the cloud does not start perfectly cold.
    body.vel.x = rand_range(rng, -1.0, 1.0);
    body.vel.y = rand_range(rng, -1.0, 1.0);

    engine.bodies.push(body);
    Some(engine.bodies.len() - 1)
}
