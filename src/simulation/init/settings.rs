//! Runtime configuration and its JSON surface.

use serde::{Deserialize, Serialize};

use super::EngineCore;
use crate::spatial::UniformGrid;

/// Every tunable the host may change at runtime. Serialized camelCase so the
/// JS side reads and writes it naturally.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Barnes-Hut when true, exact pairwise summation when false
    pub use_barnes_hut: bool,
    /// Opening angle; 0 forces full recursion (exact), larger is coarser
    pub theta: f32,
    /// Extract quadtree rectangles for debug drawing
    pub show_debug_tree: bool,

    /// Multiplier on G for visible motion at canvas scale
    pub gravity_scale: f32,
    /// Short-range cohesion band beyond touching distance, in pixels
    pub adhesion_distance: f32,
    pub adhesion_strength: f32,

    /// Sequential impulse iterations per tick
    pub solver_iterations: u32,
    /// Grid cell edge, pixels
    pub cell_size: f32,
    /// Population cap; spawn requests beyond it are dropped
    pub max_bodies: usize,

    /// Wall-clock to simulated-seconds multiplier
    pub time_scale: f32,
    /// Per-tick dt ceiling, simulated seconds
    pub max_dt: f32,
    /// Wall restitution never drops below this fraction of nominal
    pub wall_restitution_floor: f32,

    pub sleep_velocity_threshold: f32,
    pub sleep_time_limit: f32,
    pub wake_accel_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            use_barnes_hut: true,
            theta: 0.5,
            show_debug_tree: false,
            gravity_scale: 50.0,
            adhesion_distance: 10.0,
            adhesion_strength: 0.2,
            solver_iterations: 10,
            cell_size: 8.0,
            max_bodies: 5000,
            time_scale: 15.0,
            max_dt: 0.25,
            wall_restitution_floor: 0.5,
            sleep_velocity_threshold: 0.08,
            sleep_time_limit: 1.0,
            wake_accel_threshold: 0.5,
        }
    }
}

pub(super) fn load_config_json(engine: &mut EngineCore, json: &str) -> Result<(), String> {
    let config: EngineConfig =
        serde_json::from_str(json).map_err(|e| format!("invalid config JSON: {e}"))?;
    if config.cell_size <= 0.0 {
        return Err("cellSize must be positive".to_string());
    }
    if config.theta < 0.0 {
        return Err("theta must be non-negative".to_string());
    }
    if config.solver_iterations == 0 {
        return Err("solverIterations must be at least 1".to_string());
    }

    // A new cell size invalidates every cached cell index, so the grid is
    // rebuilt from scratch and bodies re-homed on the next tick.
    if config.cell_size != engine.config.cell_size {
        engine.grid = UniformGrid::new(engine.bounds_w, engine.bounds_h, config.cell_size);
        for body in &mut engine.bodies {
            body.cell = crate::body::CELL_UNASSIGNED;
        }
    }
    engine.config = config;
    Ok(())
}

pub(super) fn config_json(engine: &EngineCore) -> String {
    // EngineConfig is a plain field struct; serialization cannot fail.
    serde_json::to_string(&engine.config).unwrap_or_default()
}

pub(super) fn set_use_barnes_hut(engine: &mut EngineCore, enabled: bool) {
    engine.config.use_barnes_hut = enabled;
}

pub(super) fn set_theta(engine: &mut EngineCore, theta: f32) {
    engine.config.theta = theta.max(0.0);
}

pub(super) fn set_show_debug_tree(engine: &mut EngineCore, enabled: bool) {
    engine.config.show_debug_tree = enabled;
}

pub(super) fn set_gravity_scale(engine: &mut EngineCore, scale: f32) {
    engine.config.gravity_scale = scale;
}
