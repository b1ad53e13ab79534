//! Engine orchestration.
//!
//! `EngineCore` owns every piece of simulation state (bodies, grid, tree,
//! contact list, scratch buffers) and orchestrates the tick; the actual
//! physics lives in the leaf modules. `Engine` (facade.rs) is the
//! `#[wasm_bindgen]` wrapper the host talks to.
//!
//! One tick runs to completion before the next is scheduled; nothing
//! suspends mid-tick and nothing outside this struct may touch the grid or
//! tree while a tick runs.

use crate::body::Body;
use crate::forces::GravityParams;
use crate::math::Vec2;
use crate::solver::{Contact, SleepParams};
use crate::spatial::{QuadTree, UniformGrid};

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "init/settings.rs"]
mod settings;
#[path = "init/init.rs"]
mod init;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{AbiLayout, Engine};
pub use perf_stats::PerfStats;
pub use settings::EngineConfig;

use render_extract::RenderBuffers;

/// The simulation core: all state, no hidden statics.
pub struct EngineCore {
    config: EngineConfig,
    bounds_w: f32,
    bounds_h: f32,

    bodies: Vec<Body>,
    grid: UniformGrid,
    tree: QuadTree,

    // Per-tick scratch, reused to keep allocation flat
    contacts: Vec<Contact>,
    accel_scratch: Vec<Vec2>,
    neighbor_scratch: Vec<usize>,

    // State
    frame: u64,
    sim_time: f64,
    rng_state: u32,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl EngineCore {
    /// Create an engine over `width x height` bounds, seeded with
    /// `initial_bodies` randomly placed bodies.
    pub fn new(width: f32, height: f32, initial_bodies: u32) -> Self {
        init::create_engine_core(width, height, initial_bodies)
    }

    pub fn width(&self) -> f32 {
        self.bounds_w
    }

    pub fn height(&self) -> f32 {
        self.bounds_h
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total simulated seconds so far.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn sleeping_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.sleeping).count()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, idx: usize) -> Option<&Body> {
        self.bodies.get(idx)
    }

    /// Mutable body access for embedding hosts and tests. The grid's cached
    /// cell index self-heals on the next tick if the position moves.
    pub fn body_mut(&mut self, idx: usize) -> Option<&mut Body> {
        self.bodies.get_mut(idx)
    }

    pub fn avg_kinetic_energy(&self) -> f32 {
        if self.bodies.is_empty() {
            return 0.0;
        }
        let total: f32 = self.bodies.iter().map(|b| b.kinetic_energy).sum();
        total / self.bodies.len() as f32
    }

    pub fn max_speed(&self) -> f32 {
        self.bodies.iter().map(|b| b.speed()).fold(0.0, f32::max)
    }

    // === Configuration ===

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration from host-supplied JSON.
    pub fn load_config_json(&mut self, json: &str) -> Result<(), String> {
        settings::load_config_json(self, json)
    }

    pub fn config_json(&self) -> String {
        settings::config_json(self)
    }

    pub fn set_use_barnes_hut(&mut self, enabled: bool) {
        settings::set_use_barnes_hut(self, enabled);
    }

    pub fn set_theta(&mut self, theta: f32) {
        settings::set_theta(self, theta);
    }

    pub fn set_show_debug_tree(&mut self, enabled: bool) {
        settings::set_show_debug_tree(self, enabled);
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        settings::set_gravity_scale(self, scale);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when
    /// enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }

    // === Population commands ===

    /// Insert one body at a position with an initial velocity. Returns its
    /// index, or None when the population cap drops the request.
    pub fn spawn(&mut self, x: f32, y: f32, vx: f32, vy: f32) -> Option<usize> {
        commands::spawn(self, x, y, vx, vy)
    }

    /// Scatter up to `count` bodies around a point, aimed at the bounds
    /// center. Returns how many actually spawned (the cap may cut it short).
    pub fn spawn_burst(&mut self, x: f32, y: f32, count: u32) -> u32 {
        commands::spawn_burst(self, x, y, count)
    }

    /// Bulk-remove `count` bodies from the population tail.
    pub fn despawn(&mut self, count: u32) {
        commands::despawn(self, count);
    }

    /// Remove every body and reset the clock.
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    // === Stepping ===

    /// Advance one tick from a wall-clock frame time; the internal dt is
    /// scaled by the configured time scale and clamped to max_dt.
    pub fn step(&mut self, dt_wallclock: f32) {
        let dt = (dt_wallclock * self.config.time_scale).min(self.config.max_dt);
        step::step(self, dt);
    }

    /// Advance one tick with an explicit simulated dt (no scaling). Test
    /// and replay entry point.
    pub fn step_dt(&mut self, dt: f32) {
        step::step(self, dt.min(self.config.max_dt));
    }

    // === Render extraction (ptr/len ABI for the JS host) ===

    /// Refresh the flat render arrays from body state. Call after step(),
    /// before reading the pointers.
    pub fn sync_render_buffers(&mut self) {
        render_extract::sync_render_buffers(self);
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.render.positions.as_ptr()
    }

    pub fn angles_ptr(&self) -> *const f32 {
        self.render.angles.as_ptr()
    }

    pub fn radii_ptr(&self) -> *const f32 {
        self.render.radii.as_ptr()
    }

    pub fn flags_ptr(&self) -> *const u8 {
        self.render.flags.as_ptr()
    }

    pub fn energies_ptr(&self) -> *const f32 {
        self.render.energies.as_ptr()
    }

    /// Extract the quadtree's node rectangles for debug drawing. Returns
    /// the node count (0 unless show_debug_tree is set); each node is 6
    /// floats: x, y, w, h, com_x, com_y.
    pub fn collect_tree_rects(&mut self) -> usize {
        render_extract::collect_tree_rects(self)
    }

    pub fn tree_rects_ptr(&self) -> *const f32 {
        self.render.tree_rects.as_ptr()
    }

    fn gravity_params(&self) -> GravityParams {
        GravityParams {
            g_eff: crate::forces::G * self.config.gravity_scale,
            adhesion_distance: self.config.adhesion_distance,
            adhesion_strength: self.config.adhesion_strength,
        }
    }

    fn sleep_params(&self) -> SleepParams {
        SleepParams {
            velocity_threshold: self.config.sleep_velocity_threshold,
            time_limit: self.config.sleep_time_limit,
            wake_accel_threshold: self.config.wake_accel_threshold,
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
