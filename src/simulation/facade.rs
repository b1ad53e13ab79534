//! `#[wasm_bindgen]` surface. Thin: every method delegates to `EngineCore`,
//! translating indices and errors to JS-friendly shapes at this boundary
//! only.

use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::EngineCore;

/// Pointer/length bundle for every render buffer, fetched once per frame so
/// the host does a single wasm call before reading memory directly.
#[wasm_bindgen]
pub struct AbiLayout {
    positions_ptr: u32,
    positions_len_elements: u32,
    positions_len_bytes: u32,
    angles_ptr: u32,
    angles_len_elements: u32,
    angles_len_bytes: u32,
    radii_ptr: u32,
    radii_len_elements: u32,
    radii_len_bytes: u32,
    flags_ptr: u32,
    flags_len_elements: u32,
    flags_len_bytes: u32,
    energies_ptr: u32,
    energies_len_elements: u32,
    energies_len_bytes: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn positions_ptr(&self) -> u32 { self.positions_ptr }
    #[wasm_bindgen(getter)]
    pub fn positions_len_elements(&self) -> u32 { self.positions_len_elements }
    #[wasm_bindgen(getter)]
    pub fn positions_len_bytes(&self) -> u32 { self.positions_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn angles_ptr(&self) -> u32 { self.angles_ptr }
    #[wasm_bindgen(getter)]
    pub fn angles_len_elements(&self) -> u32 { self.angles_len_elements }
    #[wasm_bindgen(getter)]
    pub fn angles_len_bytes(&self) -> u32 { self.angles_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn radii_ptr(&self) -> u32 { self.radii_ptr }
    #[wasm_bindgen(getter)]
    pub fn radii_len_elements(&self) -> u32 { self.radii_len_elements }
    #[wasm_bindgen(getter)]
    pub fn radii_len_bytes(&self) -> u32 { self.radii_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn flags_ptr(&self) -> u32 { self.flags_ptr }
    #[wasm_bindgen(getter)]
    pub fn flags_len_elements(&self) -> u32 { self.flags_len_elements }
    #[wasm_bindgen(getter)]
    pub fn flags_len_bytes(&self) -> u32 { self.flags_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn energies_ptr(&self) -> u32 { self.energies_ptr }
    #[wasm_bindgen(getter)]
    pub fn energies_len_elements(&self) -> u32 { self.energies_len_elements }
    #[wasm_bindgen(getter)]
    pub fn energies_len_bytes(&self) -> u32 { self.energies_len_bytes }
}

#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine over the given bounds, seeded with `initial_bodies`
    /// random bodies.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, initial_bodies: u32) -> Self {
        Self {
            core: EngineCore::new(width, height, initial_bodies),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn sleeping_count(&self) -> u32 { self.core.sleeping_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn contact_count(&self) -> u32 { self.core.contact_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn sim_time(&self) -> f64 { self.core.sim_time() }

    #[wasm_bindgen(getter)]
    pub fn avg_kinetic_energy(&self) -> f32 { self.core.avg_kinetic_energy() }

    #[wasm_bindgen(getter)]
    pub fn max_speed(&self) -> f32 { self.core.max_speed() }

    /// Advance one tick from the wall-clock frame time (seconds).
    pub fn step(&mut self, dt_wallclock: f32) {
        self.core.step(dt_wallclock);
    }

    /// Spawn one body; returns its index or -1 when the population cap
    /// drops the request.
    pub fn spawn(&mut self, x: f32, y: f32, vx: f32, vy: f32) -> i32 {
        match self.core.spawn(x, y, vx, vy) {
            Some(idx) => idx as i32,
            None => -1,
        }
    }

    /// Spawn up to `count` bodies scattered around a point; returns how
    /// many actually spawned.
    pub fn spawn_burst(&mut self, x: f32, y: f32, count: u32) -> u32 {
        self.core.spawn_burst(x, y, count)
    }

    pub fn despawn(&mut self, count: u32) {
        self.core.despawn(count);
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // Config

    pub fn load_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_config_json(json).map_err(|e| JsValue::from_str(&e))
    }

    pub fn config_json(&self) -> String {
        self.core.config_json()
    }

    pub fn set_use_barnes_hut(&mut self, enabled: bool) {
        self.core.set_use_barnes_hut(enabled);
    }

    pub fn set_theta(&mut self, theta: f32) {
        self.core.set_theta(theta);
    }

    pub fn set_show_debug_tree(&mut self, enabled: bool) {
        self.core.set_show_debug_tree(enabled);
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.core.set_gravity_scale(scale);
    }

    // Perf

    /// Enable or disable per-step perf metrics (adds timing overhead when
    /// enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // Render ABI

    /// Refresh the flat render arrays; call after step(), before reading
    /// any pointer below.
    pub fn sync_render_buffers(&mut self) {
        self.core.sync_render_buffers();
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let n = self.core.body_count() as u32;
        AbiLayout {
            positions_ptr: self.core.positions_ptr() as u32,
            positions_len_elements: n * 2,
            positions_len_bytes: n * 2 * 4,
            angles_ptr: self.core.angles_ptr() as u32,
            angles_len_elements: n,
            angles_len_bytes: n * 4,
            radii_ptr: self.core.radii_ptr() as u32,
            radii_len_elements: n,
            radii_len_bytes: n * 4,
            flags_ptr: self.core.flags_ptr() as u32,
            flags_len_elements: n,
            flags_len_bytes: n,
            energies_ptr: self.core.energies_ptr() as u32,
            energies_len_elements: n,
            energies_len_bytes: n * 4,
        }
    }

    pub fn positions_ptr(&self) -> u32 { self.core.positions_ptr() as u32 }
    pub fn angles_ptr(&self) -> u32 { self.core.angles_ptr() as u32 }
    pub fn radii_ptr(&self) -> u32 { self.core.radii_ptr() as u32 }
    pub fn flags_ptr(&self) -> u32 { self.core.flags_ptr() as u32 }
    pub fn energies_ptr(&self) -> u32 { self.core.energies_ptr() as u32 }

    // Debug tree ABI

    /// Extract quadtree node rectangles for debug drawing; returns the node
    /// count (0 unless show_debug_tree is set). 6 floats per node:
    /// x, y, w, h, com_x, com_y.
    pub fn collect_tree_rects(&mut self) -> u32 {
        self.core.collect_tree_rects() as u32
    }

    pub fn tree_rects_ptr(&self) -> u32 {
        self.core.tree_rects_ptr() as u32
    }
}
