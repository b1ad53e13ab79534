use wasm_bindgen::prelude::*;

/// Monotonic-enough stopwatch for phase timing. Uses `Date.now()` on wasm
/// (Instant is unavailable there) and `Instant` natively.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { start: std::time::Instant::now() }
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }
}

/// Per-step timing and counter snapshot, handed to the host by value.
#[wasm_bindgen]
#[derive(Clone, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) grid_ms: f64,
    pub(super) tree_ms: f64,
    pub(super) forces_ms: f64,
    pub(super) contacts_ms: f64,
    pub(super) solver_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) bounds_ms: f64,

    pub(super) body_count: u32,
    pub(super) sleeping_count: u32,
    pub(super) contact_count: u32,
    pub(super) tree_nodes: u32,
    pub(super) grid_occupied_cells: u32,
    pub(super) grid_max_bucket: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn grid_ms(&self) -> f64 { self.grid_ms }
    #[wasm_bindgen(getter)]
    pub fn tree_ms(&self) -> f64 { self.tree_ms }
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }
    #[wasm_bindgen(getter)]
    pub fn contacts_ms(&self) -> f64 { self.contacts_ms }
    #[wasm_bindgen(getter)]
    pub fn solver_ms(&self) -> f64 { self.solver_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn bounds_ms(&self) -> f64 { self.bounds_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn sleeping_count(&self) -> u32 { self.sleeping_count }
    #[wasm_bindgen(getter)]
    pub fn contact_count(&self) -> u32 { self.contact_count }
    #[wasm_bindgen(getter)]
    pub fn tree_nodes(&self) -> u32 { self.tree_nodes }
    #[wasm_bindgen(getter)]
    pub fn grid_occupied_cells(&self) -> u32 { self.grid_occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn grid_max_bucket(&self) -> u32 { self.grid_max_bucket }
}
