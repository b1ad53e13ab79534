//! Gravitas Engine - 2D N-body gravity sandbox in WASM
//!
//! Long-range gravity runs through a Barnes-Hut quadtree (O(n log n)) with a
//! brute-force O(n^2) fallback; short-range contacts go through a uniform
//! spatial grid and a sequential-impulse solver with rotation, friction and
//! Baumgarte positional correction.
//!
//! Architecture:
//! - math/        - Vector primitives
//! - body.rs      - Circular rigid body state
//! - spatial/     - Uniform grid + Barnes-Hut quadtree
//! - forces/      - Gravity evaluation (tree or direct)
//! - solver/      - Contact detection, impulse solver, walls, sleep
//! - simulation/  - Orchestration + host-facing API

pub mod math;
pub mod body;
pub mod spatial;
pub mod forces;
pub mod solver;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Gravitas WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use body::Body;
pub use math::Vec2;
pub use simulation::{Engine, EngineConfig, EngineCore, PerfStats};
