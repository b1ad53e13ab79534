//! Flat render arrays the JS host reads straight out of wasm memory.
//!
//! Layout contract (per body index i):
//!   positions[2i], positions[2i+1]  x, y
//!   angles[i]                       orientation, radians
//!   radii[i]
//!   flags[i]                        bit0 colliding, bit1 sleeping
//!   energies[i]                     cached kinetic energy
//! Pointers are only valid until the next call that grows a buffer.

use super::EngineCore;

pub(super) const FLAG_COLLIDING: u8 = 1 << 0;
pub(super) const FLAG_SLEEPING: u8 = 1 << 1;

/// Floats per debug tree rect: x, y, w, h, com_x, com_y.
pub(super) const TREE_RECT_STRIDE: usize = 6;

#[derive(Default)]
pub(super) struct RenderBuffers {
    pub(super) positions: Vec<f32>,
    pub(super) angles: Vec<f32>,
    pub(super) radii: Vec<f32>,
    pub(super) flags: Vec<u8>,
    pub(super) energies: Vec<f32>,
    pub(super) tree_rects: Vec<f32>,
}

pub(super) fn sync_render_buffers(engine: &mut EngineCore) {
    let n = engine.bodies.len();
    let render = &mut engine.render;
    render.positions.clear();
    render.angles.clear();
    render.radii.clear();
    render.flags.clear();
    render.energies.clear();
    render.positions.reserve(n * 2);

    for body in &engine.bodies {
        render.positions.push(body.pos.x);
        render.positions.push(body.pos.y);
        render.angles.push(body.angle);
        render.radii.push(body.radius);
        let mut flags = 0u8;
        if body.colliding {
            flags |= FLAG_COLLIDING;
        }
        if body.sleeping {
            flags |= FLAG_SLEEPING;
        }
        render.flags.push(flags);
        render.energies.push(body.kinetic_energy);
    }
}

/// Fill the tree rect buffer from the current quadtree. Returns the node
/// count written, 0 when debug drawing is off (the buffer is left stale and
/// must not be read).
pub(super) fn collect_tree_rects(engine: &mut EngineCore) -> usize {
    if !engine.config.show_debug_tree {
        return 0;
    }
    let rects = &mut engine.render.tree_rects;
    rects.clear();
    for node in engine.tree.raw_nodes() {
        rects.push(node.origin.x);
        rects.push(node.origin.y);
        rects.push(node.width);
        rects.push(node.height);
        rects.push(node.com.x);
        rects.push(node.com.y);
    }
    rects.len() / TREE_RECT_STRIDE
}
