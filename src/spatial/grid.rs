//! Uniform Grid - spatial hash over fixed-size cells
//!
//! Buckets hold body indices into the engine's body arena; each body caches
//! its bucket index so removal never has to search the whole grid. Cell size
//! must be >= the largest body diameter, otherwise contacts that span more
//! than one cell are missed.

use crate::body::{Body, CELL_UNASSIGNED};
use crate::math::Vec2;

pub struct UniformGrid {
    cell_size: f32,
    grid_w: u32,
    grid_h: u32,
    buckets: Vec<Vec<usize>>,
}

impl UniformGrid {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let grid_w = (width / cell_size).ceil().max(1.0) as u32;
        let grid_h = (height / cell_size).ceil().max(1.0) as u32;
        Self {
            cell_size,
            grid_w,
            grid_h,
            buckets: (0..grid_w * grid_h).map(|_| Vec::new()).collect(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.grid_w, self.grid_h)
    }

    /// Cell index for a position, or None when outside the grid.
    pub fn cell_index(&self, pos: Vec2) -> Option<usize> {
        let gx = (pos.x / self.cell_size).floor();
        let gy = (pos.y / self.cell_size).floor();
        if gx < 0.0 || gy < 0.0 || gx >= self.grid_w as f32 || gy >= self.grid_h as f32 {
            return None;
        }
        Some(gx as usize + gy as usize * self.grid_w as usize)
    }

    /// Append a body to the bucket at `cell` and cache the index on the
    /// body. Out-of-bounds inserts are silently dropped; the body keeps its
    /// unassigned marker so `remove` stays a no-op.
    pub fn insert(&mut self, body: &mut Body, body_idx: usize, cell: Option<usize>) {
        match cell {
            Some(idx) if idx < self.buckets.len() => {
                self.buckets[idx].push(body_idx);
                body.cell = idx as i32;
            }
            _ => body.cell = CELL_UNASSIGNED,
        }
    }

    /// Erase a body from its cached bucket by identity. No-op when the body
    /// is not a member of any bucket.
    pub fn remove(&mut self, body: &mut Body, body_idx: usize) {
        if body.cell < 0 {
            return;
        }
        let cell = body.cell as usize;
        if let Some(bucket) = self.buckets.get_mut(cell) {
            if let Some(pos) = bucket.iter().position(|&i| i == body_idx) {
                // Order-preserving removal: bucket order feeds contact order.
                bucket.remove(pos);
            }
        }
        body.cell = CELL_UNASSIGNED;
    }

    /// Re-home every body whose computed cell changed since the last tick.
    pub fn update(&mut self, bodies: &mut [Body]) {
        for idx in 0..bodies.len() {
            let target = self.cell_index(bodies[idx].pos);
            let cached = bodies[idx].cell;
            let matches = match target {
                Some(cell) => cached == cell as i32,
                None => cached == CELL_UNASSIGNED,
            };
            if !matches {
                self.remove(&mut bodies[idx], idx);
                self.insert(&mut bodies[idx], idx, target);
            }
        }
    }

    /// Collect all bodies in the 3x3 block of cells centered on `body`'s
    /// cell, including the body itself. Callers must exclude self-pairs.
    pub fn neighbors_into(&self, body: &Body, out: &mut Vec<usize>) {
        out.clear();
        if body.cell < 0 {
            return;
        }
        let cell = body.cell as usize;
        let gx = (cell % self.grid_w as usize) as i32;
        let gy = (cell / self.grid_w as usize) as i32;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let nx = gx + dx;
                let ny = gy + dy;
                if nx < 0 || ny < 0 || nx >= self.grid_w as i32 || ny >= self.grid_h as i32 {
                    continue;
                }
                let bucket = &self.buckets[nx as usize + ny as usize * self.grid_w as usize];
                out.extend_from_slice(bucket);
            }
        }
    }

    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    /// (occupied cells, largest bucket) - perf metrics only.
    pub fn occupancy(&self) -> (u32, u32) {
        let mut occupied = 0u32;
        let mut max_bucket = 0u32;
        for bucket in self.buckets.iter() {
            if !bucket.is_empty() {
                occupied += 1;
                max_bucket = max_bucket.max(bucket.len() as u32);
            }
        }
        (occupied, max_bucket)
    }
}
