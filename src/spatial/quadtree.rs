//! Barnes-Hut quadtree - approximate long-range gravity in O(log n) per query
//!
//! Nodes live in a flat arena and reference children by index; ownership is
//! strictly parent -> child with no back-pointers. The whole tree is rebuilt
//! from scratch every tick (the arena is recycled to keep allocation flat),
//! so aggregates never go stale.

use crate::body::Body;
use crate::forces::{attraction, GravityParams};
use crate::math::Vec2;

/// Subdivision stops here regardless of occupancy, so clustered or
/// coincident bodies cannot recurse forever.
pub const MAX_DEPTH: u32 = 8;

pub(crate) struct QuadNode {
    pub(crate) origin: Vec2,
    pub(crate) width: f32,
    pub(crate) height: f32,
    depth: u32,
    /// Mass-weighted center of all bodies in this subtree
    pub(crate) com: Vec2,
    pub(crate) total_mass: f32,
    /// Child quadrants (NW, NE, SW, SE), created lazily on subdivision
    children: Option<[usize; 4]>,
    /// Resident bodies: leaves hold up to one, plus geometric stragglers
    /// that no child quadrant claims.
    residents: Vec<usize>,
}

impl QuadNode {
    fn new(origin: Vec2, width: f32, height: f32, depth: u32) -> Self {
        Self {
            origin,
            width,
            height,
            depth,
            com: Vec2::zero(),
            total_mass: 0.0,
            children: None,
            residents: Vec::new(),
        }
    }

    /// Half-open containment test; a body exactly on a shared edge belongs
    /// to the first child whose test succeeds.
    #[inline]
    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y < self.origin.y + self.height
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

pub struct QuadTree {
    nodes: Vec<QuadNode>,
    bounds_w: f32,
    bounds_h: f32,
}

impl QuadTree {
    /// Fresh tree bounding the whole simulation area (origin at 0,0).
    pub fn new(width: f32, height: f32) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            bounds_w: width,
            bounds_h: height,
        };
        tree.clear();
        tree
    }

    /// Reset to an empty root. Keeps the arena's capacity.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes
            .push(QuadNode::new(Vec2::zero(), self.bounds_w, self.bounds_h, 0));
    }

    /// Clear and reinsert every body.
    pub fn build(&mut self, bodies: &[Body]) {
        self.clear();
        for idx in 0..bodies.len() {
            self.insert(idx, bodies);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn raw_nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    /// Insert one body, updating center-of-mass aggregates along the path.
    /// Bodies outside the root bounds are ignored (the boundary pass clamps
    /// positions, so this only happens transiently).
    pub fn insert(&mut self, body_idx: usize, bodies: &[Body]) {
        if !self.nodes[0].contains(bodies[body_idx].pos) {
            return;
        }
        self.insert_at(0, body_idx, bodies);
    }

    fn insert_at(&mut self, node: usize, body_idx: usize, bodies: &[Body]) {
        let body = &bodies[body_idx];
        self.update_mass(node, body.pos, body.mass);

        if self.nodes[node].is_leaf() {
            let at_capacity = !self.nodes[node].residents.is_empty();
            if self.nodes[node].depth >= MAX_DEPTH || !at_capacity {
                self.nodes[node].residents.push(body_idx);
                return;
            }
            // Would hold more than one resident: split and migrate.
            self.subdivide(node);
            let migrants = std::mem::take(&mut self.nodes[node].residents);
            for migrant in migrants {
                self.insert_to_children(node, migrant, bodies);
            }
        }
        self.insert_to_children(node, body_idx, bodies);
    }

    fn insert_to_children(&mut self, node: usize, body_idx: usize, bodies: &[Body]) {
        let Some(children) = self.nodes[node].children else {
            self.nodes[node].residents.push(body_idx);
            return;
        };
        for child in children {
            if self.nodes[child].contains(bodies[body_idx].pos) {
                self.insert_at(child, body_idx, bodies);
                return;
            }
        }
        // No child claims the position (floating-point edge): retain the
        // body here instead of losing it.
        self.nodes[node].residents.push(body_idx);
    }

    fn subdivide(&mut self, node: usize) {
        let (origin, half_w, half_h, next_depth) = {
            let n = &self.nodes[node];
            (n.origin, n.width / 2.0, n.height / 2.0, n.depth + 1)
        };
        let base = self.nodes.len();
        self.nodes
            .push(QuadNode::new(origin, half_w, half_h, next_depth));
        self.nodes.push(QuadNode::new(
            Vec2::new(origin.x + half_w, origin.y),
            half_w,
            half_h,
            next_depth,
        ));
        self.nodes.push(QuadNode::new(
            Vec2::new(origin.x, origin.y + half_h),
            half_w,
            half_h,
            next_depth,
        ));
        self.nodes.push(QuadNode::new(
            Vec2::new(origin.x + half_w, origin.y + half_h),
            half_w,
            half_h,
            next_depth,
        ));
        self.nodes[node].children = Some([base, base + 1, base + 2, base + 3]);
    }

    /// Incremental mass-weighted COM update:
    /// newCOM = (oldCOM * oldMass + pos * mass) / newMass
    fn update_mass(&mut self, node: usize, pos: Vec2, mass: f32) {
        let n = &mut self.nodes[node];
        let new_mass = n.total_mass + mass;
        n.com = (n.com * n.total_mass + pos * mass) * (1.0 / new_mass);
        n.total_mass = new_mass;
    }

    /// Approximate gravitational acceleration on `body_idx` against the
    /// aggregate mass distribution of the tree. Pure approximation: cannot
    /// error, only lose accuracy at large theta.
    pub fn acceleration(
        &self,
        body_idx: usize,
        bodies: &[Body],
        theta: f32,
        params: &GravityParams,
    ) -> Vec2 {
        let body = &bodies[body_idx];
        // Singularity floor derived from the body's own size.
        let min_dist_sq = (body.radius * 2.0) * (body.radius * 2.0);
        let mut acc = Vec2::zero();
        self.accumulate(0, body_idx, body.pos, min_dist_sq, theta, params, &mut acc);
        acc
    }

    #[allow(clippy::too_many_arguments)]
    fn accumulate(
        &self,
        node: usize,
        body_idx: usize,
        pos: Vec2,
        min_dist_sq: f32,
        theta: f32,
        params: &GravityParams,
        acc: &mut Vec2,
    ) {
        let n = &self.nodes[node];
        // Empty subtrees prune implicitly.
        if n.total_mass == 0.0 {
            return;
        }
        // Skip self-interaction: a leaf holding exactly this body.
        if n.is_leaf() && n.residents.len() == 1 && n.residents[0] == body_idx {
            return;
        }

        let delta = n.com - pos;
        let dist = delta.length_squared().max(min_dist_sq).sqrt();
        let s = n.width.max(n.height);

        if n.is_leaf() || s / dist < theta {
            // Far enough (or cannot refine): treat as a single point mass.
            *acc += attraction(delta, n.total_mass, min_dist_sq, params);
        } else if let Some(children) = n.children {
            for child in children {
                self.accumulate(child, body_idx, pos, min_dist_sq, theta, params, acc);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(x, y, 3.0)
    }

    #[test]
    fn root_aggregates_total_mass_and_weighted_com() {
        let bodies = vec![body_at(100.0, 100.0), body_at(300.0, 300.0)];
        let mut tree = QuadTree::new(512.0, 512.0);
        tree.build(&bodies);

        let root = &tree.raw_nodes()[0];
        let expected_mass = bodies[0].mass + bodies[1].mass;
        assert!((root.total_mass - expected_mass).abs() / expected_mass < 1e-6);
        // Equal masses: COM is the midpoint.
        assert!((root.com.x - 200.0).abs() < 1e-2);
        assert!((root.com.y - 200.0).abs() < 1e-2);
    }

    #[test]
    fn two_bodies_force_subdivision() {
        let bodies = vec![body_at(10.0, 10.0), body_at(400.0, 400.0)];
        let mut tree = QuadTree::new(512.0, 512.0);
        tree.build(&bodies);
        assert!(tree.node_count() >= 5, "root must have split into quadrants");
    }

    #[test]
    fn coincident_bodies_terminate_at_max_depth() {
        // Ten bodies at the same point can never be separated by
        // subdivision; MAX_DEPTH must bound the recursion.
        let bodies: Vec<Body> = (0..10).map(|_| body_at(256.0, 256.0)).collect();
        let mut tree = QuadTree::new(512.0, 512.0);
        tree.build(&bodies);

        let root = &tree.raw_nodes()[0];
        let expected_mass: f32 = bodies.iter().map(|b| b.mass).sum();
        assert!((root.total_mass - expected_mass).abs() / expected_mass < 1e-5);
    }

    #[test]
    fn out_of_bounds_body_is_ignored() {
        let bodies = vec![body_at(-50.0, 10.0)];
        let mut tree = QuadTree::new(512.0, 512.0);
        tree.build(&bodies);
        assert_eq!(tree.raw_nodes()[0].total_mass, 0.0);
    }

    #[test]
    fn lone_body_feels_no_force_from_itself() {
        let bodies = vec![body_at(100.0, 100.0)];
        let mut tree = QuadTree::new(512.0, 512.0);
        tree.build(&bodies);

        let params = GravityParams {
            g_eff: 6.6743e-11 * 50.0,
            adhesion_distance: 10.0,
            adhesion_strength: 0.2,
        };
        let acc = tree.acceleration(0, &bodies, 0.5, &params);
        assert_eq!(acc, Vec2::zero());
    }
}
