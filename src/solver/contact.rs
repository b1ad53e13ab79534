use crate::body::Body;
use crate::math::Vec2;
use crate::spatial::UniformGrid;

/// A detected overlap between two bodies. Indices, not owners: the contact
/// list never outlives the tick it was detected in.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// First body, always the smaller index
    pub a: usize,
    /// Second body, always the larger index
    pub b: usize,
    /// Unit normal pointing from a to b
    pub normal: Vec2,
    /// Overlap depth at detection time, >= 0
    pub penetration: f32,
}

fn contact_for(a: usize, b: usize, bodies: &[Body]) -> Option<Contact> {
    let delta = bodies[b].pos - bodies[a].pos;
    let radius_sum = bodies[a].radius + bodies[b].radius;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }
    // Coincident centers: fall back to unit distance so the normal stays
    // finite (it degenerates to the zero vector, which the solver tolerates).
    let mut dist = dist_sq.sqrt();
    if dist == 0.0 {
        dist = 1.0;
    }
    Some(Contact {
        a,
        b,
        normal: delta * (1.0 / dist),
        penetration: radius_sum - dist,
    })
}

/// Detect all contacts through the grid's 3x3 neighbor queries.
///
/// Pairs are canonicalized to `a < b` and emitted once, in ascending body
/// order - resolution order is therefore deterministic for a fixed
/// population, not an accident of bucket layout.
pub fn detect_contacts(
    bodies: &[Body],
    grid: &UniformGrid,
    neighbor_scratch: &mut Vec<usize>,
    out: &mut Vec<Contact>,
) {
    out.clear();
    for a in 0..bodies.len() {
        grid.neighbors_into(&bodies[a], neighbor_scratch);
        for &b in neighbor_scratch.iter() {
            // Self-pairs and the mirrored (b, a) visit are skipped here.
            if b <= a {
                continue;
            }
            if let Some(contact) = contact_for(a, b, bodies) {
                out.push(contact);
            }
        }
    }
}

/// Ground-truth O(n^2) detector. Slow; used for small populations and as
/// the oracle the grid detector is tested against.
pub fn detect_contacts_brute(bodies: &[Body], out: &mut Vec<Contact>) {
    out.clear();
    for a in 0..bodies.len() {
        for b in (a + 1)..bodies.len() {
            if let Some(contact) = contact_for(a, b, bodies) {
                out.push(contact);
            }
        }
    }
}
