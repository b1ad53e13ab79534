//! Spatial acceleration structures.
//!
//! The uniform grid answers short-range neighbor queries for contact
//! detection; the quadtree answers approximate long-range gravity queries.
//! Both are rebuilt by the engine every tick and never mutated externally
//! mid-tick.

pub mod grid;
pub mod quadtree;

pub use grid::UniformGrid;
pub use quadtree::QuadTree;
