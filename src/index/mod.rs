//! Spatial index over the globally ordered attribute list.

mod union;

pub use union::UnionRects;
