//! Viewport query engine: rectangle lookups and header pinning.

mod intersect;
mod pinning;

pub use intersect::{QueryOutcome, attributes_intersecting, brute_force_intersecting};
pub use pinning::{
    BoundsInvalidation, PinBounds, apply_pinned_headers, invalidation_for_bounds_change,
    pin_bounds, pinned_header, should_invalidate,
};
