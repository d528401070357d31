//! Layout module orchestrator.
//!
//! The builder turns counts and intrinsic sizes into positioned attributes;
//! the attribute and column types live in their own files so the index and
//! query modules can depend on them without pulling in the builder.

mod attributes;
mod builder;
mod columns;

pub use attributes::{
    ElementKind, HEADER_Z_INDEX, LayoutAttributes, ResolvedSection, SectionAttributeSet,
    SupplementaryKind,
};
pub use builder::{LayoutOutput, compute_layout, item_width, resolve_section, scaled_height};
pub use columns::ColumnHeightTable;
