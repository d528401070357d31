//! Error types shared by the configuration surface.

mod types;

pub use types::{LayoutError, Result};
