use thiserror::Error;

/// Unified result type for the waterfall layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced while configuring the layout engine.
///
/// Layout passes and queries never fail; degenerate values coming from a
/// metrics provider are clamped instead. These errors only guard the global
/// configuration surface.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("column count must be at least 1, got {0}")]
    InvalidColumnCount(usize),
    #[error("`{field}` must be a finite, non-negative number, got {value}")]
    InvalidSpacing { field: &'static str, value: f64 },
    #[error("union size must be at least 1")]
    InvalidUnionSize,
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
