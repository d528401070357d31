//! Waterfall (masonry) layout engine.
//!
//! Items with intrinsic sizes are dealt into the columns of each section so
//! the columns stay balanced. A pass yields positioned rectangles for items,
//! section headers and section footers; a coarse index of union rectangles
//! keeps viewport queries from scanning every attribute.
//!
//! ```
//! use waterfall_room::{Rect, Size, StaticMetrics, Viewport, WaterfallLayout};
//!
//! let metrics = StaticMetrics::new().with_section(vec![
//!     Size::new(150.0, 100.0),
//!     Size::new(150.0, 150.0),
//!     Size::new(150.0, 50.0),
//! ]);
//! let mut layout = WaterfallLayout::new(metrics);
//! layout.attach(Viewport::new(Rect::new(0.0, 0.0, 310.0, 480.0)));
//!
//! let third = layout.attributes_for_item(0, 2).unwrap();
//! assert_eq!((third.frame.x, third.frame.y), (0.0, 110.0));
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod index;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod provider;
pub mod query;
pub mod viewport;

pub use audit::{
    LayoutAudit, LayoutAuditEvent, LayoutAuditEventBuilder, LayoutAuditStage, NullLayoutAudit,
    RecordingAudit,
};
pub use config::{DEFAULT_UNION_SIZE, InsetReference, RenderDirection, WaterfallConfig};
pub use engine::{EngineOptions, LayoutSnapshot, WaterfallLayout};
pub use error::{LayoutError, Result};
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use index::UnionRects;
pub use layout::{
    ColumnHeightTable, ElementKind, HEADER_Z_INDEX, LayoutAttributes, LayoutOutput,
    SectionAttributeSet, SupplementaryKind, compute_layout,
};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use provider::{MetricsProvider, SectionMetrics, StaticMetrics};
pub use query::{BoundsInvalidation, PinBounds};
pub use viewport::Viewport;
