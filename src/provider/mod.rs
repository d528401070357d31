//! Metrics provider orchestrator.
//!
//! The layout pulls counts, per-section overrides and item sizes through the
//! [`MetricsProvider`] trait. [`StaticMetrics`] is a ready-made provider backed
//! by plain data with an explicit override map per section.

mod core;
mod static_metrics;

pub use core::MetricsProvider;
pub use static_metrics::{SectionMetrics, StaticMetrics};
