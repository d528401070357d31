//! Host-facing waterfall layout object.
//!
//! [`WaterfallLayout`] owns the configuration, the metrics provider, the
//! attached [`Viewport`] and the last computed [`LayoutSnapshot`]. Setters
//! and data changes discard the snapshot; the next query runs a fresh pass.
//! Without a viewport every query answers empty and no pass runs.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use serde_json::Value;

use crate::audit::{LayoutAudit, LayoutAuditEventBuilder, LayoutAuditStage};
use crate::config::{InsetReference, RenderDirection, WaterfallConfig, check_length};
use crate::error::{LayoutError, Result};
use crate::geometry::{EdgeInsets, Rect, Size};
use crate::index::UnionRects;
use crate::layout::{
    LayoutAttributes, LayoutOutput, SupplementaryKind, compute_layout, resolve_section,
};
use crate::logging::{
    LogLevel, Logger, TARGET_INVALIDATE, TARGET_PASS, TARGET_QUERY, event_with_fields, json_kv,
};
use crate::metrics::{LayoutMetrics, MetricSnapshot};
use crate::provider::MetricsProvider;
use crate::query::{
    BoundsInvalidation, apply_pinned_headers, attributes_intersecting,
    invalidation_for_bounds_change, pinned_header, should_invalidate,
};
use crate::viewport::Viewport;

/// Observability hooks for the engine.
#[derive(Clone, Default)]
pub struct EngineOptions {
    /// Optional structured logger used for pass and query events.
    pub logger: Option<Logger>,
    /// Metrics accumulator; `None` disables counting.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Lifecycle audit sink.
    pub audit: Option<Arc<dyn LayoutAudit>>,
}

impl EngineOptions {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Everything one pass produced, installed as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub output: LayoutOutput,
    pub index: UnionRects,
    pub content_size: Size,
}

pub struct WaterfallLayout<P> {
    config: WaterfallConfig,
    provider: P,
    viewport: Option<Viewport>,
    snapshot: Option<LayoutSnapshot>,
    options: EngineOptions,
}

impl<P: MetricsProvider> WaterfallLayout<P> {
    pub fn new(provider: P) -> Self {
        Self {
            config: WaterfallConfig::default(),
            provider,
            viewport: None,
            snapshot: None,
            options: EngineOptions::default(),
        }
    }

    pub fn with_config(provider: P, config: WaterfallConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(provider)
        })
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &WaterfallConfig {
        &self.config
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut EngineOptions {
        &mut self.options
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the data source. Any change may move items, so the
    /// current layout is discarded.
    pub fn provider_mut(&mut self) -> &mut P {
        self.invalidate();
        &mut self.provider
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn attach(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.audit(LayoutAuditStage::ViewportAttached, |b| {
            b.detail("width", viewport.bounds.width)
                .detail("height", viewport.bounds.height);
        });
        self.invalidate();
    }

    pub fn detach(&mut self) {
        self.viewport = None;
        self.snapshot = None;
        self.audit(LayoutAuditStage::ViewportDetached, |_| {});
    }

    /// Move or resize the visible bounds. A size change discards the layout;
    /// a pure scroll keeps it and only reports the headers to re-query.
    pub fn set_bounds(&mut self, bounds: Rect) -> BoundsInvalidation {
        let invalidation = self.invalidation_for_bounds_change(&bounds);
        let Some(viewport) = self.viewport.as_mut() else {
            return invalidation;
        };
        viewport.bounds = bounds;
        if invalidation.size_changed {
            self.invalidate();
        }
        invalidation
    }

    pub fn should_invalidate(&self, new_bounds: &Rect) -> bool {
        let old = self.viewport.map_or(Rect::ZERO, |v| v.bounds);
        should_invalidate(&old, new_bounds, self.config.pin_headers)
    }

    pub fn invalidation_for_bounds_change(&self, new_bounds: &Rect) -> BoundsInvalidation {
        let Some(viewport) = self.viewport else {
            return BoundsInvalidation::default();
        };
        // Resolved from the provider so a discarded snapshot still reports headers.
        let header_sections = (0..self.provider.section_count()).filter(|&section| {
            resolve_section(section, &self.provider, &self.config, &viewport).header_height > 0.0
        });
        invalidation_for_bounds_change(
            &viewport.bounds,
            new_bounds,
            self.config.pin_headers,
            header_sections,
        )
    }

    /// Discard derived state; the next query recomputes everything.
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            self.log(LogLevel::Debug, TARGET_INVALIDATE, "layout_invalidated", []);
        }
        self.audit(LayoutAuditStage::Invalidated, |_| {});
    }

    pub fn is_prepared(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Run a pass if the layout is stale. Returns `true` when a pass ran.
    pub fn prepare(&mut self) -> bool {
        if self.snapshot.is_some() {
            return false;
        }
        let Some(viewport) = self.viewport else {
            self.audit(LayoutAuditStage::PassSkipped, |b| {
                b.detail("reason", "no_viewport");
            });
            return false;
        };

        self.audit(LayoutAuditStage::PassStarted, |_| {});
        let started = Instant::now();

        let counts: Vec<usize> = (0..self.provider.section_count())
            .map(|section| self.provider.item_count(section))
            .collect();
        let output = compute_layout(&counts, &self.provider, &self.config, &viewport);
        let index = UnionRects::build(&output.attributes, self.config.union_size);
        let content_size = if output.sections.is_empty() {
            Size::ZERO
        } else {
            Size::new(
                viewport.content_width(self.config.inset_reference),
                output.content_height,
            )
        };

        let elapsed = started.elapsed();
        let items = output.item_count();
        let fields = [
            json_kv("sections", counts.len()),
            json_kv("items", items),
            json_kv("attributes", output.attributes.len()),
            json_kv("union_rects", index.len()),
            json_kv("content_height", output.content_height),
            json_kv("elapsed_us", elapsed.as_micros() as u64),
        ];

        if let Some(metrics) = &self.options.metrics {
            metrics
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record_pass(counts.len(), items, elapsed);
        }

        self.snapshot = Some(LayoutSnapshot {
            output,
            index,
            content_size,
        });
        self.log(LogLevel::Debug, TARGET_PASS, "layout_pass", fields.clone());
        self.audit(LayoutAuditStage::PassCommitted, |b| {
            for (key, value) in fields {
                b.detail(key, value);
            }
        });
        true
    }

    /// Current snapshot, running a pass first if needed.
    pub fn layout(&mut self) -> Option<&LayoutSnapshot> {
        self.prepare();
        self.snapshot.as_ref()
    }

    pub fn content_size(&mut self) -> Size {
        self.layout().map_or(Size::ZERO, |s| s.content_size)
    }

    pub fn attributes_for_item(&mut self, section: usize, item: usize) -> Option<LayoutAttributes> {
        self.layout()?
            .output
            .sections
            .get(section)?
            .item(item)
            .copied()
    }

    /// Header or footer for `section`. With pinning on, the header follows
    /// the scroll offset inside its section.
    pub fn attributes_for_supplementary(
        &mut self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<LayoutAttributes> {
        self.prepare();
        let scroll_y = self.viewport?.bounds.y;
        let set = self.snapshot.as_ref()?.output.sections.get(section)?;
        match kind {
            SupplementaryKind::Header if self.config.pin_headers => pinned_header(set, scroll_y),
            _ => set.supplementary(kind).copied(),
        }
    }

    pub fn attributes_intersecting(&mut self, rect: &Rect) -> Vec<LayoutAttributes> {
        self.prepare();
        let (Some(viewport), Some(snapshot)) = (self.viewport, self.snapshot.as_ref()) else {
            return Vec::new();
        };

        let outcome = attributes_intersecting(&snapshot.output.attributes, &snapshot.index, rect);
        let (runs_touched, scanned) = (outcome.runs_touched, outcome.scanned);
        let attributes = if self.config.pin_headers {
            apply_pinned_headers(
                outcome.attributes,
                &snapshot.output.sections,
                viewport.bounds.y,
            )
        } else {
            outcome.attributes
        };

        if let Some(metrics) = &self.options.metrics {
            metrics
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record_query(runs_touched, scanned, attributes.len());
        }
        self.log(
            LogLevel::Trace,
            TARGET_QUERY,
            "attributes_intersecting",
            [
                json_kv("runs_touched", runs_touched),
                json_kv("scanned", scanned),
                json_kv("returned", attributes.len()),
            ],
        );
        attributes
    }

    /// Column width for `section` under the current viewport, or 0 when detached.
    pub fn item_width(&self, section: usize) -> f64 {
        match &self.viewport {
            Some(viewport) => {
                resolve_section(section, &self.provider, &self.config, viewport).item_width
            }
            None => 0.0,
        }
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        self.options
            .metrics
            .as_ref()
            .map(|m| m.lock().unwrap_or_else(PoisonError::into_inner).snapshot())
    }

    /// Log the current metrics snapshot, if both metrics and a logger are set.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) = (&self.options.logger, self.metrics_snapshot()) {
            let _ = logger.log_event(snapshot.to_log_event());
        }
    }

    pub fn set_config(&mut self, config: WaterfallConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.invalidate();
        Ok(())
    }

    pub fn set_column_count(&mut self, columns: usize) -> Result<()> {
        if columns == 0 {
            return Err(LayoutError::InvalidColumnCount(columns));
        }
        self.update(|c| c.column_count = columns);
        Ok(())
    }

    pub fn set_minimum_column_spacing(&mut self, spacing: f64) -> Result<()> {
        check_length("minimum_column_spacing", spacing)?;
        self.update(|c| c.minimum_column_spacing = spacing);
        Ok(())
    }

    pub fn set_minimum_interitem_spacing(&mut self, spacing: f64) -> Result<()> {
        check_length("minimum_interitem_spacing", spacing)?;
        self.update(|c| c.minimum_interitem_spacing = spacing);
        Ok(())
    }

    pub fn set_header_height(&mut self, height: f64) -> Result<()> {
        check_length("header_height", height)?;
        self.update(|c| c.header_height = height);
        Ok(())
    }

    pub fn set_footer_height(&mut self, height: f64) -> Result<()> {
        check_length("footer_height", height)?;
        self.update(|c| c.footer_height = height);
        Ok(())
    }

    pub fn set_section_inset(&mut self, insets: EdgeInsets) {
        self.update(|c| c.section_inset = insets);
    }

    pub fn set_render_direction(&mut self, direction: RenderDirection) {
        self.update(|c| c.render_direction = direction);
    }

    pub fn set_inset_reference(&mut self, reference: InsetReference) {
        self.update(|c| c.inset_reference = reference);
    }

    pub fn set_pin_headers(&mut self, pin: bool) {
        self.update(|c| c.pin_headers = pin);
    }

    pub fn set_union_size(&mut self, union_size: usize) -> Result<()> {
        if union_size == 0 {
            return Err(LayoutError::InvalidUnionSize);
        }
        self.update(|c| c.union_size = union_size);
        Ok(())
    }

    fn update(&mut self, apply: impl FnOnce(&mut WaterfallConfig)) {
        apply(&mut self.config);
        self.invalidate();
    }

    fn log<const N: usize>(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: [(String, Value); N],
    ) {
        if let Some(logger) = &self.options.logger {
            if logger.enabled(level) {
                let _ = logger.log_event(event_with_fields(level, target, message, fields));
            }
        }
    }

    fn audit(&self, stage: LayoutAuditStage, details: impl FnOnce(&mut LayoutAuditEventBuilder)) {
        if let Some(audit) = &self.options.audit {
            let mut builder = LayoutAuditEventBuilder::new(stage);
            details(&mut builder);
            audit.record(builder.finish());
        }
    }
}

impl<P> std::fmt::Debug for WaterfallLayout<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaterfallLayout")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("prepared", &self.snapshot.is_some())
            .finish_non_exhaustive()
    }
}
