//! Global layout defaults and the knobs that select layout policies.
//!
//! Every value here is a fallback: a [`MetricsProvider`](crate::MetricsProvider)
//! may override the per-section ones. Configuration can be loaded from JSON so
//! hosts can keep layout presets next to their other assets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::EdgeInsets;

/// Default number of attributes grouped under one union rectangle.
pub const DEFAULT_UNION_SIZE: usize = 20;

/// Policy deciding which column receives the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderDirection {
    /// Place into the column with the smallest current height.
    #[default]
    ShortestFirst,
    /// Round-robin from the leftmost column.
    LeftToRight,
    /// Round-robin from the rightmost column.
    RightToLeft,
}

impl RenderDirection {
    /// Pick the column for item `item` given the current column heights.
    ///
    /// `heights` must not be empty.
    pub fn column_for(self, item: usize, heights: &[f64]) -> usize {
        let columns = heights.len().max(1);
        match self {
            Self::ShortestFirst => shortest_column(heights),
            Self::LeftToRight => item % columns,
            Self::RightToLeft => (columns - 1) - (item % columns),
        }
    }
}

/// Which set of viewport insets narrows the content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsetReference {
    #[default]
    ContentInset,
    SafeArea,
    LayoutMargins,
}

/// Index of the first column holding the minimum height.
pub fn shortest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (idx, height) in heights.iter().enumerate().skip(1) {
        if *height < heights[best] {
            best = idx;
        }
    }
    best
}

/// Index of the first column holding the maximum height.
pub fn longest_column(heights: &[f64]) -> usize {
    let mut best = 0;
    for (idx, height) in heights.iter().enumerate().skip(1) {
        if *height > heights[best] {
            best = idx;
        }
    }
    best
}

/// Global defaults for the waterfall layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallConfig {
    pub column_count: usize,
    pub minimum_column_spacing: f64,
    pub minimum_interitem_spacing: f64,
    pub header_height: f64,
    pub footer_height: f64,
    pub section_inset: EdgeInsets,
    pub render_direction: RenderDirection,
    pub inset_reference: InsetReference,
    /// Keep section headers glued to the top of the visible bounds.
    pub pin_headers: bool,
    pub union_size: usize,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            column_count: 2,
            minimum_column_spacing: 10.0,
            minimum_interitem_spacing: 10.0,
            header_height: 0.0,
            footer_height: 0.0,
            section_inset: EdgeInsets::ZERO,
            render_direction: RenderDirection::ShortestFirst,
            inset_reference: InsetReference::ContentInset,
            pin_headers: false,
            union_size: DEFAULT_UNION_SIZE,
        }
    }
}

impl WaterfallConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.column_count == 0 {
            return Err(LayoutError::InvalidColumnCount(self.column_count));
        }
        if self.union_size == 0 {
            return Err(LayoutError::InvalidUnionSize);
        }
        check_length("minimum_column_spacing", self.minimum_column_spacing)?;
        check_length("minimum_interitem_spacing", self.minimum_interitem_spacing)?;
        check_length("header_height", self.header_height)?;
        check_length("footer_height", self.footer_height)?;
        Ok(())
    }
}

pub(crate) fn check_length(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidSpacing { field, value })
    }
}
