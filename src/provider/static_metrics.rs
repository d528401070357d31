use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{EdgeInsets, Size};

use super::MetricsProvider;

/// Overrides for a single section. Unset fields fall back to global defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMetrics {
    pub column_count: Option<usize>,
    pub minimum_interitem_spacing: Option<f64>,
    pub insets: Option<EdgeInsets>,
    pub header_height: Option<f64>,
    pub footer_height: Option<f64>,
}

/// Data-backed provider: item sizes per section plus sparse overrides.
///
/// ```
/// use waterfall_room::{Size, StaticMetrics};
///
/// let metrics = StaticMetrics::new()
///     .with_section(vec![Size::new(100.0, 150.0), Size::new(100.0, 80.0)])
///     .with_column_count(0, 3);
/// assert_eq!(metrics.sections().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMetrics {
    sections: Vec<Vec<Size>>,
    overrides: BTreeMap<usize, SectionMetrics>,
}

impl StaticMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_section(mut self, items: Vec<Size>) -> Self {
        self.sections.push(items);
        self
    }

    pub fn push_section(&mut self, items: Vec<Size>) -> usize {
        self.sections.push(items);
        self.sections.len() - 1
    }

    /// Append an item to `section`, returning `false` when the section does not exist.
    pub fn push_item(&mut self, section: usize, size: Size) -> bool {
        match self.sections.get_mut(section) {
            Some(items) => {
                items.push(size);
                true
            }
            None => false,
        }
    }

    pub fn sections(&self) -> &[Vec<Size>] {
        &self.sections
    }

    pub fn section_overrides_mut(&mut self, section: usize) -> &mut SectionMetrics {
        self.overrides.entry(section).or_default()
    }

    pub fn with_column_count(mut self, section: usize, columns: usize) -> Self {
        self.section_overrides_mut(section).column_count = Some(columns);
        self
    }

    pub fn with_interitem_spacing(mut self, section: usize, spacing: f64) -> Self {
        self.section_overrides_mut(section).minimum_interitem_spacing = Some(spacing);
        self
    }

    pub fn with_insets(mut self, section: usize, insets: EdgeInsets) -> Self {
        self.section_overrides_mut(section).insets = Some(insets);
        self
    }

    pub fn with_header_height(mut self, section: usize, height: f64) -> Self {
        self.section_overrides_mut(section).header_height = Some(height);
        self
    }

    pub fn with_footer_height(mut self, section: usize, height: f64) -> Self {
        self.section_overrides_mut(section).footer_height = Some(height);
        self
    }

    fn overrides(&self, section: usize) -> Option<&SectionMetrics> {
        self.overrides.get(&section)
    }
}

impl MetricsProvider for StaticMetrics {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    fn item_size(&self, section: usize, item: usize) -> Size {
        self.sections
            .get(section)
            .and_then(|items| items.get(item))
            .copied()
            .unwrap_or(Size::ZERO)
    }

    fn column_count(&self, section: usize) -> Option<usize> {
        self.overrides(section).and_then(|o| o.column_count)
    }

    fn minimum_interitem_spacing(&self, section: usize) -> Option<f64> {
        self.overrides(section)
            .and_then(|o| o.minimum_interitem_spacing)
    }

    fn insets(&self, section: usize) -> Option<EdgeInsets> {
        self.overrides(section).and_then(|o| o.insets)
    }

    fn header_height(&self, section: usize) -> Option<f64> {
        self.overrides(section).and_then(|o| o.header_height)
    }

    fn footer_height(&self, section: usize) -> Option<f64> {
        self.overrides(section).and_then(|o| o.footer_height)
    }
}
