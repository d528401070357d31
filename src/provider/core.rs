use crate::geometry::{EdgeInsets, Size};

/// Source of section/item counts, per-section overrides and item sizes.
///
/// Override methods default to `None`, which makes the layout fall back to
/// the matching [`WaterfallConfig`](crate::WaterfallConfig) value. Providers
/// must report a column count of at least 1; smaller values are clamped.
pub trait MetricsProvider {
    fn section_count(&self) -> usize;

    fn item_count(&self, section: usize) -> usize;

    /// Intrinsic size of an item. Only the aspect ratio matters when the
    /// width is positive; a non-positive height yields a zero-height slot.
    fn item_size(&self, section: usize, item: usize) -> Size;

    fn column_count(&self, _section: usize) -> Option<usize> {
        None
    }

    fn minimum_interitem_spacing(&self, _section: usize) -> Option<f64> {
        None
    }

    fn insets(&self, _section: usize) -> Option<EdgeInsets> {
        None
    }

    fn header_height(&self, _section: usize) -> Option<f64> {
        None
    }

    fn footer_height(&self, _section: usize) -> Option<f64> {
        None
    }
}
