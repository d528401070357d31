use serde::{Deserialize, Serialize};

use crate::config::InsetReference;
use crate::geometry::{EdgeInsets, Point, Rect};

/// Host-supplied description of the scrollable area the layout fills.
///
/// `bounds.x/y` is the current scroll offset and `bounds.width/height` the
/// visible size. The three inset sets mirror what a host scroll view
/// exposes; [`InsetReference`] picks which one narrows the content width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub bounds: Rect,
    pub content_inset: EdgeInsets,
    pub safe_area: EdgeInsets,
    pub layout_margins: EdgeInsets,
}

impl Viewport {
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            content_inset: EdgeInsets::ZERO,
            safe_area: EdgeInsets::ZERO,
            layout_margins: EdgeInsets::ZERO,
        }
    }

    pub fn with_content_inset(mut self, insets: EdgeInsets) -> Self {
        self.content_inset = insets;
        self
    }

    pub fn with_safe_area(mut self, insets: EdgeInsets) -> Self {
        self.safe_area = insets;
        self
    }

    pub fn with_layout_margins(mut self, insets: EdgeInsets) -> Self {
        self.layout_margins = insets;
        self
    }

    pub fn scroll_offset(&self) -> Point {
        self.bounds.origin()
    }

    pub fn insets_for(&self, reference: InsetReference) -> EdgeInsets {
        match reference {
            InsetReference::ContentInset => self.content_inset,
            InsetReference::SafeArea => self.safe_area,
            InsetReference::LayoutMargins => self.layout_margins,
        }
    }

    /// Width available to sections once the referenced insets are removed.
    pub fn content_width(&self, reference: InsetReference) -> f64 {
        self.bounds.width - self.insets_for(reference).horizontal()
    }
}
