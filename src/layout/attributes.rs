use serde::{Deserialize, Serialize};

use crate::geometry::{EdgeInsets, Rect};

/// Stacking order given to section headers so a pinned header covers items.
pub const HEADER_Z_INDEX: i32 = 2;

/// What kind of element an attribute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Item,
    Header,
    Footer,
}

/// Supplementary element kinds, used for header/footer lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementaryKind {
    Header,
    Footer,
}

/// Placement of one element produced by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    pub kind: ElementKind,
    pub section: usize,
    /// Item index inside the section; always 0 for headers and footers.
    pub item: usize,
    pub frame: Rect,
    pub z_index: i32,
}

impl LayoutAttributes {
    pub fn item(section: usize, item: usize, frame: Rect) -> Self {
        Self {
            kind: ElementKind::Item,
            section,
            item,
            frame,
            z_index: 0,
        }
    }

    pub fn header(section: usize, frame: Rect) -> Self {
        Self {
            kind: ElementKind::Header,
            section,
            item: 0,
            frame,
            z_index: HEADER_Z_INDEX,
        }
    }

    pub fn footer(section: usize, frame: Rect) -> Self {
        Self {
            kind: ElementKind::Footer,
            section,
            item: 0,
            frame,
            z_index: 0,
        }
    }

    pub fn is_header(&self) -> bool {
        self.kind == ElementKind::Header
    }
}

/// Section metrics after overrides and clamping were applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSection {
    pub column_count: usize,
    pub interitem_spacing: f64,
    pub insets: EdgeInsets,
    pub header_height: f64,
    pub footer_height: f64,
    pub item_width: f64,
}

/// Everything a pass produced for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAttributeSet {
    /// `items[i]` is always item `i` of the section.
    pub items: Vec<LayoutAttributes>,
    pub header: Option<LayoutAttributes>,
    pub footer: Option<LayoutAttributes>,
    pub metrics: ResolvedSection,
}

impl SectionAttributeSet {
    pub fn item(&self, item: usize) -> Option<&LayoutAttributes> {
        self.items.get(item)
    }

    pub fn supplementary(&self, kind: SupplementaryKind) -> Option<&LayoutAttributes> {
        match kind {
            SupplementaryKind::Header => self.header.as_ref(),
            SupplementaryKind::Footer => self.footer.as_ref(),
        }
    }
}
