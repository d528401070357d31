use crate::geometry::Rect;
use crate::layout::{LayoutAttributes, SectionAttributeSet};

/// Vertical range a pinned header may travel within its section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinBounds {
    pub minimum: f64,
    pub maximum: f64,
}

impl PinBounds {
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset < self.minimum {
            self.minimum
        } else if offset > self.maximum {
            self.maximum
        } else {
            offset
        }
    }
}

/// Pin range for a section, or `None` when it has no header or no items.
pub fn pin_bounds(section: &SectionAttributeSet) -> Option<PinBounds> {
    let header = section.header.as_ref()?;
    let first = section.items.first()?;
    let last = section.items.last()?;
    let insets = section.metrics.insets;
    let height = header.frame.height;

    Some(PinBounds {
        minimum: first.frame.y - insets.top - height,
        maximum: last.frame.max_y() + insets.bottom - height,
    })
}

/// Header attributes moved to follow `scroll_y` inside the section's pin range.
///
/// Sections without items keep their header where the pass placed it.
pub fn pinned_header(section: &SectionAttributeSet, scroll_y: f64) -> Option<LayoutAttributes> {
    let mut header = section.header?;
    if let Some(bounds) = pin_bounds(section) {
        header.frame = header.frame.with_y(bounds.clamp(scroll_y));
    }
    Some(header)
}

/// Swap static headers in `found` for pinned ones.
///
/// Every section with at least one element in `found` gets its pinned header
/// appended, even when the static header itself was out of range.
pub fn apply_pinned_headers(
    found: Vec<LayoutAttributes>,
    sections: &[SectionAttributeSet],
    scroll_y: f64,
) -> Vec<LayoutAttributes> {
    let mut touched: Vec<usize> = Vec::new();
    let mut result: Vec<LayoutAttributes> = Vec::with_capacity(found.len() + 1);

    for attrs in found {
        if !touched.contains(&attrs.section) {
            touched.push(attrs.section);
        }
        if !attrs.is_header() {
            result.push(attrs);
        }
    }

    result.extend(
        touched
            .into_iter()
            .filter_map(|section| sections.get(section))
            .filter_map(|section| pinned_header(section, scroll_y)),
    );
    result
}

/// Whether moving from `old` to `new` bounds requires a new query pass.
pub fn should_invalidate(old: &Rect, new: &Rect, pin_headers: bool) -> bool {
    pin_headers || size_changed(old, new)
}

/// Scope of the work a bounds change triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundsInvalidation {
    /// Width or height changed: every attribute must be recomputed.
    pub size_changed: bool,
    /// Sections whose pinned header must be re-queried after a pure scroll.
    pub headers: Vec<usize>,
}

impl BoundsInvalidation {
    pub fn is_empty(&self) -> bool {
        !self.size_changed && self.headers.is_empty()
    }
}

/// `header_sections` yields the sections that carry a header; it is only
/// consumed on a pure scroll with pinning on.
pub fn invalidation_for_bounds_change(
    old: &Rect,
    new: &Rect,
    pin_headers: bool,
    header_sections: impl IntoIterator<Item = usize>,
) -> BoundsInvalidation {
    let size_changed = size_changed(old, new);
    let headers = if !size_changed && pin_headers {
        header_sections.into_iter().collect()
    } else {
        Vec::new()
    };

    BoundsInvalidation {
        size_changed,
        headers,
    }
}

fn size_changed(old: &Rect, new: &Rect) -> bool {
    old.width != new.width || old.height != new.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EdgeInsets;
    use crate::layout::ResolvedSection;

    fn section(header: bool, items: usize) -> SectionAttributeSet {
        let header_frame = Rect::new(0.0, 100.0, 320.0, 40.0);
        SectionAttributeSet {
            // header 100..140, top inset 10, items from 150 every 60.
            items: (0..items)
                .map(|i| {
                    LayoutAttributes::item(0, i, Rect::new(0.0, 150.0 + i as f64 * 60.0, 150.0, 50.0))
                })
                .collect(),
            header: header.then(|| LayoutAttributes::header(0, header_frame)),
            footer: None,
            metrics: ResolvedSection {
                column_count: 1,
                interitem_spacing: 10.0,
                insets: EdgeInsets::new(10.0, 0.0, 20.0, 0.0),
                header_height: 40.0,
                footer_height: 0.0,
                item_width: 150.0,
            },
        }
    }

    #[test]
    fn pin_bounds_follow_first_and_last_item() {
        let bounds = pin_bounds(&section(true, 3)).unwrap();
        assert_eq!(bounds.minimum, 100.0);
        // last item 270..320, + bottom inset 20, - header 40
        assert_eq!(bounds.maximum, 300.0);
    }

    #[test]
    fn header_tracks_scroll_inside_the_section() {
        let section = section(true, 3);
        assert_eq!(pinned_header(&section, 0.0).unwrap().frame.y, 100.0);
        assert_eq!(pinned_header(&section, 180.0).unwrap().frame.y, 180.0);
    }

    #[test]
    fn header_never_passes_the_section_maximum() {
        let section = section(true, 3);
        for offset in [300.0, 300.5, 1_000.0] {
            assert_eq!(pinned_header(&section, offset).unwrap().frame.y, 300.0);
        }
    }

    #[test]
    fn empty_section_keeps_static_header() {
        let empty = section(true, 0);
        assert!(pin_bounds(&empty).is_none());
        assert_eq!(pinned_header(&empty, 500.0).unwrap().frame.y, 100.0);
        assert!(pinned_header(&section(false, 2), 0.0).is_none());
    }

    #[test]
    fn pinned_headers_are_added_once_per_section() {
        let sections = vec![section(true, 3)];
        let found = vec![sections[0].items[1], sections[0].items[2]];
        let result = apply_pinned_headers(found, &sections, 200.0);
        assert_eq!(result.len(), 3);
        let header = result.last().unwrap();
        assert!(header.is_header());
        assert_eq!(header.frame.y, 200.0);
    }

    #[test]
    fn pure_scroll_only_invalidates_when_pinning() {
        let old = Rect::new(0.0, 0.0, 320.0, 480.0);
        let scrolled = Rect::new(0.0, 200.0, 320.0, 480.0);
        let resized = Rect::new(0.0, 0.0, 480.0, 320.0);

        assert!(!should_invalidate(&old, &scrolled, false));
        assert!(should_invalidate(&old, &scrolled, true));
        assert!(should_invalidate(&old, &resized, false));

        let scroll = invalidation_for_bounds_change(&old, &scrolled, true, [0, 2]);
        assert!(!scroll.size_changed);
        assert_eq!(scroll.headers, vec![0, 2]);

        let resize = invalidation_for_bounds_change(&old, &resized, true, [0, 2]);
        assert!(resize.size_changed);
        assert!(resize.headers.is_empty());
        assert!(invalidation_for_bounds_change(&old, &scrolled, false, [0, 2]).is_empty());
    }
}
