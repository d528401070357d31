use crate::config::WaterfallConfig;
use crate::geometry::{Rect, Size};
use crate::provider::MetricsProvider;
use crate::viewport::Viewport;

use super::attributes::{LayoutAttributes, ResolvedSection, SectionAttributeSet};
use super::columns::ColumnHeightTable;

/// Output of a single layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutOutput {
    /// Headers, items and footers in emission order.
    pub attributes: Vec<LayoutAttributes>,
    pub sections: Vec<SectionAttributeSet>,
    pub column_heights: Vec<ColumnHeightTable>,
    pub content_height: f64,
}

impl LayoutOutput {
    pub fn headers(&self) -> impl Iterator<Item = &LayoutAttributes> {
        self.sections.iter().filter_map(|s| s.header.as_ref())
    }

    pub fn footers(&self) -> impl Iterator<Item = &LayoutAttributes> {
        self.sections.iter().filter_map(|s| s.footer.as_ref())
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Place every header, item and footer for `item_counts.len()` sections.
///
/// Sections are stacked vertically. Inside a section each item goes to the
/// column chosen by the configured [`RenderDirection`](crate::RenderDirection);
/// once the section is done all its columns are flattened to the section's
/// bottom so the next section starts flush.
///
/// The bottom edge always gives back one inter-item spacing, so a section
/// with no items, header or footer pulls the running top up by that spacing
/// and a layout made only of such sections reports a negative height.
pub fn compute_layout<P>(
    item_counts: &[usize],
    provider: &P,
    config: &WaterfallConfig,
    viewport: &Viewport,
) -> LayoutOutput
where
    P: MetricsProvider + ?Sized,
{
    if item_counts.is_empty() {
        return LayoutOutput::default();
    }

    let full_width = viewport.bounds.width;
    let column_spacing = non_negative(config.minimum_column_spacing);

    let mut output = LayoutOutput {
        attributes: Vec::with_capacity(item_counts.iter().sum::<usize>() + item_counts.len() * 2),
        sections: Vec::with_capacity(item_counts.len()),
        column_heights: Vec::with_capacity(item_counts.len()),
        content_height: 0.0,
    };
    let mut top = 0.0_f64;

    for (section, &item_count) in item_counts.iter().enumerate() {
        let metrics = resolve_section(section, provider, config, viewport);
        let mut columns = ColumnHeightTable::new(metrics.column_count, top);

        let header = if metrics.header_height > 0.0 {
            let attrs = LayoutAttributes::header(
                section,
                Rect::new(0.0, top, full_width, metrics.header_height),
            );
            output.attributes.push(attrs);
            top = attrs.frame.max_y();
            Some(attrs)
        } else {
            None
        };

        top += metrics.insets.top;
        columns.reset(top);

        let mut items = Vec::with_capacity(item_count);
        for idx in 0..item_count {
            let column = config.render_direction.column_for(idx, columns.heights());
            let x = metrics.insets.left + column as f64 * (metrics.item_width + column_spacing);
            let y = columns.height(column).unwrap_or(top);
            let height = scaled_height(provider.item_size(section, idx), metrics.item_width);

            let attrs =
                LayoutAttributes::item(section, idx, Rect::new(x, y, metrics.item_width, height));
            items.push(attrs);
            output.attributes.push(attrs);
            columns.set(column, attrs.frame.max_y() + metrics.interitem_spacing);
        }

        top = columns.max_height() - metrics.interitem_spacing + metrics.insets.bottom;

        let footer = if metrics.footer_height > 0.0 {
            let attrs = LayoutAttributes::footer(
                section,
                Rect::new(0.0, top, full_width, metrics.footer_height),
            );
            output.attributes.push(attrs);
            top = attrs.frame.max_y();
            Some(attrs)
        } else {
            None
        };

        columns.reset(top);
        output.column_heights.push(columns);
        output.sections.push(SectionAttributeSet {
            items,
            header,
            footer,
            metrics,
        });
    }

    output.content_height = output
        .column_heights
        .last()
        .and_then(|table| table.height(0))
        .unwrap_or(0.0);
    output
}

/// Apply provider overrides on top of the global defaults for `section`.
pub fn resolve_section<P>(
    section: usize,
    provider: &P,
    config: &WaterfallConfig,
    viewport: &Viewport,
) -> ResolvedSection
where
    P: MetricsProvider + ?Sized,
{
    let column_count = provider
        .column_count(section)
        .unwrap_or(config.column_count)
        .max(1);
    let insets = provider.insets(section).unwrap_or(config.section_inset);
    let content_width = viewport.content_width(config.inset_reference) - insets.horizontal();

    ResolvedSection {
        column_count,
        interitem_spacing: non_negative(
            provider
                .minimum_interitem_spacing(section)
                .unwrap_or(config.minimum_interitem_spacing),
        ),
        insets,
        header_height: provider
            .header_height(section)
            .unwrap_or(config.header_height),
        footer_height: provider
            .footer_height(section)
            .unwrap_or(config.footer_height),
        item_width: item_width(
            content_width,
            column_count,
            non_negative(config.minimum_column_spacing),
        ),
    }
}

/// Width shared by every column of a section, floored to whole units.
pub fn item_width(content_width: f64, column_count: usize, column_spacing: f64) -> f64 {
    let columns = column_count.max(1) as f64;
    ((content_width - (columns - 1.0) * column_spacing) / columns)
        .floor()
        .max(0.0)
}

/// Height of an item once its intrinsic size is fitted to the column width.
pub fn scaled_height(intrinsic: Size, item_width: f64) -> f64 {
    if !(intrinsic.height > 0.0) {
        return 0.0;
    }
    if intrinsic.width > 0.0 {
        (intrinsic.height * item_width / intrinsic.width).floor()
    } else {
        intrinsic.height
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
