use crate::geometry::Rect;
use crate::index::UnionRects;
use crate::layout::LayoutAttributes;

/// Result of a rectangle query plus the work it took.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome {
    pub attributes: Vec<LayoutAttributes>,
    pub runs_touched: usize,
    pub scanned: usize,
}

/// Attributes whose frame intersects `query`, in emission order.
///
/// Only the slice between the first and last intersecting union box is
/// scanned; each candidate is then checked against its real frame.
pub fn attributes_intersecting(
    attributes: &[LayoutAttributes],
    index: &UnionRects,
    query: &Rect,
) -> QueryOutcome {
    let Some((first, last)) = index.intersecting_runs(query) else {
        return QueryOutcome::default();
    };

    let start = index.run_range(first).start;
    let end = index.run_range(last).end.min(attributes.len());
    let candidates = attributes.get(start..end).unwrap_or_default();

    QueryOutcome {
        attributes: candidates
            .iter()
            .filter(|attrs| attrs.frame.intersects(query))
            .copied()
            .collect(),
        runs_touched: last - first + 1,
        scanned: candidates.len(),
    }
}

/// Reference implementation: a full linear scan.
pub fn brute_force_intersecting(attributes: &[LayoutAttributes], query: &Rect) -> Vec<LayoutAttributes> {
    attributes
        .iter()
        .filter(|attrs| attrs.frame.intersects(query))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize) -> Vec<LayoutAttributes> {
        (0..rows * 2)
            .map(|i| {
                let col = (i % 2) as f64;
                let row = (i / 2) as f64;
                LayoutAttributes::item(0, i, Rect::new(col * 60.0, row * 30.0, 50.0, 25.0))
            })
            .collect()
    }

    #[test]
    fn scans_only_the_touched_runs() {
        let attrs = grid(50);
        let index = UnionRects::build(&attrs, 10);
        let query = Rect::new(0.0, 310.0, 200.0, 40.0);

        let outcome = attributes_intersecting(&attrs, &index, &query);
        assert_eq!(outcome.attributes, brute_force_intersecting(&attrs, &query));
        assert_eq!(outcome.runs_touched, 1);
        assert_eq!(outcome.scanned, 10);
        assert!(outcome.scanned < attrs.len());
    }

    #[test]
    fn query_outside_content_is_empty() {
        let attrs = grid(5);
        let index = UnionRects::build(&attrs, 4);
        let outcome = attributes_intersecting(&attrs, &index, &Rect::new(0.0, 1000.0, 10.0, 10.0));
        assert!(outcome.attributes.is_empty());
        assert_eq!(outcome.scanned, 0);
    }
}
