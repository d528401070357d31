use std::ops::Range;

use crate::config::DEFAULT_UNION_SIZE;
use crate::geometry::Rect;
use crate::layout::LayoutAttributes;

/// Coarse bounding boxes over fixed-size runs of attributes.
///
/// `rects[k]` bounds attributes `[k * union_size, min((k + 1) * union_size, total))`.
/// Each box covers every member of its run, so a query that misses a box
/// cannot hit any attribute inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionRects {
    rects: Vec<Rect>,
    union_size: usize,
    total: usize,
}

impl Default for UnionRects {
    fn default() -> Self {
        Self {
            rects: Vec::new(),
            union_size: DEFAULT_UNION_SIZE,
            total: 0,
        }
    }
}

impl UnionRects {
    pub fn build(attributes: &[LayoutAttributes], union_size: usize) -> Self {
        let union_size = union_size.max(1);
        let rects = attributes
            .chunks(union_size)
            .filter_map(|run| {
                let (first, rest) = run.split_first()?;
                Some(
                    rest.iter()
                        .fold(first.frame, |acc, attrs| acc.union(&attrs.frame)),
                )
            })
            .collect();

        Self {
            rects,
            union_size,
            total: attributes.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn union_size(&self) -> usize {
        self.union_size
    }

    /// Attribute indices covered by run `run`.
    pub fn run_range(&self, run: usize) -> Range<usize> {
        let start = (run * self.union_size).min(self.total);
        let end = ((run + 1) * self.union_size).min(self.total);
        start..end
    }

    /// First and last runs whose box intersects `query`, inclusive.
    pub fn intersecting_runs(&self, query: &Rect) -> Option<(usize, usize)> {
        let first = self.rects.iter().position(|r| r.intersects(query))?;
        let last = self.rects.iter().rposition(|r| r.intersects(query))?;
        Some((first, last))
    }

    /// Attribute indices that need a precise check against `query`.
    pub fn candidate_range(&self, query: &Rect) -> Range<usize> {
        match self.intersecting_runs(query) {
            Some((first, last)) => self.run_range(first).start..self.run_range(last).end,
            None => 0..0,
        }
    }
}
