use crate::config::{longest_column, shortest_column};

/// Running bottom edge of every column in one section.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeightTable {
    heights: Vec<f64>,
}

impl ColumnHeightTable {
    /// Create a table with `columns` entries (at least one) all set to `top`.
    pub fn new(columns: usize, top: f64) -> Self {
        Self {
            heights: vec![top; columns.max(1)],
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn height(&self, column: usize) -> Option<f64> {
        self.heights.get(column).copied()
    }

    pub fn reset(&mut self, top: f64) {
        self.heights.iter_mut().for_each(|h| *h = top);
    }

    pub fn set(&mut self, column: usize, height: f64) {
        if let Some(slot) = self.heights.get_mut(column) {
            *slot = height;
        }
    }

    pub fn shortest(&self) -> usize {
        shortest_column(&self.heights)
    }

    pub fn longest(&self) -> usize {
        longest_column(&self.heights)
    }

    pub fn max_height(&self) -> f64 {
        self.heights[self.longest()]
    }
}
