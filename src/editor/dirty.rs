//! Redraw tracking for the file view.
//!
//! Stores the complement of the dirty set: the absolute rows known to be on
//! screen exactly as the document has them. Anything not recorded here
//! needs a redraw, which makes "nothing drawn yet" the empty set and lets
//! rows past the end of the document be tracked like any other row.

use std::collections::BTreeSet;
use std::ops::Range;

#[derive(Debug, Default, Clone)]
pub struct DrawnRows {
    rows: BTreeSet<usize>,
}

impl DrawnRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self, row: usize) -> bool {
        !self.rows.contains(&row)
    }

    pub fn mark_drawn(&mut self, row: usize) {
        self.rows.insert(row);
    }

    /// Mark one row as needing a redraw.
    pub fn invalidate(&mut self, row: usize) {
        self.rows.remove(&row);
    }

    /// Mark every row in `from..=to` as needing a redraw.
    pub fn invalidate_span(&mut self, from: usize, to: usize) {
        if from > to {
            return;
        }
        let stale: Vec<usize> = self.rows.range(from..=to).copied().collect();
        for row in stale {
            self.rows.remove(&row);
        }
    }

    /// Forget every row outside `visible`.
    pub fn retain_visible(&mut self, visible: Range<usize>) {
        self.rows.retain(|row| visible.contains(row));
    }

    /// Forget everything.
    pub fn invalidate_all(&mut self) {
        self.rows.clear();
    }
}
