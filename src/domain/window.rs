//! Selector list windowing
//!
//! Fixed-row-height viewport math for the token selector: given a scroll
//! offset and a viewport height, compute which rows intersect the viewport
//! plus a bounded overscan margin. Arbitrarily large catalogs then render
//! at bounded cost, and the math is testable without a rendering harness.

use std::ops::Range;

/// Defaults matching the selector's fixed 50px rows with 30 rows of
/// overscan on each side.
pub const DEFAULT_ROW_HEIGHT: u32 = 50;
pub const DEFAULT_OVERSCAN: usize = 30;

/// Visible-range calculator for a fixed-row-height list.
#[derive(Debug, Clone, Copy)]
pub struct ListWindow {
    row_height: u32,
    overscan: usize,
}

impl ListWindow {
    pub fn new(row_height: u32, overscan: usize) -> Self {
        // A zero row height would make every row "visible".
        let row_height = row_height.max(1);
        Self { row_height, overscan }
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Rows intersecting `[scroll_top, scroll_top + viewport_height)` plus
    /// the overscan margin, clamped to `[0, item_count)`. Recomputed on
    /// every scroll; half-covered rows at both edges count as visible.
    pub fn visible_range(
        &self,
        scroll_top: u32,
        viewport_height: u32,
        item_count: usize,
    ) -> Range<usize> {
        if item_count == 0 || viewport_height == 0 {
            return 0..0;
        }

        let first = (scroll_top / self.row_height) as usize;
        let last = ((scroll_top + viewport_height - 1) / self.row_height) as usize;

        let start = first.saturating_sub(self.overscan).min(item_count);
        let end = (last + 1 + self.overscan).min(item_count);
        start..end
    }

    /// Total pixel height of the full list, for scrollbar sizing.
    pub fn total_height(&self, item_count: usize) -> u64 {
        item_count as u64 * self.row_height as u64
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT, DEFAULT_OVERSCAN)
    }
}
