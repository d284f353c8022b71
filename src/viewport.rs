//! Visible-row windows for virtualized lists.
//!
//! Rows are described by `(start, size)` pairs in scroll coordinates, as a
//! virtualizer reports them. Rows of unknown height use an estimate until
//! they are measured.

/// Where to place a row when scrolling it into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// Inclusive index range of rows intersecting `[offset, offset + height)`.
///
/// Rows must be ordered by `start`. Returns `None` when nothing is visible.
pub fn visible_range(offset: f64, height: f64, rows: &[(f64, f64)]) -> Option<(usize, usize)> {
    if height <= 0.0 {
        return None;
    }
    let end = offset + height;

    // First row whose bottom edge is below the top of the viewport.
    let first = rows.partition_point(|&(start, size)| start + size <= offset);
    let &(first_start, _) = rows.get(first)?;
    if first_start >= end {
        return None;
    }

    // Rows starting before the bottom of the viewport.
    let past_last = rows.partition_point(|&(start, _)| start < end);
    if past_last <= first {
        return None;
    }
    Some((first, past_last - 1))
}

/// First highlighted index after the visible window.
///
/// `highlighted` must be sorted ascending.
pub fn next_highlighted(window: Option<(usize, usize)>, highlighted: &[usize]) -> Option<usize> {
    let after = window.map_or(0, |(_, last)| last + 1);
    let idx = highlighted.partition_point(|&i| i < after);
    highlighted.get(idx).copied()
}

/// Last highlighted index before the visible window.
///
/// `highlighted` must be sorted ascending.
pub fn previous_highlighted(
    window: Option<(usize, usize)>,
    highlighted: &[usize],
) -> Option<usize> {
    let (first, _) = window?;
    let idx = highlighted.partition_point(|&i| i < first);
    idx.checked_sub(1).map(|i| highlighted[i])
}

/// Scroll offset that shows row `index` with the given alignment.
pub fn scroll_offset_for(index: usize, rows: &[(f64, f64)], height: f64, align: Align) -> f64 {
    let Some(&(start, size)) = rows.get(index) else {
        return 0.0;
    };
    let offset = match align {
        Align::Start => start,
        Align::Center => start + size / 2.0 - height / 2.0,
        Align::End => start + size - height,
    };
    offset.max(0.0)
}

/// Row sizes, measured lazily.
#[derive(Debug, Clone)]
pub struct RowMeasurements {
    estimated_size: f64,
    sizes: Vec<Option<f64>>,
}

impl RowMeasurements {
    pub fn new(count: usize, estimated_size: f64) -> Self {
        Self {
            estimated_size,
            sizes: vec![None; count],
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Change the row count, keeping measurements of surviving rows.
    pub fn resize(&mut self, count: usize) {
        self.sizes.resize(count, None);
    }

    /// Record the measured size of a row. Out of range indices are ignored.
    pub fn measure(&mut self, index: usize, size: f64) {
        if let Some(slot) = self.sizes.get_mut(index) {
            *slot = Some(size);
        }
    }

    /// Forget a measurement, e.g. after the row's content changed.
    pub fn invalidate(&mut self, index: usize) {
        if let Some(slot) = self.sizes.get_mut(index) {
            *slot = None;
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.sizes.get(index).is_some_and(Option::is_some)
    }

    pub fn size(&self, index: usize) -> f64 {
        self.sizes
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.estimated_size)
    }

    /// `(start, size)` of every row.
    pub fn rows(&self) -> Vec<(f64, f64)> {
        let mut start = 0.0;
        (0..self.sizes.len())
            .map(|i| {
                let size = self.size(i);
                let row = (start, size);
                start += size;
                row
            })
            .collect()
    }

    pub fn total_size(&self) -> f64 {
        (0..self.sizes.len()).map(|i| self.size(i)).sum()
    }

    pub fn visible_range(&self, offset: f64, height: f64) -> Option<(usize, usize)> {
        visible_range(offset, height, &self.rows())
    }

    /// Visible rows that still need measuring.
    pub fn unmeasured_in(&self, offset: f64, height: f64) -> Vec<usize> {
        self.visible_range(offset, height)
            .map(|(first, last)| (first..=last).filter(|&i| !self.is_measured(i)).collect())
            .unwrap_or_default()
    }
}
