//! Windowing over measured and estimated rows.

use pickset::viewport::{self, Align, RowMeasurements};

#[test]
fn measured_rows_shift_the_window() {
    let mut rows = RowMeasurements::new(100, 20.0);
    assert_eq!(rows.visible_range(0.0, 100.0), Some((0, 4)));

    rows.measure(0, 60.0);
    rows.measure(1, 60.0);

    assert_eq!(rows.visible_range(0.0, 100.0), Some((0, 1)));
    assert_eq!(rows.unmeasured_in(100.0, 60.0), vec![2, 3]);
    assert_eq!(rows.total_size(), 60.0 * 2.0 + 20.0 * 98.0);
}

#[test]
fn jump_to_selected_rows_outside_window() {
    let rows = RowMeasurements::new(50, 10.0);
    let window = rows.visible_range(100.0, 50.0);
    assert_eq!(window, Some((10, 14)));

    let selected = [3, 12, 30];
    let next = viewport::next_highlighted(window, &selected);
    let previous = viewport::previous_highlighted(window, &selected);
    assert_eq!(next, Some(30));
    assert_eq!(previous, Some(3));

    let offset = viewport::scroll_offset_for(30, &rows.rows(), 50.0, Align::Start);
    assert_eq!(rows.visible_range(offset, 50.0), Some((30, 34)));
}

#[test]
fn empty_list_has_no_window() {
    let rows = RowMeasurements::new(0, 10.0);
    assert!(rows.is_empty());
    assert_eq!(rows.visible_range(0.0, 100.0), None);
    assert_eq!(viewport::next_highlighted(None, &[]), None);
}
