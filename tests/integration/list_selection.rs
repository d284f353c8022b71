//! "Select all" over partially loaded result sets.

use pickset::{AllSelected, ListSelectionState, Membership, SelectedIds};

fn page(ids: &[u32], hits: usize) -> ListSelectionState<u32> {
    ListSelectionState::new("status:open", ids.to_vec(), hits)
}

#[test]
fn select_all_when_fully_loaded_marks_each_item() {
    let mut state = page(&[1, 2, 3], 3);
    state.select_all();

    for id in [1, 2, 3] {
        assert_eq!(state.is_selected(&id), Membership::Selected);
    }
    assert_eq!(state.count_selected(), 3);
}

#[test]
fn select_all_while_paging_reports_sentinel() {
    let mut state = page(&[1, 2, 3], 40);
    state.select_all();

    assert_eq!(state.is_selected(&2), Membership::AllSelected);
    assert!(state.is_selected(&2).is_selected());
    assert_eq!(state.is_all_selected(), AllSelected::Yes);
    assert_eq!(state.selected_ids(), SelectedIds::All);
}

#[test]
fn toggle_from_all_is_ignored_until_loaded() {
    let mut state = page(&[1, 2, 3], 40);
    state.select_all();

    state.toggle_selected(&2);
    assert_eq!(state.count_selected(), 40);

    // Remaining pages arrive.
    let all: Vec<u32> = (1..=40).collect();
    state.sync("status:open", all, 40);
    state.toggle_selected(&2);

    assert_eq!(state.count_selected(), 39);
    assert_eq!(state.is_selected(&2), Membership::Unselected);
    assert_eq!(state.is_all_selected(), AllSelected::Indeterminate);
}

#[test]
fn new_query_clears_selection() {
    let mut state = page(&[1, 2, 3], 3);
    state.toggle_selected_many(&[1, 3]);
    assert_eq!(state.selected_ids(), SelectedIds::Ids(vec![1, 3]));

    state.sync("status:closed", vec![7, 8], 2);

    assert!(!state.is_any_selected());
    assert_eq!(state.is_all_selected(), AllSelected::No);
}

#[test]
fn selecting_every_hit_by_hand_counts_as_all() {
    let mut state = page(&[1, 2], 2);
    state.toggle_selected(&1);
    assert_eq!(state.is_all_selected(), AllSelected::Indeterminate);

    state.toggle_selected(&2);
    assert_eq!(state.is_all_selected(), AllSelected::Yes);

    state.deselect_all();
    assert_eq!(state.count_selected(), 0);
}
