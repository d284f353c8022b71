//! End-to-end interaction sessions against `StagedSelection`.

use pickset::{Modifier, OptionEntry, OptionList, Section, SectionToggle, SelectOption};

use crate::common::{Selection, one_two_three, persist};

fn ctrl_click(sel: &mut Selection, value: &'static str) {
    sel.modifiers_mut().press(Modifier::Control);
    sel.click(&value);
    sel.modifiers_mut().release(Modifier::Control);
}

fn shift_click(sel: &mut Selection, value: &'static str) {
    sel.modifiers_mut().press(Modifier::Shift);
    sel.click(&value);
    sel.modifiers_mut().release(Modifier::Shift);
}

#[test]
fn forward_range_selects_everything_between() {
    let mut sel = one_two_three();
    sel.open_menu();

    ctrl_click(&mut sel, "one");
    shift_click(&mut sel, "three");

    assert_eq!(sel.staged_value(), Some(&["one", "two", "three"][..]));
    assert!(sel.host().changes.is_empty());
}

#[test]
fn backward_range_selects_the_same_set() {
    let mut sel = one_two_three();
    sel.open_menu();

    ctrl_click(&mut sel, "three");
    shift_click(&mut sel, "one");

    assert_eq!(sel.staged_value(), Some(&["one", "two", "three"][..]));
}

#[test]
fn range_on_selected_target_deselects_the_range() {
    let mut sel = one_two_three().with_value(vec!["one", "two", "three"]);
    sel.open_menu();

    ctrl_click(&mut sel, "one");
    assert_eq!(sel.staged_value(), Some(&["two", "three"][..]));

    // "three" is selected, so the whole range one..three is cleared.
    shift_click(&mut sel, "three");
    assert_eq!(sel.staged_value(), Some(&[][..]));
}

#[test]
fn first_shift_click_in_session_replaces_selection() {
    let mut sel = one_two_three().with_value(vec!["one"]);
    sel.open_menu();

    shift_click(&mut sel, "three");

    assert_eq!(sel.host().changes, vec![vec!["three"]]);
    assert_eq!(sel.host().replaced, vec!["three"]);
    assert_eq!(sel.staged_value(), None);
}

#[test]
fn reopening_menu_forgets_the_anchor() {
    let mut sel = one_two_three();
    sel.open_menu();

    ctrl_click(&mut sel, "one");
    sel.close_menu();
    assert_eq!(sel.host().changes, vec![vec!["one"]]);
    persist(&mut sel);

    sel.open_menu();
    assert_eq!(sel.anchor(), None);
    shift_click(&mut sel, "three");

    assert_eq!(sel.host().changes.last(), Some(&vec!["three"]));
}

#[test]
fn changing_filter_forgets_the_anchor() {
    let mut sel = one_two_three();
    sel.open_menu();

    ctrl_click(&mut sel, "one");
    sel.handle_search("t");
    assert_eq!(sel.anchor(), None);

    shift_click(&mut sel, "three");
    assert_eq!(sel.host().changes.last(), Some(&vec!["three"]));
}

#[test]
fn range_skips_options_hidden_by_filter() {
    let mut sel = one_two_three();
    sel.open_menu();
    // "e" matches One and Three but not Two.
    sel.handle_search("e");
    assert_eq!(sel.visible_values(), vec!["one", "three"]);

    ctrl_click(&mut sel, "one");
    shift_click(&mut sel, "three");

    assert_eq!(sel.staged_value(), Some(&["one", "three"][..]));
    assert!(!sel.is_selected(&"two"));
}

#[test]
fn bulk_change_commits_even_with_modifiers_held() {
    let mut sel = one_two_three();
    sel.open_menu();
    ctrl_click(&mut sel, "one");

    sel.modifiers_mut().press(Modifier::Control);
    sel.modifiers_mut().press(Modifier::Shift);
    sel.handle_change(&["one", "two", "three"]);

    assert_eq!(sel.host().changes, vec![vec!["one", "two", "three"]]);
    assert_eq!(sel.staged_value(), None);
}

#[test]
fn shift_wins_over_toggle_modifier() {
    let mut sel = one_two_three();
    sel.open_menu();
    ctrl_click(&mut sel, "one");

    sel.modifiers_mut().press(Modifier::Control);
    sel.modifiers_mut().press(Modifier::Shift);
    sel.click(&"three");

    assert_eq!(sel.staged_value(), Some(&["one", "two", "three"][..]));
}

#[test]
fn shift_and_toggle_modifier_without_anchor_stages_toggle() {
    let mut sel = one_two_three().with_value(vec!["one"]);
    sel.open_menu();

    sel.modifiers_mut().press(Modifier::Control);
    sel.modifiers_mut().press(Modifier::Shift);
    sel.click(&"three");

    // No range is possible yet, so the toggle modifier applies.
    assert_eq!(sel.staged_value(), Some(&["one", "three"][..]));
    assert!(sel.host().changes.is_empty());
    assert!(sel.host().replaced.is_empty());
    assert_eq!(sel.anchor(), Some(&"three"));
}

#[test]
fn double_toggle_restores_original_set() {
    let mut sel = one_two_three().with_value(vec!["two"]);
    sel.open_menu();

    for value in ["one", "three", "two", "three", "one"] {
        sel.toggle_option(&value);
    }
    // one and three toggled twice, two once.
    assert_eq!(sel.staged_value(), Some(&[][..]));

    sel.toggle_option(&"two");
    assert_eq!(sel.current_value(), &["two"]);
    assert!(!sel.has_staged_changes());
}

#[test]
fn staged_changes_cleared_after_commit_and_remove() {
    let mut sel = one_two_three();
    assert!(!sel.has_staged_changes());

    sel.toggle_option(&"one");
    assert!(sel.has_staged_changes());
    sel.remove_staged_changes();
    assert!(!sel.has_staged_changes());

    sel.toggle_option(&"two");
    sel.commit(vec!["two"]);
    assert!(!sel.has_staged_changes());
}

#[test]
fn escape_applies_staged_changes() {
    let mut sel = one_two_three();
    sel.open_menu();
    ctrl_click(&mut sel, "two");
    ctrl_click(&mut sel, "three");

    sel.handle_escape();

    assert_eq!(sel.host().changes, vec![vec!["two", "three"]]);
}

#[test]
fn disabled_commit_discards_on_close() {
    let mut sel = one_two_three().with_max_selected(Some(1));
    sel.open_menu();
    ctrl_click(&mut sel, "one");
    ctrl_click(&mut sel, "two");
    assert!(sel.commit_disabled());

    sel.close_menu();

    assert!(sel.host().changes.is_empty());
    assert_eq!(sel.staged_value(), None);
}

#[test]
fn reset_commits_default_and_notifies() {
    let mut sel = one_two_three()
        .with_value(vec!["two"])
        .with_default_value(vec!["one"]);
    assert!(sel.should_show_reset());

    sel.handle_reset();
    persist(&mut sel);

    assert_eq!(sel.host().changes, vec![vec!["one"]]);
    assert_eq!(sel.host().resets, 1);
    assert!(!sel.should_show_reset());
}

#[test]
fn single_select_ignores_modifiers() {
    let mut sel = one_two_three().multiple(false).with_value(vec!["one"]);
    sel.open_menu();

    ctrl_click(&mut sel, "two");

    assert_eq!(sel.host().changes, vec![vec!["two"]]);
    assert!(sel.close_on_select());
}

#[test]
fn section_toggle_selects_then_unselects_members() {
    let options = OptionList::new(vec![
        OptionEntry::Option(SelectOption::new("all", "All")),
        OptionEntry::Section(Section {
            key: "mine".to_string(),
            label: "Mine".to_string(),
            options: vec![SelectOption::new("web", "Web"), SelectOption::new("api", "API")],
        }),
    ]);
    let mut sel = one_two_three();
    sel.set_options(options);
    sel.open_menu();

    sel.toggle_section("mine");
    persist(&mut sel);
    assert_eq!(sel.value(), &["web", "api"]);

    sel.toggle_section("mine");
    persist(&mut sel);
    assert!(sel.value().is_empty());

    assert_eq!(
        sel.host().sections,
        vec![
            ("mine".to_string(), SectionToggle::Select),
            ("mine".to_string(), SectionToggle::Unselect),
        ]
    );
}
