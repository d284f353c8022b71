//! Staged hybrid single/multi selection.
//!
//! A [`StagedSelection`] sits between raw click and key events and a host
//! that owns the committed value. Unmodified clicks replace the selection and
//! commit at once. Toggle-modifier clicks and shift-click ranges accumulate in
//! a staged override that the host later applies or discards.
//!
//! The committed value is never changed here: commits are proposed through
//! [`SelectionHost::on_change`], and the host reports the persisted value back
//! with [`StagedSelection::set_value`].

use log::{debug, info, warn};

use crate::diff;
use crate::modifiers::{ModifierState, Platform};
use crate::options::{OptionList, Value};

/// What a "select all in section" control did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionToggle {
    Select,
    Unselect,
}

/// Receiver for selection notifications.
///
/// Every method defaults to doing nothing.
pub trait SelectionHost<V> {
    /// A new value was committed.
    fn on_change(&mut self, _value: &[V]) {}
    /// The staged value changed without being committed.
    fn on_toggle(&mut self, _value: &[V]) {}
    /// An unmodified click replaced the whole selection with one value.
    fn on_replace(&mut self, _value: &V) {}
    /// The selection was reset to its default.
    fn on_reset(&mut self) {}
    /// A section's "select all" control was used.
    fn on_section_toggle(&mut self, _section: &str, _action: SectionToggle) {}
}

impl<V> SelectionHost<V> for () {}

type ValuesFn<V> = Box<dyn FnMut(&[V])>;

/// A [`SelectionHost`] assembled from closures.
pub struct CallbackHost<V> {
    on_change: Option<ValuesFn<V>>,
    on_toggle: Option<ValuesFn<V>>,
    on_replace: Option<Box<dyn FnMut(&V)>>,
    on_reset: Option<Box<dyn FnMut()>>,
    on_section_toggle: Option<Box<dyn FnMut(&str, SectionToggle)>>,
}

impl<V> Default for CallbackHost<V> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_toggle: None,
            on_replace: None,
            on_reset: None,
            on_section_toggle: None,
        }
    }
}

impl<V> CallbackHost<V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&[V]) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_toggle(mut self, f: impl FnMut(&[V]) + 'static) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_replace(mut self, f: impl FnMut(&V) + 'static) -> Self {
        self.on_replace = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_reset(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_section_toggle(mut self, f: impl FnMut(&str, SectionToggle) + 'static) -> Self {
        self.on_section_toggle = Some(Box::new(f));
        self
    }
}

impl<V> SelectionHost<V> for CallbackHost<V> {
    fn on_change(&mut self, value: &[V]) {
        if let Some(f) = self.on_change.as_mut() {
            f(value);
        }
    }

    fn on_toggle(&mut self, value: &[V]) {
        if let Some(f) = self.on_toggle.as_mut() {
            f(value);
        }
    }

    fn on_replace(&mut self, value: &V) {
        if let Some(f) = self.on_replace.as_mut() {
            f(value);
        }
    }

    fn on_reset(&mut self) {
        if let Some(f) = self.on_reset.as_mut() {
            f();
        }
    }

    fn on_section_toggle(&mut self, section: &str, action: SectionToggle) {
        if let Some(f) = self.on_section_toggle.as_mut() {
            f(section, action);
        }
    }
}

/// Selection state for one menu instance.
pub struct StagedSelection<V, H> {
    /// Committed value, owned by the host.
    value: Vec<V>,
    /// Value meaning "no filter".
    default_value: Vec<V>,
    options: OptionList<V>,
    multiple: bool,
    platform: Platform,
    max_selected: Option<usize>,
    commit_disabled: bool,
    has_external_changes: bool,
    /// Uncommitted override of `value`.
    staged: Option<Vec<V>>,
    /// Last explicitly toggled value, one end of a shift-click range.
    anchor: Option<V>,
    /// Filter text the anchor was recorded under.
    search: String,
    /// Set by a section toggle, consumed by the next `handle_change`.
    section_toggled: bool,
    modifiers: ModifierState,
    host: H,
}

impl<V: Value, H: SelectionHost<V>> StagedSelection<V, H> {
    /// Create a multi-select with an empty committed and default value.
    pub fn new(options: OptionList<V>, host: H) -> Self {
        Self {
            value: Vec::new(),
            default_value: Vec::new(),
            options,
            multiple: true,
            platform: Platform::current(),
            max_selected: None,
            commit_disabled: false,
            has_external_changes: false,
            staged: None,
            anchor: None,
            search: String::new(),
            section_toggled: false,
            modifiers: ModifierState::new(),
            host,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: Vec<V>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, default_value: Vec<V>) -> Self {
        self.default_value = default_value;
        self
    }

    #[must_use]
    pub const fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub const fn with_max_selected(mut self, max: Option<usize>) -> Self {
        self.max_selected = max;
        self
    }

    // ===== Host inputs =====

    /// Sync the committed value after the host has persisted it.
    pub fn set_value(&mut self, value: Vec<V>) {
        self.value = value;
    }

    pub fn set_options(&mut self, options: OptionList<V>) {
        self.options = options;
    }

    /// Block commits, e.g. while a host-side validation fails.
    pub const fn set_commit_disabled(&mut self, disabled: bool) {
        self.commit_disabled = disabled;
    }

    /// Mark changes the host holds outside this selection as pending.
    pub const fn set_has_external_changes(&mut self, changed: bool) {
        self.has_external_changes = changed;
    }

    pub const fn modifiers_mut(&mut self) -> &mut ModifierState {
        &mut self.modifiers
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // ===== Queries =====

    /// The committed value.
    pub fn value(&self) -> &[V] {
        &self.value
    }

    pub fn default_value(&self) -> &[V] {
        &self.default_value
    }

    pub fn staged_value(&self) -> Option<&[V]> {
        self.staged.as_deref()
    }

    /// The value to display: the staged override if any, else the committed value.
    pub fn current_value(&self) -> &[V] {
        self.staged.as_deref().unwrap_or(&self.value)
    }

    pub fn is_selected(&self, value: &V) -> bool {
        self.current_value().contains(value)
    }

    pub const fn options(&self) -> &OptionList<V> {
        &self.options
    }

    pub const fn anchor(&self) -> Option<&V> {
        self.anchor.as_ref()
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    pub const fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Option values visible under the recorded filter text, in option order.
    pub fn visible_values(&self) -> Vec<V> {
        self.options.filtered_values(&self.search)
    }

    /// Whether the staged value differs from the committed one by content.
    pub fn has_staged_changes(&self) -> bool {
        self.has_external_changes
            || self
                .staged
                .as_ref()
                .is_some_and(|staged| !diff::same_members(staged, &self.value))
    }

    /// Whether a "reset to default" affordance should be offered.
    pub fn should_show_reset(&self) -> bool {
        !diff::same_members(self.current_value(), &self.default_value)
    }

    /// Whether picking an option should close the menu.
    ///
    /// Stays open while a multi-select modifier is held.
    pub const fn close_on_select(&self) -> bool {
        !(self.multiple
            && (self.modifiers.shift() || self.modifiers.toggle_modifier(self.platform)))
    }

    /// Whether applying the staged value is currently refused.
    pub fn commit_disabled(&self) -> bool {
        self.commit_disabled || self.exceeds_limit(self.current_value())
    }

    fn exceeds_limit(&self, value: &[V]) -> bool {
        self.max_selected.is_some_and(|max| value.len() > max)
    }

    pub const fn max_selected(&self) -> Option<usize> {
        self.max_selected
    }

    // ===== Commit / cancel =====

    /// Drop the staged value and propose `value` to the host.
    pub fn commit(&mut self, value: Vec<V>) {
        info!("committing selection of {} value(s)", value.len());
        self.staged = None;
        self.host.on_change(&value);
    }

    /// Discard staged changes without notifying the host.
    pub fn remove_staged_changes(&mut self) {
        if self.staged.take().is_some() {
            debug!("discarded staged selection");
        }
    }

    /// Apply staged changes, or discard them when commits are disabled.
    pub fn commit_staged_changes(&mut self) {
        if self.commit_disabled() {
            warn!("commit disabled, discarding staged selection");
            self.remove_staged_changes();
            return;
        }
        if !self.has_staged_changes() {
            self.remove_staged_changes();
            return;
        }
        let value = self.current_value().to_vec();
        self.commit(value);
    }

    /// Commit the default value.
    pub fn handle_reset(&mut self) {
        let default = self.default_value.clone();
        self.commit(default);
        self.host.on_reset();
    }

    // ===== Menu lifecycle =====

    /// Start a new interaction session.
    pub fn open_menu(&mut self) {
        self.reset_anchor();
    }

    /// End the session, applying staged changes.
    pub fn close_menu(&mut self) {
        self.commit_staged_changes();
    }

    pub fn handle_escape(&mut self) {
        self.commit_staged_changes();
    }

    /// Record the menu's filter text. Must be called on every filter change.
    pub fn handle_search(&mut self, text: &str) {
        if self.search != text {
            self.anchor = None;
            self.search = text.to_string();
        }
    }

    pub fn reset_anchor(&mut self) {
        self.anchor = None;
        self.search.clear();
    }

    // ===== Interactions =====

    /// Stage a toggle of `value`, or a range toggle while shift is held.
    pub fn toggle_option(&mut self, value: &V) {
        if self.modifiers.shift() {
            self.toggle_option_range(value);
        } else {
            self.toggle_single(value);
        }
    }

    /// Pointer click on an option, expressed as the resulting listbox value.
    pub fn click(&mut self, value: &V) {
        let next = diff::toggle(self.current_value(), value);
        self.handle_change(&next);
    }

    /// The listbox reported `selected` as its new value.
    ///
    /// Precedence: bulk change, shift range, toggle modifier, replacement.
    pub fn handle_change(&mut self, selected: &[V]) {
        let changed = diff::xor(self.current_value(), selected);
        let section_toggled = std::mem::take(&mut self.section_toggled);

        if changed.len() > 1 || section_toggled {
            if self.exceeds_limit(selected) {
                warn!(
                    "bulk change of {} value(s) is over the selection limit, staging it",
                    selected.len()
                );
                self.stage(selected.to_vec());
                return;
            }
            self.commit(selected.to_vec());
            return;
        }

        let Some(value) = changed.into_iter().next() else {
            return;
        };

        if self.multiple && self.modifiers.shift() && self.anchor.is_some() {
            self.toggle_option_range(&value);
            return;
        }

        if self.multiple && self.modifiers.toggle_modifier(self.platform) {
            self.toggle_single(&value);
            return;
        }

        self.host.on_replace(&value);
        self.anchor = Some(value.clone());
        self.commit(vec![value]);
    }

    /// Select every option of a section, or unselect them all if every one
    /// is already selected. Always commits.
    pub fn toggle_section(&mut self, key: &str) {
        let Some(section) = self.options.section(key) else {
            debug!("toggle_section: unknown section {key}");
            return;
        };
        let members: Vec<V> = section.options.iter().map(|o| o.value.clone()).collect();
        let current = self.current_value();

        let action = if members.iter().all(|v| current.contains(v)) {
            SectionToggle::Unselect
        } else {
            SectionToggle::Select
        };

        let mut next: Vec<V> = match action {
            SectionToggle::Select => {
                let mut next = current.to_vec();
                next.extend(members.iter().filter(|v| !current.contains(v)).cloned());
                next
            }
            SectionToggle::Unselect => current
                .iter()
                .filter(|v| !members.contains(v))
                .cloned()
                .collect(),
        };
        diff::sort_by_order(&mut next, &self.options.values());

        self.section_toggled = true;
        self.host.on_section_toggle(key, action);
        self.handle_change(&next);
    }

    fn toggle_single(&mut self, value: &V) {
        let next = diff::toggle(self.current_value(), value);
        self.stage(next);
        self.anchor = Some(value.clone());
    }

    /// Toggle every visible option between the anchor and `value`.
    ///
    /// The whole range is deselected if `value` is currently selected and
    /// selected otherwise.
    fn toggle_option_range(&mut self, value: &V) {
        let Some(anchor) = self.anchor.clone() else {
            self.toggle_single(value);
            return;
        };

        let visible = self.visible_values();
        let Some(range) = diff::inclusive_range(&visible, &anchor, value) else {
            debug!("range endpoint not visible, toggling single value");
            self.toggle_single(value);
            return;
        };

        let current = self.current_value();
        let mut next: Vec<V> = if current.contains(value) {
            current
                .iter()
                .filter(|v| !range.contains(v))
                .cloned()
                .collect()
        } else {
            let mut next = current.to_vec();
            next.extend(range.iter().filter(|v| !current.contains(v)).cloned());
            next
        };
        diff::sort_by_order(&mut next, &self.options.values());

        self.stage(next);
        self.anchor = Some(value.clone());
    }

    fn stage(&mut self, next: Vec<V>) {
        debug!("staged selection of {} value(s)", next.len());
        self.host.on_toggle(&next);
        self.staged = Some(next);
    }
}
