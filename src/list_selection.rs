//! Selection over a list that may only be partially loaded.
//!
//! A server-paginated list knows its total size (`hits`) but only holds some
//! of its ids (`known_ids`). "Select all" is stored as a marker rather than an
//! enumeration, so it stays meaningful before every id has been fetched.

use std::collections::HashSet;
use std::hash::Hash;

use log::debug;

use crate::options::Value;

/// Current selection of a [`ListSelectionState`].
#[derive(Debug, Clone)]
pub enum ListSelection<V> {
    /// An explicit, possibly empty, set of ids.
    Ids(HashSet<V>),
    /// Every item the query matches, loaded or not.
    All,
}

impl<V> Default for ListSelection<V> {
    fn default() -> Self {
        Self::Ids(HashSet::new())
    }
}

impl<V: Eq + Hash> PartialEq for ListSelection<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ids(a), Self::Ids(b)) => a == b,
            (Self::All, Self::All) => true,
            _ => false,
        }
    }
}

impl<V: Eq + Hash> Eq for ListSelection<V> {}

/// Answer to "is this id selected?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Selected,
    Unselected,
    /// Selected through "all" while the list is not fully loaded.
    AllSelected,
}

impl Membership {
    /// Whether the id counts as selected, however that was decided.
    pub const fn is_selected(self) -> bool {
        !matches!(self, Self::Unselected)
    }
}

/// Answer to "is everything selected?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllSelected {
    Yes,
    No,
    /// Some but not all items are selected.
    Indeterminate,
}

/// Selected ids as a host should send them to a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedIds<V> {
    All,
    Ids(Vec<V>),
}

/// Checkbox-list selection with a "virtual all" state.
#[derive(Debug, Clone)]
pub struct ListSelectionState<V> {
    /// Identity of the query the list was loaded for.
    query_key: String,
    hits: usize,
    known_ids: Vec<V>,
    selection: ListSelection<V>,
}

impl<V: Value> ListSelectionState<V> {
    pub fn new(query_key: impl Into<String>, known_ids: Vec<V>, hits: usize) -> Self {
        Self {
            query_key: query_key.into(),
            hits,
            known_ids,
            selection: ListSelection::default(),
        }
    }

    /// Update loaded data. Clears the selection if the query key changed.
    pub fn sync(&mut self, query_key: &str, known_ids: Vec<V>, hits: usize) {
        if self.query_key != query_key {
            debug!("query key changed to {query_key}, clearing selection");
            self.query_key = query_key.to_string();
            self.selection = ListSelection::default();
        }
        self.known_ids = known_ids;
        self.hits = hits;
    }

    pub fn query_key(&self) -> &str {
        &self.query_key
    }

    pub const fn hits(&self) -> usize {
        self.hits
    }

    pub fn known_ids(&self) -> &[V] {
        &self.known_ids
    }

    pub const fn selection(&self) -> &ListSelection<V> {
        &self.selection
    }

    /// Whether every matching item has been loaded.
    pub const fn is_fully_loaded(&self) -> bool {
        self.hits == self.known_ids.len()
    }

    pub fn select_all(&mut self) {
        self.selection = ListSelection::All;
    }

    pub fn deselect_all(&mut self) {
        self.selection = ListSelection::default();
    }

    pub fn toggle_selected(&mut self, id: &V) {
        self.toggle_selected_many(std::slice::from_ref(id));
    }

    /// Toggle each of `ids`.
    ///
    /// From "all", toggling is only possible once every item is loaded: the
    /// selection becomes the known ids minus `ids`. Otherwise it is a no-op.
    pub fn toggle_selected_many(&mut self, ids: &[V]) {
        match self.selection {
            ListSelection::All => {
                if !self.is_fully_loaded() {
                    debug!(
                        "ignoring toggle of {} id(s): {} of {} items loaded",
                        ids.len(),
                        self.known_ids.len(),
                        self.hits
                    );
                    return;
                }
                let remaining = self
                    .known_ids
                    .iter()
                    .filter(|id| !ids.contains(id))
                    .cloned()
                    .collect();
                self.selection = ListSelection::Ids(remaining);
            }
            ListSelection::Ids(ref mut selected) => {
                for id in ids {
                    if !selected.remove(id) {
                        selected.insert(id.clone());
                    }
                }
            }
        }
    }

    pub fn is_selected(&self, id: &V) -> Membership {
        match &self.selection {
            ListSelection::All if self.is_fully_loaded() => Membership::Selected,
            ListSelection::All => Membership::AllSelected,
            ListSelection::Ids(selected) if selected.contains(id) => Membership::Selected,
            ListSelection::Ids(_) => Membership::Unselected,
        }
    }

    pub fn is_all_selected(&self) -> AllSelected {
        match &self.selection {
            ListSelection::All => AllSelected::Yes,
            ListSelection::Ids(selected) if selected.is_empty() => AllSelected::No,
            ListSelection::Ids(selected) if selected.len() == self.hits => AllSelected::Yes,
            ListSelection::Ids(_) => AllSelected::Indeterminate,
        }
    }

    pub fn is_any_selected(&self) -> bool {
        match &self.selection {
            ListSelection::All => self.hits > 0,
            ListSelection::Ids(selected) => !selected.is_empty(),
        }
    }

    pub fn count_selected(&self) -> usize {
        match &self.selection {
            ListSelection::All => self.hits,
            ListSelection::Ids(selected) => selected.len(),
        }
    }

    /// Selected ids, known ids first in list order.
    pub fn selected_ids(&self) -> SelectedIds<V> {
        match &self.selection {
            ListSelection::All => SelectedIds::All,
            ListSelection::Ids(selected) => {
                let mut ids: Vec<V> = self
                    .known_ids
                    .iter()
                    .filter(|id| selected.contains(*id))
                    .cloned()
                    .collect();
                let known: HashSet<&V> = self.known_ids.iter().collect();
                ids.extend(selected.iter().filter(|id| !known.contains(id)).cloned());
                SelectedIds::Ids(ids)
            }
        }
    }
}
