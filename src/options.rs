//! Option lists for selection menus.
//!
//! An option list is an ordered sequence of plain options and sections. Range
//! selection and commit ordering both depend on the flattened order, so every
//! helper here preserves the original relative order of options.

use std::fmt::Debug;
use std::hash::Hash;

/// Bound for selectable keys.
///
/// Keys are opaque: the state machines only compare, hash and clone them.
pub trait Value: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Value for T {}

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    /// Key identifying the option.
    pub value: V,
    /// Text shown for the option.
    pub label: String,
    /// Extra text matched by the search filter but not displayed.
    pub text_value: Option<String>,
    /// Auxiliary render data (shown dimmed next to the label).
    pub details: Option<String>,
}

impl<V> SelectOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            text_value: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Whether the option matches an already lowercased search query.
    fn matches(&self, query: &str) -> bool {
        self.label.to_lowercase().contains(query)
            || self
                .text_value
                .as_ref()
                .is_some_and(|t| t.to_lowercase().contains(query))
    }
}

/// A titled group of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<V> {
    pub key: String,
    pub label: String,
    pub options: Vec<SelectOption<V>>,
}

/// Either a plain option or a section of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionEntry<V> {
    Option(SelectOption<V>),
    Section(Section<V>),
}

/// An ordered, possibly sectioned, list of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList<V> {
    entries: Vec<OptionEntry<V>>,
}

impl<V> Default for OptionList<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: Value> OptionList<V> {
    pub const fn new(entries: Vec<OptionEntry<V>>) -> Self {
        Self { entries }
    }

    /// Build an unsectioned list from `(value, label)` pairs.
    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (V, L)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(value, label)| OptionEntry::Option(SelectOption::new(value, label)))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[OptionEntry<V>] {
        &self.entries
    }

    /// All options in original order, sections expanded in place.
    pub fn flatten(&self) -> Vec<&SelectOption<V>> {
        let mut flat = Vec::new();
        for entry in &self.entries {
            match entry {
                OptionEntry::Option(option) => flat.push(option),
                OptionEntry::Section(section) => flat.extend(section.options.iter()),
            }
        }
        flat
    }

    /// Option values in flattened order.
    pub fn values(&self) -> Vec<V> {
        self.flatten().into_iter().map(|o| o.value.clone()).collect()
    }

    /// Number of options, counting those inside sections.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                OptionEntry::Option(_) => 1,
                OptionEntry::Section(section) => section.options.len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of `value` in the flattened order.
    pub fn position(&self, value: &V) -> Option<usize> {
        self.flatten().iter().position(|o| &o.value == value)
    }

    pub fn contains(&self, value: &V) -> bool {
        self.position(value).is_some()
    }

    pub fn get(&self, value: &V) -> Option<&SelectOption<V>> {
        self.flatten().into_iter().find(|o| &o.value == value)
    }

    pub fn section(&self, key: &str) -> Option<&Section<V>> {
        self.entries.iter().find_map(|entry| match entry {
            OptionEntry::Section(section) if section.key == key => Some(section),
            _ => None,
        })
    }

    /// Key of the section containing `value`, if any.
    pub fn section_of(&self, value: &V) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            OptionEntry::Section(section) if section.options.iter().any(|o| &o.value == value) => {
                Some(section.key.as_str())
            }
            _ => None,
        })
    }

    /// Flattened options matching `query`, case-insensitively.
    ///
    /// An option matches when its label or search text contains the query, or
    /// when the label of its section does. An empty query matches everything.
    pub fn filtered(&self, query: &str) -> Vec<&SelectOption<V>> {
        if query.is_empty() {
            return self.flatten();
        }
        let query = query.to_lowercase();
        let mut visible = Vec::new();
        for entry in &self.entries {
            match entry {
                OptionEntry::Option(option) => {
                    if option.matches(&query) {
                        visible.push(option);
                    }
                }
                OptionEntry::Section(section) => {
                    let section_matches = section.label.to_lowercase().contains(&query);
                    visible.extend(
                        section
                            .options
                            .iter()
                            .filter(|o| section_matches || o.matches(&query)),
                    );
                }
            }
        }
        visible
    }

    /// Values in flattened order that match `query`.
    pub fn filtered_values(&self, query: &str) -> Vec<V> {
        self.filtered(query)
            .into_iter()
            .map(|o| o.value.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sectioned() -> OptionList<&'static str> {
        OptionList::new(vec![
            OptionEntry::Option(SelectOption::new("all", "All Projects")),
            OptionEntry::Section(Section {
                key: "mine".to_string(),
                label: "My Projects".to_string(),
                options: vec![
                    SelectOption::new("web", "Web"),
                    SelectOption::new("api", "API").with_text_value("backend"),
                ],
            }),
            OptionEntry::Section(Section {
                key: "other".to_string(),
                label: "Other".to_string(),
                options: vec![SelectOption::new("ios", "iOS")],
            }),
        ])
    }

    #[test]
    fn test_flatten_preserves_order() {
        let list = sectioned();
        assert_eq!(list.values(), vec!["all", "web", "api", "ios"]);
        assert_eq!(list.len(), 4);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_position_and_contains() {
        let list = sectioned();
        assert_eq!(list.position(&"api"), Some(2));
        assert_eq!(list.position(&"missing"), None);
        assert!(list.contains(&"ios"));
        assert!(!list.contains(&"android"));
    }

    #[test]
    fn test_filter_matches_label_case_insensitive() {
        let list = sectioned();
        assert_eq!(list.filtered_values("WE"), vec!["web"]);
    }

    #[test]
    fn test_filter_matches_text_value() {
        let list = sectioned();
        assert_eq!(list.filtered_values("backend"), vec!["api"]);
    }

    #[test]
    fn test_filter_matches_section_label() {
        let list = sectioned();
        assert_eq!(list.filtered_values("my proj"), vec!["web", "api"]);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let list = sectioned();
        assert_eq!(list.filtered_values(""), list.values());
    }

    #[test]
    fn test_section_lookup() {
        let list = sectioned();
        assert_eq!(list.section("other").map(|s| s.options.len()), Some(1));
        assert!(list.section("nope").is_none());
        assert_eq!(list.section_of(&"api"), Some("mine"));
        assert_eq!(list.section_of(&"all"), None);
    }

    #[test]
    fn test_from_pairs() {
        let list = OptionList::from_pairs([(1, "one"), (2, "two")]);
        assert_eq!(list.values(), vec![1, 2]);
        assert_eq!(list.get(&2).map(|o| o.label.as_str()), Some("two"));
    }
}
