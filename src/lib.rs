//! pickset - staged multi-select state machines and a terminal picker.
//!
//! The library provides the selection logic behind filter menus:
//!
//! - [`StagedSelection`]: single/multi selection where plain clicks commit
//!   immediately and modifier clicks stage changes for an explicit apply.
//! - [`ListSelectionState`]: checkbox selection over a partially loaded list,
//!   with a "select all" that does not need every id.
//! - [`viewport`]: visible-row windows for virtualized lists.
//!
//! The `pickset` binary wraps [`StagedSelection`] in an interactive picker.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod list_selection;
pub mod modifiers;
pub mod options;
pub mod picker;
pub mod staged;
pub mod viewport;

#[cfg(test)]
mod testutil;

pub use config::{OptionFile, PicksetConfig};
pub use error::PicksetError;
pub use list_selection::{AllSelected, ListSelection, ListSelectionState, Membership, SelectedIds};
pub use modifiers::{Modifier, ModifierState, Platform};
pub use options::{OptionEntry, OptionList, Section, SelectOption, Value};
pub use staged::{CallbackHost, SectionToggle, SelectionHost, StagedSelection};
