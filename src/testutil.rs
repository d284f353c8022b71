//! Common test utilities and helpers for pickset tests.
//!
//! This module is only compiled when running tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::staged::{SectionToggle, SelectionHost};

/// A host that records every notification it receives.
#[derive(Debug)]
pub struct RecordingHost<V> {
    pub changes: Vec<Vec<V>>,
    pub toggles: Vec<Vec<V>>,
    pub replaced: Vec<V>,
    pub resets: usize,
    pub sections: Vec<(String, SectionToggle)>,
}

impl<V> Default for RecordingHost<V> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
            toggles: Vec::new(),
            replaced: Vec::new(),
            resets: 0,
            sections: Vec::new(),
        }
    }
}

impl<V: Clone> SelectionHost<V> for RecordingHost<V> {
    fn on_change(&mut self, value: &[V]) {
        self.changes.push(value.to_vec());
    }

    fn on_toggle(&mut self, value: &[V]) {
        self.toggles.push(value.to_vec());
    }

    fn on_replace(&mut self, value: &V) {
        self.replaced.push(value.clone());
    }

    fn on_reset(&mut self) {
        self.resets += 1;
    }

    fn on_section_toggle(&mut self, section: &str, action: SectionToggle) {
        self.sections.push((section.to_string(), action));
    }
}

/// Write `content` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Option file with three plain options.
pub const THREE_OPTIONS: &str = "
options =
  =
    value = one
    label = One
  =
    value = two
    label = Two
  =
    value = three
    label = Three
";
