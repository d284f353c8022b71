//! Common test utilities for pickset tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use pickset::{OptionList, Platform, SectionToggle, SelectionHost, StagedSelection};
use tempfile::TempDir;

/// A host that records every notification it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub changes: Vec<Vec<&'static str>>,
    pub toggles: Vec<Vec<&'static str>>,
    pub replaced: Vec<&'static str>,
    pub resets: usize,
    pub sections: Vec<(String, SectionToggle)>,
}

impl SelectionHost<&'static str> for Recorder {
    fn on_change(&mut self, value: &[&'static str]) {
        self.changes.push(value.to_vec());
    }

    fn on_toggle(&mut self, value: &[&'static str]) {
        self.toggles.push(value.to_vec());
    }

    fn on_replace(&mut self, value: &&'static str) {
        self.replaced.push(*value);
    }

    fn on_reset(&mut self) {
        self.resets += 1;
    }

    fn on_section_toggle(&mut self, section: &str, action: SectionToggle) {
        self.sections.push((section.to_string(), action));
    }
}

pub type Selection = StagedSelection<&'static str, Recorder>;

/// `[one, two, three]` with a fixed platform so Control is the toggle key.
pub fn one_two_three() -> Selection {
    StagedSelection::new(
        OptionList::from_pairs([("one", "One"), ("two", "Two"), ("three", "Three")]),
        Recorder::default(),
    )
    .with_platform(Platform::Other)
}

/// Play the host: persist the last proposed commit.
pub fn persist(sel: &mut Selection) {
    if let Some(value) = sel.host().changes.last().cloned() {
        sel.set_value(value);
    }
}

/// A temporary directory holding option files.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the context directory.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A `pickset` command that never opens the interactive UI.
pub fn pickset_cmd(ctx: &TestContext) -> Command {
    let mut cmd = Command::cargo_bin("pickset").expect("Failed to find pickset binary");
    cmd.current_dir(ctx.path())
        .env("PICKSET_NON_INTERACTIVE", "1")
        .env("XDG_CONFIG_HOME", ctx.path().join("xdg"))
        .env_remove("RUST_LOG");
    cmd
}

pub const PROJECTS: &str = "
options =
  =
    value = all
    label = All Projects
  =
    value = web
    label = Web Frontend
    details = javascript
    section = mine
  =
    value = api
    label = API
    text = backend
    section = mine
  =
    value = ios
    label = iOS
    section = others
sections =
  =
    key = mine
    label = My Projects
  =
    key = others
    label = Other Projects
value =
  = web
default =
  = all
";
