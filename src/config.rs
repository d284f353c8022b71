//! Configuration and option files for pickset.
//!
//! Both use CCL.
//! Global config: `~/.config/pickset/config.ccl`
//! Per-directory config: `.pickset/config.ccl`

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PicksetError;
use crate::modifiers::Platform;
use crate::options::{OptionEntry, OptionList, SelectOption, Section};

/// Rows shown per page in the picker when not configured.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// pickset configuration. Every key is optional.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct PicksetConfig {
    /// Allow modifier and checkbox multi-selection.
    #[serde(default)]
    pub multiple: Option<bool>,
    /// Refuse to apply selections larger than this.
    #[serde(default)]
    pub max_selected: Option<usize>,
    /// Override platform detection for the toggle modifier (`mac` or `other`).
    #[serde(default)]
    pub platform: Option<String>,
    /// Rows rendered per page in the picker.
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl PicksetConfig {
    /// Overlay the keys set in `other` onto `self`.
    pub fn merge(&mut self, other: Self) {
        if other.multiple.is_some() {
            self.multiple = other.multiple;
        }
        if other.max_selected.is_some() {
            self.max_selected = other.max_selected;
        }
        if other.platform.is_some() {
            self.platform = other.platform;
        }
        if other.page_size.is_some() {
            self.page_size = other.page_size;
        }
    }

    pub fn multiple(&self) -> bool {
        self.multiple.unwrap_or(true)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn platform(&self) -> Result<Platform, PicksetError> {
        match &self.platform {
            None => Ok(Platform::current()),
            Some(name) => {
                Platform::from_name(name).ok_or_else(|| PicksetError::UnknownPlatform(name.clone()))
            }
        }
    }
}

/// Get the global config directory path.
///
/// Respects `XDG_CONFIG_HOME` if set.
pub fn config_dir() -> Result<PathBuf> {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            .join(".config")
    };

    Ok(base.join("pickset"))
}

/// Get the path to the global config file.
pub fn global_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.ccl"))
}

/// Get the path to the per-directory config file.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".pickset").join("config.ccl")
}

fn load_config_file(path: &Path) -> Result<Option<PicksetConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Some(PicksetConfig::default()));
    }

    let config = sickle::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

/// Load the global configuration.
pub fn load_global_config() -> Result<PicksetConfig> {
    let path = global_config_path()?;
    Ok(load_config_file(&path)?.unwrap_or_default())
}

/// Load the per-directory configuration.
pub fn load_local_config(dir: &Path) -> Result<Option<PicksetConfig>> {
    load_config_file(&local_config_path(dir))
}

/// Load configuration, merging global with per-directory overrides.
pub fn load_config(dir: Option<&Path>) -> Result<PicksetConfig> {
    let mut config = load_global_config()?;

    if let Some(dir) = dir
        && let Some(local) = load_local_config(dir)?
    {
        config.merge(local);
    }

    Ok(config)
}

/// Render a config as commented CCL.
pub fn generate_config_ccl(config: &PicksetConfig) -> String {
    let mut output = String::new();
    output.push_str("/= pickset configuration\n");

    if let Some(multiple) = config.multiple {
        let _ = writeln!(output, "multiple = {multiple}");
    }
    if let Some(max) = config.max_selected {
        let _ = writeln!(output, "max_selected = {max}");
    }
    if let Some(ref platform) = config.platform {
        let _ = writeln!(output, "platform = {platform}");
    }
    if let Some(page_size) = config.page_size {
        let _ = writeln!(output, "page_size = {page_size}");
    }

    output
}

// ==================== Option files ====================

/// One option in an option file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Extra searchable text.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    /// Key of the section this option belongs to.
    #[serde(default)]
    pub section: Option<String>,
}

/// Display metadata for a section.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub key: String,
    pub label: String,
}

/// An option file: the choices plus the initial and default selection.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct OptionFile {
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    /// Initially committed values.
    #[serde(default)]
    pub value: Vec<String>,
    /// Values meaning "no filter".
    #[serde(default)]
    pub default: Vec<String>,
}

impl OptionFile {
    /// Read and parse an option file.
    pub fn load(path: &Path) -> Result<Self, PicksetError> {
        let content = fs::read_to_string(path).map_err(|source| PicksetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: Self = sickle::from_str(&content).map_err(|e| PicksetError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if file.options.is_empty() {
            return Err(PicksetError::NoOptions(path.to_path_buf()));
        }
        debug!("loaded {} option(s) from {}", file.options.len(), path.display());
        Ok(file)
    }

    /// Build the option list.
    ///
    /// Options sharing a section key form one section entry, placed where
    /// the key first appears. Sections without metadata use their key as
    /// label.
    pub fn to_option_list(&self) -> Result<OptionList<String>, PicksetError> {
        let mut seen = HashSet::new();
        let mut entries: Vec<OptionEntry<String>> = Vec::new();

        for spec in &self.options {
            if !seen.insert(spec.value.as_str()) {
                return Err(PicksetError::DuplicateValue(spec.value.clone()));
            }

            let mut option = SelectOption::new(
                spec.value.clone(),
                spec.label.clone().unwrap_or_else(|| spec.value.clone()),
            );
            option.text_value.clone_from(&spec.text);
            option.details.clone_from(&spec.details);

            let Some(key) = &spec.section else {
                entries.push(OptionEntry::Option(option));
                continue;
            };

            let existing = entries.iter_mut().find_map(|entry| match entry {
                OptionEntry::Section(section) if &section.key == key => Some(section),
                _ => None,
            });
            if let Some(section) = existing {
                section.options.push(option);
                continue;
            }

            let label = self
                .sections
                .iter()
                .find(|s| &s.key == key)
                .map_or_else(|| key.clone(), |s| s.label.clone());
            entries.push(OptionEntry::Section(Section {
                key: key.clone(),
                label,
                options: vec![option],
            }));
        }

        Ok(OptionList::new(entries))
    }
}
