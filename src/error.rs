//! Errors raised while loading option lists and configuration.
//!
//! The selection state machines themselves never fail; these cover the data
//! feeding them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicksetError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("duplicate option value '{0}'")]
    DuplicateValue(String),

    #[error("no options defined in {}", .0.display())]
    NoOptions(PathBuf),

    #[error("unknown platform '{0}' (expected 'mac' or 'other')")]
    UnknownPlatform(String),
}
