//! Structured error types for walbox
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations. The widget itself never fails; these
//! cover the files and terminal around it.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors in walbox
#[derive(Error, Debug)]
pub enum WalboxError {
    /// Page file could not be read
    #[error("Failed to read page '{}': {source}", path.display())]
    PageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page file is not valid TOML or has the wrong shape
    #[error("Invalid page: {0}")]
    PageParse(#[from] toml::de::Error),

    /// Binding selector is not one of `tag`, `.class`, `#id`, `tag.class`
    #[error("Invalid selector '{0}'. Expected: tag, .class, #id or tag.class")]
    InvalidSelector(String),

    /// Terminal setup or restoration error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Convenience Result type using WalboxError
pub type Result<T> = std::result::Result<T, WalboxError>;
