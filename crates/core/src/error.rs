//! Defines the unified error type for all formatting operations.

use quire_layout::LayoutError;
use quire_markup::MarkupError;
use quire_traits::SinkError;
use quire_types::ConfigError;
use thiserror::Error;

/// The main error enum for all high-level operations within the formatter.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Invalid setting: {0}")]
    Config(#[from] ConfigError),
    #[error("Malformed input: {0}")]
    Markup(#[from] MarkupError),
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
    #[error("Malformed input: endnotes may not contain endnotes")]
    NestedEndnote,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LayoutError> for FormatError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::Config(e) => FormatError::Config(e),
            LayoutError::Sink(e) => FormatError::Sink(e),
        }
    }
}

impl FormatError {
    /// Recoverable errors are reported and formatting continues with the
    /// last valid settings. Anything else stops the current pass over the
    /// input: the whole document, or just the endnote it occurred in.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FormatError::Config(_) => true,
            FormatError::Markup(e) => !e.is_fatal(),
            _ => false,
        }
    }
}
