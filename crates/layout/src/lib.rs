//! Line and page assembly for fixed-width plain-text output.

use quire_traits::SinkError;
use quire_types::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid setting: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to write line: {0}")]
    Sink(#[from] SinkError),
}

pub mod line;
pub mod page;

pub use self::line::{LineAssembler, distribute_spaces, justify_line};
pub use self::page::{PAGE_BREAK, PageAssembler};
