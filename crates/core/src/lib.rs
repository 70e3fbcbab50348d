//! # quire-core
//!
//! The formatting controller and document driver.
//!
//! - **controller**: routes events to the body or endnote line assembler and
//!   orchestrates endnotes
//! - **document**: feeds tokenized markup through a controller
//! - **error**: the unified error type
//!
//! Output goes through the `LineSink` trait, so this crate never touches a
//! terminal or the filesystem itself.

// Re-export foundation crates
pub use quire_traits as traits;
pub use quire_types as types;

// Re-export algorithm crates
pub use quire_layout as layout;
pub use quire_markup as markup;

pub mod controller;
pub mod document;
pub mod error;

pub use controller::{Controller, StreamMode};
pub use document::{feed, format_document};
pub use error::FormatError;
