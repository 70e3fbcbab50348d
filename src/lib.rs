//! # quire
//!
//! Formats marked-up text into fixed-width, optionally justified pages of
//! plain text, with numbered endnotes collected after the body.
//!
//! ```ignore
//! let formatted = quire::format_str("\\textwidth{30}Some text.\\endnote{A note.}")?;
//! for line in &formatted.lines {
//!     println!("{line}");
//! }
//! ```

pub use quire_core::{Controller, FormatError, StreamMode, feed, format_document};
pub use quire_layout::{LineAssembler, PAGE_BREAK, PageAssembler};
pub use quire_markup::{Lexer, MarkupError, tokenize};
pub use quire_traits::{LineSink, PageCollector, PagePrinter, SinkError};
pub use quire_types::{ConfigError, Event, FormatOption, FormatSettings, defaults};

/// The lines of a formatted document together with the recoverable errors
/// reported while formatting it.
#[derive(Debug)]
pub struct Formatted {
    pub lines: Vec<String>,
    pub diagnostics: Vec<FormatError>,
}

/// Format `input` with default settings, collecting the output in memory.
pub fn format_str(input: &str) -> Result<Formatted, FormatError> {
    format_str_with(input, FormatSettings::default())
}

/// Format `input` with the given body settings and default endnote settings.
pub fn format_str_with(input: &str, settings: FormatSettings) -> Result<Formatted, FormatError> {
    let mut controller =
        Controller::with_settings(PageCollector::new(), settings, FormatSettings::endnote());
    format_document(input, &mut controller)?;
    let diagnostics = controller.take_diagnostics();
    Ok(Formatted {
        lines: controller.into_sink().into_lines(),
        diagnostics,
    })
}
