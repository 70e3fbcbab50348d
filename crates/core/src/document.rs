//! Drives tokenized markup through a `Controller`.

use crate::controller::Controller;
use crate::error::FormatError;
use quire_markup::tokenize;
use quire_traits::LineSink;

/// Tokenize `input` and apply every event to `controller`. Recoverable errors
/// are reported to the controller and skipped; the first fatal error stops
/// processing and is returned.
pub fn feed<S: LineSink>(input: &str, controller: &mut Controller<S>) -> Result<(), FormatError> {
    for event in tokenize(input) {
        let applied = event
            .map_err(FormatError::from)
            .and_then(|event| controller.apply(event));
        if let Err(err) = applied {
            if !err.is_recoverable() {
                return Err(err);
            }
            controller.report(err);
        }
    }
    Ok(())
}

/// Format a complete document: feed all of `input`, then close the
/// controller so that pending text and endnotes reach the sink. Text read
/// before a fatal error is still flushed.
pub fn format_document<S: LineSink>(
    input: &str,
    controller: &mut Controller<S>,
) -> Result<(), FormatError> {
    let fed = feed(input, controller);
    controller.close()?;
    log::info!(
        "Formatted document with {} endnote(s) and {} diagnostic(s)",
        controller.next_endnote() - 1,
        controller.diagnostics().len()
    );
    fed
}
