//! The formatting controller.
//!
//! A `Controller` receives word fragments and commands, performs the commands,
//! and hands words to one of two line assemblers: one for the body of the
//! document and one for endnotes. Body lines go straight to the output sink;
//! endnote lines are collected and written after the body when the document
//! is closed.

use crate::document;
use crate::error::FormatError;
use quire_layout::LineAssembler;
use quire_traits::{LineSink, PageCollector};
use quire_types::{Event, FormatOption, FormatSettings};

/// Which stream currently receives text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    #[default]
    Normal,
    Endnote,
}

/// Runs `$body` against the line assembler selected by the current mode.
macro_rules! route {
    ($self:ident, $stream:ident => $body:expr) => {
        match $self.mode {
            StreamMode::Normal => {
                let $stream = &mut $self.body;
                $body
            }
            StreamMode::Endnote => {
                let $stream = &mut $self.endnotes;
                $body
            }
        }
    };
}

#[derive(Debug)]
pub struct Controller<S> {
    body: LineAssembler<S>,
    endnotes: LineAssembler<PageCollector>,
    mode: StreamMode,
    /// Number given to the next endnote.
    next_endnote: u32,
    diagnostics: Vec<FormatError>,
}

impl<S: LineSink> Controller<S> {
    /// A controller with default body and endnote settings that sends
    /// formatted lines to `sink`.
    pub fn new(sink: S) -> Self {
        Self::with_settings(sink, FormatSettings::default(), FormatSettings::endnote())
    }

    pub fn with_settings(sink: S, body: FormatSettings, endnotes: FormatSettings) -> Self {
        Self {
            body: LineAssembler::with_settings(sink, body),
            endnotes: LineAssembler::with_settings(PageCollector::new(), endnotes),
            mode: StreamMode::Normal,
            next_endnote: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Apply one tokenizer event.
    pub fn apply(&mut self, event: Event<'_>) -> Result<(), FormatError> {
        match event {
            Event::Text(text) => {
                self.add_text(text);
                Ok(())
            }
            Event::EndOfWord => self.end_word(),
            Event::EndOfLine => self.end_input_line(),
            Event::EndOfParagraph => self.end_paragraph(),
            Event::SetOption(option) => self.set_option(option),
            Event::Endnote(text) => self.format_endnote(text),
        }
    }

    /// Add `text` to the end of the word currently being accumulated.
    pub fn add_text(&mut self, text: &str) {
        route!(self, stream => stream.add_text(text))
    }

    /// Finish the current word, if any, and add it to the pending line.
    pub fn end_word(&mut self) -> Result<(), FormatError> {
        route!(self, stream => stream.commit_word())?;
        Ok(())
    }

    /// Finish the current word and end the pending line without justifying it.
    pub fn newline(&mut self) -> Result<(), FormatError> {
        route!(self, stream => stream.newline())?;
        Ok(())
    }

    /// Handle a single line terminator in the input: only a word boundary
    /// when filling, a line break otherwise.
    pub fn end_input_line(&mut self) -> Result<(), FormatError> {
        let filling = route!(self, stream => stream.settings().fill());
        if filling { self.end_word() } else { self.newline() }
    }

    /// Finish the current word and line, and start a new paragraph.
    pub fn end_paragraph(&mut self) -> Result<(), FormatError> {
        route!(self, stream => stream.end_paragraph())?;
        Ok(())
    }

    pub fn set_option(&mut self, option: FormatOption) -> Result<(), FormatError> {
        match option {
            FormatOption::Indent(val) => self.set_indentation(val),
            FormatOption::ParIndent(val) => self.set_paragraph_indentation(val),
            FormatOption::TextWidth(val) => self.set_text_width(val),
            FormatOption::TextHeight(val) => self.set_text_height(val),
            FormatOption::ParSkip(val) => self.set_paragraph_skip(val),
            FormatOption::Fill(on) => {
                self.set_fill(on);
                Ok(())
            }
            FormatOption::Justify(on) => {
                self.set_justify(on);
                Ok(())
            }
        }
    }

    pub fn set_text_width(&mut self, val: i32) -> Result<(), FormatError> {
        route!(self, stream => stream.set_text_width(val))?;
        Ok(())
    }

    /// Set the number of lines per page. Ignored while formatting an endnote.
    pub fn set_text_height(&mut self, val: i32) -> Result<(), FormatError> {
        if self.mode == StreamMode::Endnote {
            log::debug!("Ignoring textheight {val} inside endnote");
            return Ok(());
        }
        self.body.set_text_height(val)?;
        Ok(())
    }

    pub fn set_indentation(&mut self, val: i32) -> Result<(), FormatError> {
        route!(self, stream => stream.set_indentation(val))?;
        Ok(())
    }

    pub fn set_paragraph_indentation(&mut self, val: i32) -> Result<(), FormatError> {
        route!(self, stream => stream.set_paragraph_indentation(val))?;
        Ok(())
    }

    pub fn set_paragraph_skip(&mut self, val: i32) -> Result<(), FormatError> {
        route!(self, stream => stream.set_paragraph_skip(val))?;
        Ok(())
    }

    pub fn set_fill(&mut self, on: bool) {
        route!(self, stream => stream.set_fill(on))
    }

    pub fn set_justify(&mut self, on: bool) {
        route!(self, stream => stream.set_justify(on))
    }

    /// Format `text` as the next endnote, leaving a `[n]` reference at the
    /// end of the body's current word.
    ///
    /// `text` is tokenized and fed back through this controller with the
    /// endnote stream active, so it may use any command except `\endnote`.
    /// A fatal error in `text` (a nested endnote, a stray brace) ends the
    /// note early and is reported as a diagnostic; the body carries on.
    /// Normal mode is restored before returning in every case.
    ///
    /// Fails with `NestedEndnote` when called while an endnote is already
    /// being formatted, and with a sink error if the note cannot be closed.
    pub fn format_endnote(&mut self, text: &str) -> Result<(), FormatError> {
        if self.mode == StreamMode::Endnote {
            return Err(FormatError::NestedEndnote);
        }
        let marker = format!("[{}]", self.next_endnote);
        log::debug!("Formatting endnote {marker}");
        self.body.add_text(&marker);
        self.endnotes.add_word(marker);

        let formatted = self.with_mode(StreamMode::Endnote, |controller| {
            let fed = document::feed(text, controller);
            // Close the note even after a failure so its text cannot leak
            // into the next one.
            controller.endnotes.commit_word()?;
            controller.endnotes.end_paragraph()?;
            Ok::<_, FormatError>(fed)
        });
        // Spent even if the note failed.
        self.next_endnote += 1;

        match formatted? {
            Err(err @ (FormatError::Sink(_) | FormatError::Io(_))) => Err(err),
            Err(err) => {
                log::debug!("Endnote {} cut short", self.next_endnote - 1);
                self.report(err);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    /// Finish the document: flush the body, then append all endnotes.
    /// Has no effect while an endnote is being formatted, and emits nothing
    /// new when called again.
    pub fn close(&mut self) -> Result<(), FormatError> {
        if self.mode == StreamMode::Endnote {
            return Ok(());
        }
        self.body.commit_word()?;
        self.body.force_emit(true)?;
        self.endnotes.flush()?;

        let notes = self.endnotes.pages_mut().sink_mut();
        notes.write_to(self.body.pages_mut().sink_mut())?;
        self.body.flush()?;
        Ok(())
    }

    /// Record a recoverable error and carry on.
    pub fn report(&mut self, error: FormatError) {
        log::warn!("{error}");
        self.diagnostics.push(error);
    }

    pub fn diagnostics(&self) -> &[FormatError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<FormatError> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    pub fn next_endnote(&self) -> u32 {
        self.next_endnote
    }

    pub fn body(&self) -> &LineAssembler<S> {
        &self.body
    }

    pub fn endnotes(&self) -> &LineAssembler<PageCollector> {
        &self.endnotes
    }

    pub fn sink(&self) -> &S {
        self.body.pages().sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.body.pages_mut().sink_mut()
    }

    pub fn into_sink(self) -> S {
        self.body.into_sink()
    }

    fn with_mode<T>(&mut self, mode: StreamMode, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.mode, mode);
        let out = f(self);
        self.mode = saved;
        out
    }
}
