//! Accumulates words into filled, justified and indented lines.

use crate::LayoutError;
use crate::page::PageAssembler;
use quire_traits::LineSink;
use quire_types::FormatSettings;

/// Receives a sequence of words and formats them into lines that are sent
/// to a `PageAssembler`.
///
/// At any time the assembler holds a pending word (built from text fragments)
/// and a pending line of committed words. A line is emitted when the next
/// word would not fit (a fill break, justified when justification is on) or
/// on an explicit break (newline, end of paragraph, final flush), which is
/// never justified.
#[derive(Debug)]
pub struct LineAssembler<S> {
    settings: FormatSettings,
    word: String,
    words: Vec<String>,
    /// Total characters in `words`, not counting inter-word spaces.
    chars: usize,
    paragraph_start: bool,
    pages: PageAssembler<S>,
}

impl<S: LineSink> LineAssembler<S> {
    pub fn new(sink: S) -> Self {
        Self::with_settings(sink, FormatSettings::default())
    }

    pub fn with_settings(sink: S, settings: FormatSettings) -> Self {
        let height = settings.text_height().unsigned_abs() as usize;
        let pages = PageAssembler::with_height(sink, height);
        Self {
            settings,
            word: String::new(),
            words: Vec::new(),
            chars: 0,
            paragraph_start: true,
            pages,
        }
    }

    /// Add `text` to the end of the word being built.
    pub fn add_text(&mut self, text: &str) {
        self.word.push_str(text);
    }

    /// Place `word` on the pending line as-is, bypassing the fit check.
    pub fn add_word(&mut self, word: impl Into<String>) {
        self.push_word(word.into());
    }

    /// Finish the current word, if any, and add it to the pending line,
    /// emitting the line first if the word does not fit.
    pub fn commit_word(&mut self) -> Result<(), LayoutError> {
        if self.word.is_empty() {
            return Ok(());
        }
        let word = std::mem::take(&mut self.word);
        let len = word.chars().count();
        let width = self.settings.text_width() as usize;
        let indent = self.indent();

        if self.words.is_empty() && len + indent > width {
            // Never split an over-long word; it gets a line of its own.
            self.push_word(word);
            self.force_emit(false)?;
        } else if len + indent + self.chars + self.words.len() > width {
            self.force_emit(false)?;
            self.push_word(word);
        } else {
            self.push_word(word);
        }
        Ok(())
    }

    /// Format and emit the pending line, if any. Justification applies only
    /// to fill breaks: `explicit_break` lines get single spaces.
    pub fn force_emit(&mut self, explicit_break: bool) -> Result<(), LayoutError> {
        if self.words.is_empty() {
            return Ok(());
        }
        let gaps = self.words.len() - 1;
        let indent = self.indent();
        let spaces = if self.settings.justify() && !explicit_break {
            let room = self.settings.text_width() as i64 - self.chars as i64 - indent as i64;
            room.clamp(0, 3 * gaps as i64) as usize
        } else {
            gaps
        };

        let line = justify_line(&self.words, indent, spaces);
        let skip = if self.paragraph_start {
            self.settings.paragraph_skip() as usize
        } else {
            0
        };
        self.words.clear();
        self.chars = 0;
        self.paragraph_start = false;
        self.pages.write(line, skip)?;
        Ok(())
    }

    /// Finish the current word and end the current line without justifying it.
    pub fn newline(&mut self) -> Result<(), LayoutError> {
        self.commit_word()?;
        self.force_emit(true)
    }

    /// Close out the current paragraph. The next line emitted receives
    /// paragraph indentation and, if not first on its page, paragraph skip.
    pub fn end_paragraph(&mut self) -> Result<(), LayoutError> {
        if !self.word.is_empty() {
            let word = std::mem::take(&mut self.word);
            self.push_word(word);
        }
        let emitted = self.force_emit(true);
        self.paragraph_start = true;
        emitted
    }

    /// Finish the current word, emit any pending partial line and flush the
    /// sink.
    pub fn flush(&mut self) -> Result<(), LayoutError> {
        self.commit_word()?;
        self.force_emit(true)?;
        self.pages.flush()?;
        Ok(())
    }

    pub fn set_text_width(&mut self, val: i32) -> Result<(), LayoutError> {
        self.settings.set_text_width(val)?;
        Ok(())
    }

    pub fn set_text_height(&mut self, val: i32) -> Result<(), LayoutError> {
        self.settings.set_text_height(val)?;
        self.pages.set_text_height(val)?;
        Ok(())
    }

    pub fn set_indentation(&mut self, val: i32) -> Result<(), LayoutError> {
        self.settings.set_indentation(val)?;
        Ok(())
    }

    pub fn set_paragraph_indentation(&mut self, val: i32) -> Result<(), LayoutError> {
        self.settings.set_paragraph_indentation(val)?;
        Ok(())
    }

    pub fn set_paragraph_skip(&mut self, val: i32) -> Result<(), LayoutError> {
        self.settings.set_paragraph_skip(val)?;
        Ok(())
    }

    pub fn set_fill(&mut self, on: bool) {
        self.settings.set_fill(on);
    }

    pub fn set_justify(&mut self, on: bool) {
        self.settings.set_justify(on);
    }

    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    pub fn pending_word(&self) -> &str {
        &self.word
    }

    pub fn pending_words(&self) -> &[String] {
        &self.words
    }

    pub fn pending_chars(&self) -> usize {
        self.chars
    }

    pub fn is_paragraph_start(&self) -> bool {
        self.paragraph_start
    }

    pub fn pages(&self) -> &PageAssembler<S> {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut PageAssembler<S> {
        &mut self.pages
    }

    pub fn into_sink(self) -> S {
        self.pages.into_sink()
    }

    /// Leading spaces for the pending line. Zero outside fill mode.
    fn indent(&self) -> usize {
        if !self.settings.fill() {
            return 0;
        }
        let mut indent = self.settings.indentation() as i64;
        if self.paragraph_start {
            indent += self.settings.paragraph_indentation() as i64;
        }
        indent.max(0) as usize
    }

    fn push_word(&mut self, word: String) {
        self.chars += word.chars().count();
        self.words.push(word);
    }
}

/// Split `spaces` over `gaps` gaps. The spaces after the first `k` words total
/// `floor(0.5 + spaces * k / gaps)`, so any remainder is spread across the
/// line instead of bunching at one end.
pub fn distribute_spaces(spaces: usize, gaps: usize) -> Vec<usize> {
    let mut placed = 0;
    (1..=gaps)
        .map(|k| {
            // Exact integer form of the rounding above.
            let through = (2 * spaces * k + gaps) / (2 * gaps);
            let gap = through - placed;
            placed = through;
            gap
        })
        .collect()
}

/// Build a line of `indent` spaces followed by `words` separated by a total
/// of `spaces` spaces.
pub fn justify_line(words: &[String], indent: usize, spaces: usize) -> String {
    let gaps = distribute_spaces(spaces, words.len().saturating_sub(1));
    let width = indent + spaces + words.iter().map(String::len).sum::<usize>();
    let mut line = String::with_capacity(width);
    line.extend(std::iter::repeat_n(' ', indent));
    let mut words = words.iter();
    if let Some(first) = words.next() {
        line.push_str(first);
    }
    for (word, gap) in words.zip(gaps) {
        line.extend(std::iter::repeat_n(' ', gap));
        line.push_str(word);
    }
    line
}
