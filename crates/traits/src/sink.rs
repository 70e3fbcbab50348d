//! LineSink trait for abstracting the final disposal of formatted lines.
//!
//! The layout engine hands every finished line to a sink without knowing
//! whether it ends up in memory, on a terminal or in a file.

use std::io::{self, Write};
use thiserror::Error;

/// Error type for line disposal.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Receives finished lines of formatted text, in document order.
///
/// # Implementations
///
/// - `PageCollector`: keeps lines in memory
/// - `PagePrinter`: writes each line, newline-terminated, to an `io::Write`
pub trait LineSink {
    /// Dispose of one finished line. The line carries all of its indentation,
    /// spacing and page-break characters but no line terminator.
    fn write_line(&mut self, line: String) -> Result<(), SinkError>;

    /// Push any buffered output to its destination.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: String) -> Result<(), SinkError> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn write_line(&mut self, line: String) -> Result<(), SinkError> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// A sink that collects its lines into a list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageCollector {
    lines: Vec<String>,
}

impl PageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Move the collected lines, in order, into `sink`. Lines are removed
    /// only once written, so after a failed write the collector still holds
    /// the line that failed and everything after it.
    pub fn write_to<S: LineSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        let mut written = 0;
        let mut result = Ok(());
        for line in &self.lines {
            if let Err(e) = sink.write_line(line.clone()) {
                result = Err(e);
                break;
            }
            written += 1;
        }
        self.lines.drain(..written);
        result
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSink for PageCollector {
    fn write_line(&mut self, line: String) -> Result<(), SinkError> {
        self.lines.push(line);
        Ok(())
    }
}

/// A sink that prints lines to a writer, each followed by a newline.
#[derive(Debug)]
pub struct PagePrinter<W: Write> {
    out: W,
}

impl<W: Write> PagePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LineSink for PagePrinter<W> {
    fn write_line(&mut self, line: String) -> Result<(), SinkError> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
