//! Groups finished lines into pages.

use quire_traits::{LineSink, SinkError};
use quire_types::{ConfigError, defaults};

/// Prefixed to the first line of every page after the first (Control-L).
pub const PAGE_BREAK: char = '\u{c}';

/// Accepts complete lines of text (without terminators), counts them into
/// pages of `text_height` lines and hands them to a sink. The first line of
/// each page after the first carries a form feed.
#[derive(Debug)]
pub struct PageAssembler<S> {
    sink: S,
    text_height: usize,
    lines_on_page: usize,
    page_number: usize,
    page_break_pending: bool,
}

impl<S: LineSink> PageAssembler<S> {
    pub fn new(sink: S) -> Self {
        Self::with_height(sink, defaults::TEXT_HEIGHT.unsigned_abs() as usize)
    }

    /// A page assembler with `text_height` lines per page. A height of zero
    /// is treated as one.
    pub fn with_height(sink: S, text_height: usize) -> Self {
        Self {
            sink,
            text_height: text_height.max(1),
            lines_on_page: 0,
            page_number: 1,
            page_break_pending: false,
        }
    }

    /// Set the number of lines per page. `val` must be positive. A page that
    /// already holds `val` or more lines is closed before the next line.
    pub fn set_text_height(&mut self, val: i32) -> Result<(), ConfigError> {
        if val <= 0 {
            return Err(ConfigError::NonPositiveHeight(val));
        }
        self.text_height = val as usize;
        Ok(())
    }

    /// Write `line`, preceded by `leading_skip` blank lines unless it would be
    /// the first line on its page.
    pub fn write(&mut self, line: String, leading_skip: usize) -> Result<(), SinkError> {
        if leading_skip > 0 && self.lines_on_page > 0 {
            for _ in 0..leading_skip {
                if self.page_is_full() {
                    break;
                }
                self.emit(String::new())?;
            }
        }
        self.emit(line)
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    pub fn text_height(&self) -> usize {
        self.text_height
    }

    pub fn lines_on_page(&self) -> usize {
        self.lines_on_page
    }

    /// 1-based number of the page currently being filled.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn page_is_full(&self) -> bool {
        self.lines_on_page >= self.text_height
    }

    fn emit(&mut self, line: String) -> Result<(), SinkError> {
        if self.page_is_full() {
            self.lines_on_page = 0;
            self.page_number += 1;
            self.page_break_pending = true;
            log::debug!("Starting page {}", self.page_number);
        }
        let line = if self.page_break_pending {
            self.page_break_pending = false;
            let mut marked = String::with_capacity(line.len() + 1);
            marked.push(PAGE_BREAK);
            marked.push_str(&line);
            marked
        } else {
            line
        };
        log::trace!("page {} line {}: {:?}", self.page_number, self.lines_on_page + 1, line);
        self.sink.write_line(line)?;
        self.lines_on_page += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_traits::PageCollector;

    fn write_all(pages: &mut PageAssembler<PageCollector>, lines: &[&str]) {
        for line in lines {
            pages.write(line.to_string(), 0).unwrap();
        }
    }

    #[test]
    fn test_third_line_starts_second_page() {
        let mut pages = PageAssembler::new(PageCollector::new());
        pages.set_text_height(2).unwrap();
        write_all(&mut pages, &["one", "two", "three"]);

        assert_eq!(pages.sink().lines(), ["one", "two", "\u{c}three"]);
        assert_eq!(pages.page_number(), 2);
        assert_eq!(pages.lines_on_page(), 1);
    }

    #[test]
    fn test_every_later_page_is_marked() {
        let mut pages = PageAssembler::new(PageCollector::new());
        pages.set_text_height(1).unwrap();
        write_all(&mut pages, &["a", "b", "c"]);
        assert_eq!(pages.sink().lines(), ["a", "\u{c}b", "\u{c}c"]);
    }

    #[test]
    fn test_unlimited_height_never_breaks() {
        let mut pages = PageAssembler::new(PageCollector::new());
        for i in 0..500 {
            pages.write(format!("line {i}"), 0).unwrap();
        }
        assert!(
            pages
                .sink()
                .lines()
                .iter()
                .all(|line| !line.starts_with(PAGE_BREAK))
        );
    }

    #[test]
    fn test_skip_is_dropped_at_top_of_document_and_page() {
        let mut pages = PageAssembler::new(PageCollector::new());
        pages.set_text_height(3).unwrap();
        pages.write("first".to_string(), 2).unwrap();
        pages.write("second".to_string(), 1).unwrap();
        pages.write("third".to_string(), 0).unwrap();
        pages.write("fourth".to_string(), 1).unwrap();

        assert_eq!(
            pages.sink().lines(),
            ["first", "", "second", "\u{c}third", "", "fourth"]
        );
    }

    #[test]
    fn test_skip_stops_when_page_fills() {
        let mut pages = PageAssembler::new(PageCollector::new());
        pages.set_text_height(2).unwrap();
        pages.write("first".to_string(), 0).unwrap();
        pages.write("second".to_string(), 5).unwrap();

        assert_eq!(pages.sink().lines(), ["first", "", "\u{c}second"]);
    }

    #[test]
    fn test_with_height_paginates_from_the_start() {
        let mut pages = PageAssembler::with_height(PageCollector::new(), 2);
        write_all(&mut pages, &["a", "b", "c"]);
        assert_eq!(pages.sink().lines(), ["a", "b", "\u{c}c"]);
    }

    #[test]
    fn test_rejected_height_keeps_previous() {
        let mut pages = PageAssembler::new(PageCollector::new());
        pages.set_text_height(4).unwrap();
        assert_eq!(
            pages.set_text_height(0),
            Err(ConfigError::NonPositiveHeight(0))
        );
        assert_eq!(pages.text_height(), 4);
    }

    #[test]
    fn test_shrinking_height_closes_full_page() {
        let mut pages = PageAssembler::new(PageCollector::new());
        write_all(&mut pages, &["a", "b", "c"]);
        pages.set_text_height(2).unwrap();
        write_all(&mut pages, &["d"]);
        assert_eq!(pages.sink().lines(), ["a", "b", "c", "\u{c}d"]);
    }
}
