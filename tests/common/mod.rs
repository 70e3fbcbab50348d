#![allow(dead_code)]

use quire::{Formatted, format_str};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Format `input` and fail if anything was reported.
pub fn format_clean(input: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    init_logging();
    let Formatted { lines, diagnostics } = format_str(input)?;
    if let Some(first) = diagnostics.first() {
        return Err(format!("unexpected diagnostic: {first}").into());
    }
    Ok(lines)
}

/// Split formatted lines into pages at page break markers.
pub fn pages(lines: &[String]) -> Vec<Vec<&str>> {
    let mut pages = vec![Vec::new()];
    for line in lines {
        match line.strip_prefix(quire::PAGE_BREAK) {
            Some(rest) => pages.push(vec![rest]),
            None => {
                if let Some(page) = pages.last_mut() {
                    page.push(line.as_str());
                }
            }
        }
    }
    pages
}
