mod common;

use common::{TestResult, format_clean, pages};

#[test]
fn test_pages_are_split_by_height() -> TestResult {
    let lines = format_clean("\\textheight{2}\\nofill\none\ntwo\nthree\nfour\nfive\n")?;
    assert_eq!(lines, ["one", "two", "\u{c}three", "four", "\u{c}five"]);
    assert_eq!(
        pages(&lines),
        [vec!["one", "two"], vec!["three", "four"], vec!["five"]]
    );
    Ok(())
}

#[test]
fn test_paragraph_skip_is_dropped_at_top_of_page() -> TestResult {
    let lines = format_clean("\\textheight{2}\\parskip{1}\\parindent{0}a\n\nb\n\nc")?;
    assert_eq!(lines, ["a", "", "\u{c}b", "", "\u{c}c"]);
    Ok(())
}

#[test]
fn test_unlimited_height_has_no_breaks() -> TestResult {
    let input = "\\nofill\n".to_string() + &"line\n".repeat(200);
    let lines = format_clean(&input)?;
    assert_eq!(lines.len(), 200);
    assert_eq!(pages(&lines).len(), 1);
    Ok(())
}
