//! A `nom`-based tokenizer for formatter markup.
//!
//! Input is plain text interspersed with commands of the form `\name` or
//! `\name{argument}`. Blanks end words, a single line terminator ends an input
//! line, and a run of two or more terminators ends a paragraph. `\{`, `\}`,
//! `\\`, `\ ` and a backslash-tab stand for the escaped character itself.

use crate::error::MarkupError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{alpha1, anychar, char, line_ending, one_of},
    combinator::{map, recognize, value},
    multi::{many0_count, many1_count},
    sequence::{delimited, pair, preceded},
};
use quire_types::{Event, FormatOption};

// --- Main Public API ---

/// Tokenize `input` into formatter events.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// An iterator over the events in a piece of markup.
///
/// Recoverable errors (unknown commands, bad arguments) are yielded in place
/// of the offending command and tokenizing continues. After a fatal error the
/// iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    rest: &'a str,
    /// Line of the first character in `rest`.
    line: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            line: 1,
            done: false,
        }
    }

    /// The 1-based line number of the next unread character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Move past everything before `rest`, counting the line terminators
    /// consumed.
    fn advance(&mut self, rest: &'a str) {
        let consumed = &self.rest[..self.rest.len() - rest.len()];
        self.line += consumed.bytes().filter(|&b| b == b'\n').count();
        self.rest = rest;
    }

    fn command(&mut self, name: &'a str, line: usize) -> Result<Event<'a>, MarkupError> {
        let arg = if self.rest.starts_with('{') {
            match argument(self.rest) {
                Ok((rest, arg)) => {
                    self.advance(rest);
                    Some(arg)
                }
                Err(_) => {
                    self.done = true;
                    return Err(MarkupError::MalformedArgument {
                        command: name.to_string(),
                        line,
                    });
                }
            }
        } else {
            None
        };
        command_event(name, arg, line)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Event<'a>, MarkupError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.rest.is_empty() {
            return None;
        }
        let line = self.line();
        match token(self.rest) {
            Ok((rest, Token::Event(event))) => {
                self.advance(rest);
                Some(Ok(event))
            }
            Ok((rest, Token::Command(name))) => {
                self.advance(rest);
                Some(self.command(name, line))
            }
            Err(_) => {
                self.done = true;
                let found = self.rest.chars().next().unwrap_or_default();
                Some(Err(MarkupError::UnexpectedCharacter { found, line }))
            }
        }
    }
}

/// Interpret command `name` with its optional braced argument.
pub fn command_event<'a>(
    name: &str,
    arg: Option<&'a str>,
    line: usize,
) -> Result<Event<'a>, MarkupError> {
    let option = match name {
        "indent" => FormatOption::Indent(integer(name, arg, line)?),
        "parindent" => FormatOption::ParIndent(integer(name, arg, line)?),
        "textwidth" => FormatOption::TextWidth(integer(name, arg, line)?),
        "textheight" => FormatOption::TextHeight(integer(name, arg, line)?),
        "parskip" => FormatOption::ParSkip(integer(name, arg, line)?),
        "fill" => FormatOption::Fill(true),
        "nofill" => FormatOption::Fill(false),
        "justify" => FormatOption::Justify(true),
        "nojustify" => FormatOption::Justify(false),
        "endnote" => {
            return match arg {
                Some(text) if !text.is_empty() => Ok(Event::Endnote(text)),
                _ => Err(MarkupError::MissingArgument {
                    command: name.to_string(),
                    line,
                }),
            };
        }
        _ => {
            return Err(MarkupError::UnknownCommand {
                name: name.to_string(),
                line,
            });
        }
    };
    Ok(Event::SetOption(option))
}

fn integer(command: &str, arg: Option<&str>, line: usize) -> Result<i32, MarkupError> {
    let text = arg
        .filter(|text| !text.is_empty())
        .ok_or_else(|| MarkupError::MissingArgument {
            command: command.to_string(),
            line,
        })?;
    text.trim()
        .parse()
        .map_err(|_| MarkupError::InvalidArgument {
            command: command.to_string(),
            value: text.to_string(),
            line,
        })
}

// --- Token Parsers ---

#[derive(Debug, Clone, Copy)]
enum Token<'a> {
    Event(Event<'a>),
    Command(&'a str),
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_text(c: char) -> bool {
    !matches!(c, ' ' | '\t' | '\r' | '\n' | '\\' | '{' | '}')
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::Event(Event::EndOfWord), take_while1(is_blank)),
        map(many1_count(line_ending), |count| {
            Token::Event(if count > 1 {
                Event::EndOfParagraph
            } else {
                Event::EndOfLine
            })
        }),
        map(escaped_char, |c| Token::Event(Event::Text(c))),
        map(preceded(char('\\'), alpha1), Token::Command),
        map(take_while1(is_text), |text| Token::Event(Event::Text(text))),
    ))
    .parse(input)
}

fn escaped_char(input: &str) -> IResult<&str, &str> {
    preceded(char('\\'), recognize(one_of(" \t{}\\"))).parse(input)
}

// --- Command Arguments ---

/// `{...}` with escapes and at most one level of nested braces. Yields the
/// text between the outer braces.
fn argument(input: &str) -> IResult<&str, &str> {
    delimited(
        char('{'),
        recognize(many0_count(alt((escaped_pair, plain, group)))),
        char('}'),
    )
    .parse(input)
}

fn escaped_pair(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), anychar)).parse(input)
}

fn plain(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !matches!(c, '\\' | '{' | '}')).parse(input)
}

fn group(input: &str) -> IResult<&str, &str> {
    recognize((char('{'), many0_count(alt((escaped_pair, plain))), char('}'))).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<Result<Event<'_>, MarkupError>> {
        tokenize(input).collect()
    }

    fn ok_events(input: &str) -> Vec<Event<'_>> {
        tokenize(input).map(|event| event.unwrap()).collect()
    }

    #[test]
    fn test_words_blanks_and_breaks() {
        assert_eq!(
            ok_events("Hello,  world\nagain\n\n\nend"),
            vec![
                Event::Text("Hello,"),
                Event::EndOfWord,
                Event::Text("world"),
                Event::EndOfLine,
                Event::Text("again"),
                Event::EndOfParagraph,
                Event::Text("end"),
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            ok_events("a\r\nb\r\n\r\nc"),
            vec![
                Event::Text("a"),
                Event::EndOfLine,
                Event::Text("b"),
                Event::EndOfParagraph,
                Event::Text("c"),
            ]
        );
    }

    #[test]
    fn test_escaped_characters_become_text() {
        assert_eq!(
            ok_events("a\\{b\\}c\\\\d\\ e"),
            vec![
                Event::Text("a"),
                Event::Text("{"),
                Event::Text("b"),
                Event::Text("}"),
                Event::Text("c"),
                Event::Text("\\"),
                Event::Text("d"),
                Event::Text(" "),
                Event::Text("e"),
            ]
        );
    }

    #[test]
    fn test_option_commands() {
        assert_eq!(
            ok_events("\\textwidth{40}\\textheight{ 10 }\\indent{2}\\parindent{0}\\parskip{1}"),
            vec![
                Event::SetOption(FormatOption::TextWidth(40)),
                Event::SetOption(FormatOption::TextHeight(10)),
                Event::SetOption(FormatOption::Indent(2)),
                Event::SetOption(FormatOption::ParIndent(0)),
                Event::SetOption(FormatOption::ParSkip(1)),
            ]
        );
        assert_eq!(
            ok_events("\\nofill \\fill\\justify\\nojustify"),
            vec![
                Event::SetOption(FormatOption::Fill(false)),
                Event::EndOfWord,
                Event::SetOption(FormatOption::Fill(true)),
                Event::SetOption(FormatOption::Justify(true)),
                Event::SetOption(FormatOption::Justify(false)),
            ]
        );
    }

    #[test]
    fn test_negative_argument_is_passed_through() {
        assert_eq!(
            ok_events("\\textwidth{-1}"),
            vec![Event::SetOption(FormatOption::TextWidth(-1))]
        );
    }

    #[test]
    fn test_endnote_argument_keeps_nested_markup() {
        assert_eq!(
            ok_events("word\\endnote{See {\\it this} and \\} too.} more"),
            vec![
                Event::Text("word"),
                Event::Endnote("See {\\it this} and \\} too."),
                Event::EndOfWord,
                Event::Text("more"),
            ]
        );
    }

    #[test]
    fn test_recoverable_errors_do_not_stop_tokenizing() {
        let result = events("\\bogus x\\indent{two} y\\parskip z");
        assert_eq!(
            result,
            vec![
                Err(MarkupError::UnknownCommand {
                    name: "bogus".into(),
                    line: 1
                }),
                Ok(Event::EndOfWord),
                Ok(Event::Text("x")),
                Err(MarkupError::InvalidArgument {
                    command: "indent".into(),
                    value: "two".into(),
                    line: 1
                }),
                Ok(Event::EndOfWord),
                Ok(Event::Text("y")),
                Err(MarkupError::MissingArgument {
                    command: "parskip".into(),
                    line: 1
                }),
                Ok(Event::EndOfWord),
                Ok(Event::Text("z")),
            ]
        );
    }

    #[test]
    fn test_empty_endnote_is_missing_argument() {
        assert_eq!(
            events("\\endnote{}"),
            vec![Err(MarkupError::MissingArgument {
                command: "endnote".into(),
                line: 1
            })]
        );
    }

    #[test]
    fn test_unbalanced_argument_is_fatal() {
        let result = events("ok\n\\endnote{never {closed} text");
        assert_eq!(result.len(), 3);
        let err = result[2].clone().unwrap_err();
        assert_eq!(
            err,
            MarkupError::MalformedArgument {
                command: "endnote".into(),
                line: 2
            }
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_too_deeply_nested_argument_is_fatal() {
        let result = events("\\endnote{a {b {c}} d}");
        assert!(matches!(
            result.as_slice(),
            [Err(MarkupError::MalformedArgument { .. })]
        ));
    }

    #[test]
    fn test_stray_brace_stops_tokenizing() {
        let result = events("one\ntwo } three");
        assert_eq!(
            result.last(),
            Some(&Err(MarkupError::UnexpectedCharacter {
                found: '}',
                line: 2
            }))
        );
        assert!(!result.iter().any(|event| *event == Ok(Event::Text("three"))));
    }

    #[test]
    fn test_line_numbers_follow_consumed_input() {
        let mut lexer = tokenize("a\n\nb\\endnote{x\ny}\nc");
        assert_eq!(lexer.line(), 1);
        lexer.by_ref().take(3).for_each(drop);
        assert_eq!(lexer.line(), 3);
        lexer.next();
        assert_eq!(lexer.line(), 4);
        lexer.by_ref().for_each(drop);
        assert_eq!(lexer.line(), 5);
    }

    #[test]
    fn test_large_input_reports_last_line() {
        let lines = 100_000;
        let input = "word word\n".repeat(lines) + "\\bogus";
        let mut lexer = tokenize(&input);
        let count = lexer.by_ref().take(lines * 4).count();
        assert_eq!(count, lines * 4);
        assert_eq!(
            lexer.next(),
            Some(Err(MarkupError::UnknownCommand {
                name: "bogus".into(),
                line: lines + 1
            }))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_backslash_before_digit_is_unexpected() {
        let result = events("\\5");
        assert_eq!(
            result,
            vec![Err(MarkupError::UnexpectedCharacter {
                found: '\\',
                line: 1
            })]
        );
    }
}
