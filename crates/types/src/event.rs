//! The event vocabulary shared by the tokenizer and the controller.

/// A formatting parameter change requested by a markup command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOption {
    Indent(i32),
    ParIndent(i32),
    TextWidth(i32),
    TextHeight(i32),
    ParSkip(i32),
    Fill(bool),
    Justify(bool),
}

impl FormatOption {
    /// The markup command that produces this option.
    pub fn command_name(&self) -> &'static str {
        match self {
            FormatOption::Indent(_) => "indent",
            FormatOption::ParIndent(_) => "parindent",
            FormatOption::TextWidth(_) => "textwidth",
            FormatOption::TextHeight(_) => "textheight",
            FormatOption::ParSkip(_) => "parskip",
            FormatOption::Fill(true) => "fill",
            FormatOption::Fill(false) => "nofill",
            FormatOption::Justify(true) => "justify",
            FormatOption::Justify(false) => "nojustify",
        }
    }
}

/// One tokenized unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A fragment of the word being built.
    Text(&'a str),
    EndOfWord,
    /// A single line terminator in the input.
    EndOfLine,
    /// Two or more consecutive line terminators.
    EndOfParagraph,
    SetOption(FormatOption),
    /// The raw, still untokenized body of an `\endnote{...}` command.
    Endnote(&'a str),
}
