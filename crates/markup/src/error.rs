use thiserror::Error;

/// Problems found while tokenizing markup. Line numbers are 1-based and
/// relative to the text being tokenized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("line {line}: unknown command '\\{name}'")]
    UnknownCommand { name: String, line: usize },

    #[error("line {line}: '\\{command}' requires an argument")]
    MissingArgument { command: String, line: usize },

    #[error("line {line}: '\\{command}' expects an integer, got '{value}'")]
    InvalidArgument {
        command: String,
        value: String,
        line: usize,
    },

    #[error("line {line}: unbalanced argument to '\\{command}'")]
    MalformedArgument { command: String, line: usize },

    #[error("line {line}: unexpected character {found:?}")]
    UnexpectedCharacter { found: char, line: usize },
}

impl MarkupError {
    /// Fatal errors leave the input unreadable past the error position.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MarkupError::MalformedArgument { .. } | MarkupError::UnexpectedCharacter { .. }
        )
    }
}
