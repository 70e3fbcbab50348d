pub mod error;
pub mod lexer;

pub use error::MarkupError;
pub use lexer::{Lexer, command_event, tokenize};
