pub mod error;
pub mod event;
pub mod settings;

pub use error::ConfigError;
pub use event::{Event, FormatOption};
pub use settings::{FormatSettings, defaults};
