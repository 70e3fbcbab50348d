pub mod sink;

pub use sink::{LineSink, PageCollector, PagePrinter, SinkError};
