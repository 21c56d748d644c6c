// Domain model: the event entity and the command language.
pub mod event;
pub mod grammar;
pub mod parser;

pub use event::{Event, TimeRange};
pub use parser::{Command, ParsedCommand, complete_keyword, parse};
