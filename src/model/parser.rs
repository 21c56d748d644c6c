// Turns a raw input line into a typed command.
use crate::error::CommandError;
use crate::model::grammar;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Every keyword the dispatcher understands, in completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    AddEvent,
    RemoveEvent,
    RemoveAll,
    EditEvent,
    View,
    Tagged,
    Search,
    Help,
    Exit,
}

impl Command {
    pub fn keyword(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: Command,
    pub title: Option<String>,
    /// Raw `HH:MM-HH:MM`; validated only by the operation that needs it.
    pub time_range: Option<String>,
    pub tags: Vec<String>,
}

pub fn parse(line: &str) -> Result<ParsedCommand, CommandError> {
    let keyword = grammar::keyword(line).ok_or(CommandError::NoCommand)?;
    let command = Command::from_str(keyword)
        .map_err(|_| CommandError::UnknownCommand(keyword.to_string()))?;

    let parsed = ParsedCommand {
        command,
        title: grammar::title(line).map(str::to_string),
        time_range: grammar::time_range(line).map(str::to_string),
        // An edit without #tags keeps the old ones, so a `#word` in the
        // title must not count as a replacement.
        tags: match command {
            Command::EditEvent => grammar::tags_outside_title(line),
            _ => grammar::tags(line),
        },
    };

    log::debug!(
        "parsed /{}: title={:?} time={:?} tags={:?}",
        parsed.command,
        parsed.title,
        parsed.time_range,
        parsed.tags
    );
    Ok(parsed)
}

/// Tab completion: `/ad` becomes `/addevent `.
///
/// Returns `None` when the line has no keyword prefix or nothing matches.
pub fn complete_keyword(line: &str) -> Option<String> {
    let prefix = grammar::keyword(line)?;
    Command::iter()
        .map(Command::keyword)
        .find(|k| k.starts_with(prefix))
        .map(|k| format!("/{} ", k))
}
