// Error types shared by the parser, the event store and the storage layer.
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing the events file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file exists but does not hold a valid event list.
    #[error("events file '{}' is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("could not access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the data directory")]
    NoDataDir,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StorageError::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Everything that can go wrong between reading a command line and applying it.
///
/// The `Display` text is what the user sees in the status line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(
        "Please enter a command, for example: /addevent 'Take out the trash' 12:00-12:30 #chores. Use /help to see available commands."
    )]
    NoCommand,

    #[error("Invalid command '/{0}'. Use /help to see available commands.")]
    UnknownCommand(String),

    #[error("Please include a title in quotes, for example: /addevent 'Take out dog' 13:15-13:45")]
    MissingTitle,

    #[error(
        "Please include a time range like this: /addevent 'Take out dog' 13:15-13:45"
    )]
    MissingTimeRange,

    #[error("'{0}' is not a valid time range. Use HH:MM-HH:MM with hours 00-23.")]
    InvalidTimeFormat(String),

    #[error("'{0}' ends before it starts.")]
    InvertedTimeRange(String),

    #[error("There are no events yet! Use the /addevent command to add an event.")]
    StoreEmpty,

    #[error("'{0}' was not found in your events. Please check your spelling.")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] StorageError),
}
