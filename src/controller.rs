// File: src/controller.rs
//! Central command dispatcher.
//!
//! Every UI layer (TUI, `exec` subcommand, tests) hands raw lines or parsed
//! commands to `Dispatcher`, which owns the `EventStore` and answers with a
//! `CommandResult` describing what to show next. The dispatcher never draws
//! anything; the only thing it asks of the UI is a yes/no answer.
use crate::config::Config;
use crate::context::AppContext;
use crate::error::{CommandError, StorageError};
use crate::model::{Command, Event, ParsedCommand, parse};
use crate::storage::EventStorage;
use crate::store::{Confirm, EditOutcome, EventStore, RemoveAllOutcome, RemoveOutcome};

/// What the list panel should display after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Keep whatever is on screen.
    Unchanged,
    Events(Vec<Event>),
}

/// Requests the UI has to act on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    None,
    ShowHelp,
    /// The UI should ask for confirmation and quit on "yes".
    ExitRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: String,
    pub view: View,
    pub signal: Signal,
}

impl CommandResult {
    fn show(status: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            status: status.into(),
            view: View::Events(events),
            signal: Signal::None,
        }
    }

    fn status_only(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            view: View::Unchanged,
            signal: Signal::None,
        }
    }

    fn signal(status: impl Into<String>, signal: Signal) -> Self {
        Self {
            status: status.into(),
            view: View::Unchanged,
            signal,
        }
    }
}

pub struct Dispatcher {
    store: EventStore,
}

impl Dispatcher {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Open the events file selected by `config` and build a dispatcher on it.
    pub fn from_config(ctx: &dyn AppContext, config: &Config) -> Result<Self, StorageError> {
        let storage = EventStorage::from_config(ctx, config)?;
        log::info!("Using events file {}", storage.path().display());
        let store = EventStore::open(storage).with_strict_ranges(config.reject_inverted_ranges);
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Parse and run one input line.
    pub fn execute(&mut self, line: &str, confirm: &mut dyn Confirm) -> CommandResult {
        match parse(line) {
            Ok(parsed) => self.dispatch(&parsed, confirm),
            Err(err) => {
                log::debug!("Rejected input {:?}: {}", line, err);
                CommandResult::status_only(err.to_string())
            }
        }
    }

    pub fn dispatch(&mut self, parsed: &ParsedCommand, confirm: &mut dyn Confirm) -> CommandResult {
        match self.apply(parsed, confirm) {
            Ok(result) => result,
            Err(CommandError::Persistence(err)) => CommandResult::show(
                format!("Change applied but not saved: {}", err),
                self.all(),
            ),
            Err(err) => CommandResult::status_only(err.to_string()),
        }
    }

    fn apply(
        &mut self,
        parsed: &ParsedCommand,
        confirm: &mut dyn Confirm,
    ) -> Result<CommandResult, CommandError> {
        let title = parsed.title.as_deref();
        let time_range = parsed.time_range.as_deref();

        let result = match parsed.command {
            Command::AddEvent => {
                let event = self.store.add(title, time_range, &parsed.tags)?;
                log::info!("Added '{}' at {}", event.title, event.time_range);
                CommandResult::show("Event added", self.all())
            }
            Command::RemoveEvent => match self.store.remove(title, confirm)? {
                RemoveOutcome::Removed(event) => {
                    log::info!("Removed '{}'", event.title);
                    CommandResult::show("Event removed", self.all())
                }
                RemoveOutcome::Kept(event) => {
                    CommandResult::show(format!("Kept '{}'", event.title), self.all())
                }
            },
            Command::RemoveAll => match self.store.remove_all(confirm)? {
                RemoveAllOutcome::Cleared(count) => {
                    log::info!("Removed all {} events", count);
                    CommandResult::show("All events removed", self.all())
                }
                RemoveAllOutcome::Cancelled => CommandResult::status_only("Nothing was removed"),
            },
            Command::EditEvent => match self.store.edit(title, time_range, &parsed.tags)? {
                EditOutcome::Updated(event) => {
                    log::info!("Edited '{}'", event.title);
                    CommandResult::show("Event updated", self.all())
                }
                EditOutcome::Unchanged(event) => CommandResult::show(
                    format!(
                        "Nothing to change for '{}'. Add a time range or #tags.",
                        event.title
                    ),
                    self.all(),
                ),
            },
            Command::View => CommandResult::show("All events", self.all()),
            Command::Tagged if parsed.tags.is_empty() => CommandResult::show(
                "No tags given, for example: /tagged #work. Enter /view to display all events.",
                vec![],
            ),
            Command::Tagged => CommandResult::show(
                format!(
                    "Events with tag(s): {}. Enter /view to display all events.",
                    parsed.tags.join(", ")
                ),
                self.store.filter_by_tags(&parsed.tags),
            ),
            Command::Search => CommandResult::status_only("Search is not available yet"),
            Command::Help => CommandResult::signal("Help", Signal::ShowHelp),
            Command::Exit => CommandResult::signal("Exit?", Signal::ExitRequested),
        };
        Ok(result)
    }

    fn all(&self) -> Vec<Event> {
        self.store.list_all().to_vec()
    }
}
