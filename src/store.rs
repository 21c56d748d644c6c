// File: src/store.rs
use crate::error::{CommandError, StorageError};
use crate::model::{Event, TimeRange};
use crate::storage::EventStorage;

/// Synchronous yes/no gate in front of destructive operations.
pub trait Confirm {
    fn confirm(&mut self, title: &str, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str, &str) -> bool,
{
    fn confirm(&mut self, title: &str, prompt: &str) -> bool {
        self(title, prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(Event),
    /// Found, but the user declined.
    Kept(Event),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveAllOutcome {
    Cleared(usize),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated(Event),
    /// Nothing to change was given.
    Unchanged(Event),
}

/// Ordered list of events. Sorted by start time after every mutation and
/// written back to storage (when attached) right after.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    storage: Option<EventStorage>,
    reject_inverted_ranges: bool,
}

impl EventStore {
    /// A store that never touches the disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `storage`. Any load failure starts an empty list; a corrupt
    /// file is first copied aside.
    pub fn open(storage: EventStorage) -> Self {
        let events = match storage.load() {
            Ok(events) => events,
            Err(err) => {
                log::warn!("Could not load events ({}), starting with an empty list", err);
                if matches!(err, StorageError::Corrupt { .. }) {
                    match storage.quarantine() {
                        Ok(copy) => log::warn!("Unreadable events file kept at {}", copy.display()),
                        Err(e) => log::warn!("Could not keep a copy of the unreadable file: {}", e),
                    }
                }
                vec![]
            }
        };

        let mut store = Self {
            events,
            storage: Some(storage),
            reject_inverted_ranges: false,
        };
        store.sort();
        store
    }

    pub fn with_strict_ranges(mut self, reject_inverted_ranges: bool) -> Self {
        self.reject_inverted_ranges = reject_inverted_ranges;
        self
    }

    pub fn list_all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events carrying at least one of `tags`, in store order.
    pub fn filter_by_tags(&self, tags: &[String]) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.has_any_tag(tags))
            .cloned()
            .collect()
    }

    pub fn add(
        &mut self,
        title: Option<&str>,
        raw_time_range: Option<&str>,
        tags: &[String],
    ) -> Result<Event, CommandError> {
        let title = Self::require_title(title)?.trim();
        let raw = raw_time_range.ok_or(CommandError::MissingTimeRange)?;
        let time_range = self.validate_range(raw)?;

        let event = Event::new(title, time_range, tags.to_vec());
        self.events.push(event.clone());
        self.sort();
        self.persist()?;
        Ok(event)
    }

    pub fn remove(
        &mut self,
        title: Option<&str>,
        confirm: &mut dyn Confirm,
    ) -> Result<RemoveOutcome, CommandError> {
        if self.events.is_empty() {
            return Err(CommandError::StoreEmpty);
        }
        let title = Self::require_title(title)?;
        let idx = self.position_of(title)?;

        let prompt = format!("Are you sure you want to remove '{}'?", self.events[idx].title);
        if !confirm.confirm("Confirm deletion", &prompt) {
            return Ok(RemoveOutcome::Kept(self.events[idx].clone()));
        }

        let removed = self.events.remove(idx);
        self.persist()?;
        Ok(RemoveOutcome::Removed(removed))
    }

    /// Clears everything after confirmation. Writes an empty list even when
    /// the store was already empty.
    pub fn remove_all(&mut self, confirm: &mut dyn Confirm) -> Result<RemoveAllOutcome, CommandError> {
        if !confirm.confirm(
            "Remove all events?",
            "Are you sure you want to remove all events?",
        ) {
            return Ok(RemoveAllOutcome::Cancelled);
        }
        let count = self.events.len();
        self.events.clear();
        self.persist()?;
        Ok(RemoveAllOutcome::Cleared(count))
    }

    /// Replace the time range and/or the tags of the first event titled `title`.
    pub fn edit(
        &mut self,
        title: Option<&str>,
        raw_time_range: Option<&str>,
        tags: &[String],
    ) -> Result<EditOutcome, CommandError> {
        if self.events.is_empty() {
            return Err(CommandError::StoreEmpty);
        }
        let title = Self::require_title(title)?;
        let idx = self.position_of(title)?;

        if raw_time_range.is_none() && tags.is_empty() {
            return Ok(EditOutcome::Unchanged(self.events[idx].clone()));
        }
        let new_range = raw_time_range
            .map(|raw| self.validate_range(raw))
            .transpose()?;

        let event = &mut self.events[idx];
        if let Some(range) = new_range {
            event.time_range = range;
        }
        if !tags.is_empty() {
            event.tags = tags.to_vec();
        }
        let updated = event.clone();

        self.sort();
        self.persist()?;
        Ok(EditOutcome::Updated(updated))
    }

    /// Non-blank title, as typed. Lookups compare it untrimmed.
    fn require_title(title: Option<&str>) -> Result<&str, CommandError> {
        match title {
            Some(t) if !t.trim().is_empty() => Ok(t),
            _ => Err(CommandError::MissingTitle),
        }
    }

    fn position_of(&self, title: &str) -> Result<usize, CommandError> {
        self.events
            .iter()
            .position(|e| e.matches_title(title))
            .ok_or_else(|| CommandError::NotFound(title.to_string()))
    }

    fn validate_range(&self, raw: &str) -> Result<TimeRange, CommandError> {
        let range = TimeRange::parse(raw)?;
        if range.is_inverted() {
            if self.reject_inverted_ranges {
                return Err(CommandError::InvertedTimeRange(raw.to_string()));
            }
            log::warn!("Accepting time range {} that does not move forward", raw);
        }
        Ok(range)
    }

    // Stable: events starting at the same time keep their insertion order.
    fn sort(&mut self) {
        self.events.sort_by_key(|e| e.time_range.start);
    }

    fn persist(&self) -> Result<(), CommandError> {
        if let Some(storage) = &self.storage {
            storage.save(&self.events).map_err(|e| {
                log::error!("Failed to save events: {}", e);
                CommandError::Persistence(e)
            })?;
        }
        Ok(())
    }
}
