use std::collections::HashSet;

use tracing::{debug, error, warn};

use super::domain::SelectionEntry;
use super::persistence::{PersistenceError, SelectionPersistence, SelectionSnapshot};

/// Most colleges that can sit in the comparison list at once.
pub const COMPARE_CAPACITY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("You can compare maximum {capacity} colleges at a time")]
    CapacityExceeded { capacity: usize },
    #[error("no college with id '{0}' is available")]
    UnknownOffering(String),
}

/// Whether a mutation changed the stored lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Changed,
    Unchanged,
}

impl MutationOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, MutationOutcome::Changed)
    }
}

fn dedupe(entries: Vec<SelectionEntry>) -> Vec<SelectionEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect()
}

/// Favorites and comparison shortlist. Both lists are ordered by insertion and
/// unique by id. Every effective change is written straight through to the
/// persistence backend as one snapshot.
#[derive(Debug)]
pub struct SelectionStore<P> {
    persistence: P,
    favorites: Vec<SelectionEntry>,
    compare: Vec<SelectionEntry>,
    unsaved: bool,
}

impl<P: SelectionPersistence> SelectionStore<P> {
    /// Never fails: absent or unreadable data starts both lists empty.
    pub fn load(persistence: P) -> Self {
        let snapshot = match persistence.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => SelectionSnapshot::default(),
            Err(err) => {
                warn!(error = %err, "discarding unreadable selection record");
                SelectionSnapshot::default()
            }
        };

        let favorites = dedupe(snapshot.favorites);
        let mut compare = dedupe(snapshot.compare);
        if compare.len() > COMPARE_CAPACITY {
            warn!(
                stored = compare.len(),
                capacity = COMPARE_CAPACITY,
                "truncating persisted comparison list"
            );
            compare.truncate(COMPARE_CAPACITY);
        }

        Self {
            persistence,
            favorites,
            compare,
            unsaved: false,
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn favorites(&self) -> &[SelectionEntry] {
        &self.favorites
    }

    pub fn compare_list(&self) -> &[SelectionEntry] {
        &self.compare
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|entry| entry.id == id)
    }

    pub fn is_in_compare(&self, id: &str) -> bool {
        self.compare.iter().any(|entry| entry.id == id)
    }

    /// True when `id` is already compared or there is room for it.
    pub fn can_add_to_compare(&self, id: &str) -> bool {
        self.is_in_compare(id) || self.compare.len() < COMPARE_CAPACITY
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            favorites: self.favorites.clone(),
            compare: self.compare.clone(),
            ..SelectionSnapshot::default()
        }
    }

    pub fn add_favorite(&mut self, entry: SelectionEntry) -> MutationOutcome {
        if self.is_favorite(&entry.id) {
            return MutationOutcome::Unchanged;
        }
        debug!(id = %entry.id, "added favorite");
        self.favorites.push(entry);
        self.persist()
    }

    pub fn remove_favorite(&mut self, id: &str) -> MutationOutcome {
        let before = self.favorites.len();
        self.favorites.retain(|entry| entry.id != id);
        if self.favorites.len() == before {
            return MutationOutcome::Unchanged;
        }
        debug!(id, "removed favorite");
        self.persist()
    }

    pub fn add_to_compare(&mut self, entry: SelectionEntry) -> Result<MutationOutcome, SelectionError> {
        if self.is_in_compare(&entry.id) {
            return Ok(MutationOutcome::Unchanged);
        }
        if self.compare.len() >= COMPARE_CAPACITY {
            return Err(SelectionError::CapacityExceeded {
                capacity: COMPARE_CAPACITY,
            });
        }
        debug!(id = %entry.id, "added to comparison");
        self.compare.push(entry);
        Ok(self.persist())
    }

    pub fn remove_from_compare(&mut self, id: &str) -> MutationOutcome {
        let before = self.compare.len();
        self.compare.retain(|entry| entry.id != id);
        if self.compare.len() == before {
            return MutationOutcome::Unchanged;
        }
        debug!(id, "removed from comparison");
        self.persist()
    }

    pub fn clear_compare(&mut self) -> MutationOutcome {
        if self.compare.is_empty() {
            return MutationOutcome::Unchanged;
        }
        self.compare.clear();
        debug!("cleared comparison list");
        self.persist()
    }

    /// True when the last write-through failed and the stored record lags
    /// behind the in-memory lists.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Retries a failed write-through and reports the outcome. Does nothing
    /// when every change has already been saved.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.unsaved {
            return Ok(());
        }
        self.persistence.save(&self.snapshot())?;
        self.unsaved = false;
        Ok(())
    }

    fn persist(&mut self) -> MutationOutcome {
        match self.persistence.save(&self.snapshot()) {
            Ok(()) => self.unsaved = false,
            Err(err) => {
                error!(error = %err, "failed to persist selection");
                self.unsaved = true;
            }
        }
        MutationOutcome::Changed
    }
}
