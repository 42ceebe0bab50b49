//! Agenda collection use-case service.
//!
//! # Responsibility
//! - Own the in-memory agenda collection and its filtered view.
//! - Write the full collection through to the store on every mutation.
//!
//! # Invariants
//! - The store mirror always equals the in-memory collection after a call
//!   returns; failed writes roll the in-memory change back.
//! - Filtering never mutates the collection or the store.
//! - Filtered entries carry their index in the full collection.

use crate::model::agenda::AgendaRecord;
use crate::store::{AgendaStore, StoreError, StoredAgenda};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AgendaServiceResult<T> = Result<T, AgendaServiceError>;

#[derive(Debug)]
pub enum AgendaServiceError {
    /// Index does not address a record in the full collection.
    IndexOutOfBounds { index: usize, len: usize },
    Store(StoreError),
}

impl Display for AgendaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "agenda index {index} out of bounds for {len} agenda(s)")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AgendaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndexOutOfBounds { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for AgendaServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One entry of the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredAgenda<'a> {
    /// Position in the full collection; valid for `remove_at`.
    pub index: usize,
    pub record: &'a AgendaRecord,
}

/// Collection manager over an injected store.
pub struct AgendaService<S: AgendaStore> {
    store: S,
    agendas: Vec<AgendaRecord>,
    search_term: String,
    filtered: Vec<usize>,
}

impl<S: AgendaStore> AgendaService<S> {
    /// Loads and normalizes the stored collection.
    ///
    /// Never fails: unreadable state starts an empty collection.
    pub fn initialize(store: S) -> Self {
        let mut service = Self {
            store,
            agendas: Vec::new(),
            search_term: String::new(),
            filtered: Vec::new(),
        };
        service.reload();
        service
    }

    /// Replaces the in-memory collection with the stored one.
    ///
    /// The current search term is kept and re-applied.
    pub fn reload(&mut self) {
        let raw = self.store.load();
        let normalized_count = raw
            .iter()
            .filter(|record| record.needs_normalization())
            .count();
        if normalized_count > 0 {
            warn!(
                "event=agenda_load module=service status=normalized count={normalized_count}"
            );
        }

        self.agendas = raw.into_iter().map(StoredAgenda::normalize).collect();
        self.refresh_filter();
        info!(
            "event=agenda_load module=service status=ok count={}",
            self.agendas.len()
        );
    }

    /// Appends `record` and persists the collection.
    ///
    /// Returns the index of the new record.
    pub fn add(&mut self, record: AgendaRecord) -> AgendaServiceResult<usize> {
        self.agendas.push(record);
        if let Err(err) = self.store.save(&self.agendas) {
            self.agendas.pop();
            error!("event=agenda_add module=service status=error error={err}");
            return Err(err.into());
        }

        self.refresh_filter();
        let index = self.agendas.len() - 1;
        info!(
            "event=agenda_add module=service status=ok index={index} count={}",
            self.agendas.len()
        );
        Ok(index)
    }

    /// Removes the record at `index` of the full collection and persists.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` without touching the collection or the store.
    /// - `Store` when the write fails; the record is put back.
    pub fn remove_at(&mut self, index: usize) -> AgendaServiceResult<AgendaRecord> {
        let len = self.agendas.len();
        if index >= len {
            warn!("event=agenda_remove module=service status=rejected index={index} count={len}");
            return Err(AgendaServiceError::IndexOutOfBounds { index, len });
        }

        let removed = self.agendas.remove(index);
        if let Err(err) = self.store.save(&self.agendas) {
            self.agendas.insert(index, removed);
            error!("event=agenda_remove module=service status=error error={err}");
            return Err(err.into());
        }

        self.refresh_filter();
        info!(
            "event=agenda_remove module=service status=ok index={index} count={}",
            self.agendas.len()
        );
        Ok(removed)
    }

    /// Sets the search term and recomputes the filtered view.
    pub fn set_filter(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
        self.refresh_filter();
    }

    /// Returns records matching `search_term` without changing state.
    pub fn filter<'a>(&'a self, search_term: &str) -> Vec<FilteredAgenda<'a>> {
        self.agendas
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches_search(search_term))
            .map(|(index, record)| FilteredAgenda { index, record })
            .collect()
    }

    /// Current filtered view, in collection order.
    pub fn filtered(&self) -> Vec<FilteredAgenda<'_>> {
        self.filtered
            .iter()
            .filter_map(|&index| {
                self.agendas
                    .get(index)
                    .map(|record| FilteredAgenda { index, record })
            })
            .collect()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Full collection, in insertion order.
    pub fn agendas(&self) -> &[AgendaRecord] {
        &self.agendas
    }

    pub fn get(&self, index: usize) -> Option<&AgendaRecord> {
        self.agendas.get(index)
    }

    pub fn len(&self) -> usize {
        self.agendas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agendas.is_empty()
    }

    fn refresh_filter(&mut self) {
        let term = self.search_term.as_str();
        self.filtered = self
            .agendas
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches_search(term))
            .map(|(index, _)| index)
            .collect();
    }
}
