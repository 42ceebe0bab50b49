//! Persistent mirror of the agenda collection.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the service layer.
//! - Decode stored payloads into well-typed raw records at the boundary.
//!
//! # Invariants
//! - `load` never fails; unreadable or unparsable state reads as empty.
//! - `save` overwrites the full collection under one key, never patches it.

use crate::db::DbError;
use crate::model::agenda::AgendaRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod codec;
pub mod sqlite_store;

pub use codec::{decode_collection, encode_collection, StoredAgenda};
pub use sqlite_store::SqliteAgendaStore;

/// Fixed key the collection is stored under.
pub const AGENDA_COLLECTION_KEY: &str = "agendas";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while writing the collection mirror.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode agenda collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Whole-collection storage contract for agenda records.
pub trait AgendaStore {
    /// Reads every stored record. Fails soft to an empty list.
    fn load(&self) -> Vec<StoredAgenda>;
    /// Replaces the stored collection with `records`.
    fn save(&self, records: &[AgendaRecord]) -> StoreResult<()>;
}

impl<S: AgendaStore + ?Sized> AgendaStore for &S {
    fn load(&self) -> Vec<StoredAgenda> {
        (**self).load()
    }

    fn save(&self, records: &[AgendaRecord]) -> StoreResult<()> {
        (**self).save(records)
    }
}
