//! SQLite-backed agenda store.
//!
//! # Responsibility
//! - Keep the collection mirror as one JSON value in the `kv_store` table.
//!
//! # Invariants
//! - Reads never surface errors; they log and return an empty collection.
//! - Each save replaces the value under the key in a single statement.

use super::codec::{decode_collection, encode_collection, StoredAgenda};
use super::{AgendaStore, StoreResult, AGENDA_COLLECTION_KEY};
use crate::model::agenda::AgendaRecord;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};

/// Agenda store over a migrated SQLite connection.
pub struct SqliteAgendaStore<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteAgendaStore<'conn> {
    /// Creates a store using the default collection key.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, AGENDA_COLLECTION_KEY)
    }

    /// Creates a store bound to a custom key.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Returns the raw stored value, if any.
    pub fn read_raw(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()
    }

    /// Upserts `value` under the store key without encoding it.
    ///
    /// `save` writes through this after encoding the collection.
    pub fn write_raw(&self, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000);",
            params![self.key.as_str(), value],
        )?;
        Ok(())
    }
}

impl AgendaStore for SqliteAgendaStore<'_> {
    fn load(&self) -> Vec<StoredAgenda> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=store_load module=store status=ok reason=absent count=0");
                return Vec::new();
            }
            Err(err) => {
                warn!("event=store_load module=store status=degraded reason=read_failed error={err}");
                return Vec::new();
            }
        };

        let records = decode_collection(&raw);
        if records.is_empty() && raw.trim() != "[]" {
            warn!(
                "event=store_load module=store status=degraded reason=unparsable bytes={}",
                raw.len()
            );
        } else {
            debug!(
                "event=store_load module=store status=ok count={}",
                records.len()
            );
        }
        records
    }

    fn save(&self, records: &[AgendaRecord]) -> StoreResult<()> {
        let encoded = encode_collection(records)?;
        self.write_raw(&encoded)?;
        debug!(
            "event=store_save module=store status=ok count={} bytes={}",
            records.len(),
            encoded.len()
        );
        Ok(())
    }
}
