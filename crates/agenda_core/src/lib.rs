//! Core domain logic for the meeting agenda app.
//! This crate owns the record shape, the persisted collection and PDF export.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use export::{
    export_agenda, ExportError, ExportOptions, ExportResult, ExportedDocument, DEFAULT_FOOTER,
};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::agenda::{
    ActionStatus, AgendaItem, AgendaRecord, FollowUpAction, MeetingType, Priority, UnknownLabel,
};
pub use service::agenda_service::{
    AgendaService, AgendaServiceError, AgendaServiceResult, FilteredAgenda,
};
pub use service::form_session::{FormError, FormField, FormSession};
pub use store::{
    AgendaStore, SqliteAgendaStore, StoreError, StoreResult, StoredAgenda, AGENDA_COLLECTION_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
