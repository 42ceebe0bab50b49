//! Domain model for saved meeting agendas.
//!
//! # Responsibility
//! - Define the record shape shared by the store, services and exporter.
//!
//! # Invariants
//! - Sequence fields are never absent once a record exists in memory.

pub mod agenda;
