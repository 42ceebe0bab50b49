//! Agenda use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into collection-level commands.
//! - Keep the presentation layer away from storage details.

pub mod agenda_service;
pub mod form_session;
