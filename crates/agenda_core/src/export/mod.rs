//! Agenda document export.
//!
//! # Responsibility
//! - Turn one agenda record into a paginated PDF and its download filename.
//!
//! # Invariants
//! - Export reads the record only; it never touches the collection or store.
//! - Section order, line numbering and filename derivation are stable.
//!
//! Export runs in three steps: [`sections`] resolves what each section shows,
//! [`layout`] positions it on pages, and [`pdf`] draws the result.

use crate::model::agenda::AgendaRecord;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub mod filename;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod sections;

pub use filename::{document_filename, filename_stem};
pub use layout::{build_layout, DocumentLayout};
pub use sections::SectionContent;

/// Caption drawn at the bottom of each page by default.
pub const DEFAULT_FOOTER: &str = "Generated by Meeting Agenda App";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    /// PDF backend rejected the document.
    Render(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(message) => write!(f, "failed to render agenda document: {message}"),
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Rendering switches for [`export_agenda`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Fill empty sections with canned example content.
    pub placeholders: bool,
    /// Page caption; `None` omits the footer.
    pub footer: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            placeholders: true,
            footer: Some(DEFAULT_FOOTER.to_string()),
        }
    }
}

impl ExportOptions {
    pub fn with_placeholders(mut self, enabled: bool) -> Self {
        self.placeholders = enabled;
        self
    }

    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }
}

/// Rendered document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl ExportedDocument {
    /// Writes the document into `dir` under its filename.
    ///
    /// Overwrites an existing file of the same name.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> ExportResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Exports `record` as a PDF document.
///
/// # Errors
/// - `Render` when the PDF backend fails.
pub fn export_agenda(
    record: &AgendaRecord,
    options: &ExportOptions,
) -> ExportResult<ExportedDocument> {
    let started_at = Instant::now();
    let content = SectionContent::resolve(record, options.placeholders);
    let layout = build_layout(&content, options.footer.as_deref());

    let bytes = match pdf::render_pdf(&layout, &content.title) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(
                "event=agenda_export module=export status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    info!(
        "event=agenda_export module=export status=ok pages={} bytes={} placeholders={} duration_ms={}",
        layout.page_count(),
        bytes.len(),
        options.placeholders,
        started_at.elapsed().as_millis()
    );

    Ok(ExportedDocument {
        filename: document_filename(&record.meeting_title),
        bytes,
        page_count: layout.page_count(),
    })
}
