//! Seams to whatever turns a statement file into text or table cells.
//!
//! Implementations live with the caller (the CLI wires up PDF and plain-text
//! readers); this module only defines the contracts and the one-shot fallback
//! between two text strategies.

use extracto_core::{Diagnostics, Error, Result, WarningKind};
use std::path::Path;

use crate::document::{StatementDocument, TableRow};

/// A strategy for pulling page text out of a statement file.
pub trait TextExtractor {
    /// Short name used in logs and warnings.
    fn name(&self) -> &'static str;

    /// Extracted text, one entry per page.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// A strategy for pulling table cells out of a statement file.
pub trait TableExtractor {
    fn name(&self) -> &'static str;

    fn extract_table_rows(&self, path: &Path) -> Result<Vec<TableRow>>;
}

fn has_text(pages: &[String]) -> bool {
    pages.iter().any(|p| !p.trim().is_empty())
}

/// Extract text with `primary`; if it fails or yields only whitespace, try
/// `fallback` once. Both failing is [`Error::NoTextExtracted`].
pub fn extract_with_fallback(
    path: &Path,
    primary: &dyn TextExtractor,
    fallback: &dyn TextExtractor,
    diagnostics: &mut Diagnostics,
) -> Result<StatementDocument> {
    match primary.extract_pages(path) {
        Ok(pages) if has_text(&pages) => {
            tracing::debug!(strategy = primary.name(), pages = pages.len(), "text extracted");
            return Ok(StatementDocument::from_pages(pages));
        }
        Ok(_) => diagnostics.warn(
            WarningKind::ExtractionFallback,
            format!("{} returned no text, trying {}", primary.name(), fallback.name()),
        ),
        Err(err) => diagnostics.warn(
            WarningKind::ExtractionFallback,
            format!("{err}, trying {}", fallback.name()),
        ),
    }

    match fallback.extract_pages(path) {
        Ok(pages) if has_text(&pages) => {
            tracing::debug!(strategy = fallback.name(), pages = pages.len(), "text extracted");
            Ok(StatementDocument::from_pages(pages))
        }
        Ok(_) => Err(Error::NoTextExtracted {
            path: path.to_path_buf(),
        }),
        Err(err) => {
            tracing::warn!(strategy = fallback.name(), error = %err, "fallback extraction failed");
            Err(Error::NoTextExtracted {
                path: path.to_path_buf(),
            })
        }
    }
}
