//! Concrete extraction strategies wired into the ingest seams.

use extracto_core::{Error, Result};
use extracto_ingest::{TableExtractor, TableRow, TextExtractor};
use std::fs;
use std::path::Path;
use std::process::Command;

const PAGE_BREAK: char = '\x0c';

fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
    // pdftotext ends the last page with a form feed too
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// In-process PDF text extraction.
pub struct PdfExtract;

impl TextExtractor for PdfExtract {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path)?;
        // malformed fonts can make the extractor panic instead of erroring
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| Error::extraction(self.name(), "extractor panicked"))?
            .map_err(|e| Error::extraction(self.name(), e))?;
        Ok(split_pages(&text))
    }
}

/// Layout-preserving extraction through the `pdftotext` tool.
pub struct PdfToText {
    pub command: String,
}

impl TextExtractor for PdfToText {
    fn name(&self) -> &'static str {
        "pdftotext"
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let output = Command::new(&self.command)
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-")
            .output()
            .map_err(|e| Error::extraction(self.name(), e))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::extraction(
                self.name(),
                format!("{} exited with {}: {}", self.command, output.status, stderr.trim()),
            ));
        }
        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Text files that are already extracted. `lossy` accepts non-UTF-8 bytes.
pub struct PlainText {
    pub lossy: bool,
}

impl TextExtractor for PlainText {
    fn name(&self) -> &'static str {
        if self.lossy { "text-lossy" } else { "text" }
    }

    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let text = if self.lossy {
            String::from_utf8_lossy(&fs::read(path)?).into_owned()
        } else {
            fs::read_to_string(path)?
        };
        Ok(split_pages(&text))
    }
}

/// Table cells exported to CSV, one file per page. No header handling:
/// the parser decides which rows are headers.
pub struct CsvTable;

impl TableExtractor for CsvTable {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extract_table_rows(&self, path: &Path) -> Result<Vec<TableRow>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| {
                        let cell = cell.trim();
                        (!cell.is_empty()).then(|| cell.to_string())
                    })
                    .collect(),
            );
        }
        Ok(rows)
    }
}
