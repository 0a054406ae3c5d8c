//! extracto-ingest: statement documents, text extraction strategies and bank-specific parsers.

pub mod document;
pub mod extract;
pub mod options;
pub mod parsers;

pub use document::{Page, StatementDocument, TableRow};
pub use extract::{TableExtractor, TextExtractor, extract_with_fallback};
pub use options::ParseOptions;
pub use parsers::{Dialect, ParseOutcome, StatementParser, UnknownDialect, parse, parse_text};
