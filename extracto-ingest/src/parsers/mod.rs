//! Bank-specific statement parsers.
//!
//! Each dialect implements [`StatementParser`]; the caller picks one explicitly
//! through [`Dialect`]. Output is always in document order.

pub mod galicia;
pub mod galicia_table;
pub mod generic;
pub mod provincia;
mod scanner;

use extracto_core::{Diagnostics, Error, Result, Transaction, Warning};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::StatementDocument;
use crate::options::ParseOptions;

pub use galicia::GaliciaParser;
pub use galicia_table::GaliciaTableParser;
pub use generic::GenericParser;
pub use provincia::ProvinciaParser;

pub trait StatementParser {
    fn dialect(&self) -> Dialect;

    /// Parse concatenated statement text.
    fn parse_text(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<Transaction>;

    /// Parse a whole document. Text dialects read the joined page text.
    fn parse_document(
        &self,
        document: &StatementDocument,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Transaction> {
        self.parse_text(&document.text(), diagnostics)
    }
}

/// Statement layouts this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `DD-MM-YY` rows with a value-date column.
    Provincia,
    /// `DD/MM/YYYY` rows: amount then balance.
    Galicia,
    /// Galicia statements with a credit/debit column header.
    #[serde(rename = "galicia-tabla")]
    GaliciaTable,
    /// Heuristic table extraction for any other bank.
    #[serde(rename = "generico")]
    Generic,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Provincia,
        Dialect::Galicia,
        Dialect::GaliciaTable,
        Dialect::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Provincia => "provincia",
            Dialect::Galicia => "galicia",
            Dialect::GaliciaTable => "galicia-tabla",
            Dialect::Generic => "generico",
        }
    }

    pub fn parser(&self, options: &ParseOptions) -> Box<dyn StatementParser> {
        match self {
            Dialect::Provincia => Box::new(ProvinciaParser::new(options)),
            Dialect::Galicia => Box::new(GaliciaParser::new(options)),
            Dialect::GaliciaTable => Box::new(GaliciaTableParser::new(options)),
            Dialect::Generic => Box::new(GenericParser::new(options)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}' (expected one of: provincia, galicia, galicia-tabla, generico)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Dialect::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}

/// Transactions recovered from one document, with the warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub dialect: Dialect,
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<Warning>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Turn an empty result into [`Error::NoTransactions`].
    pub fn require_transactions(self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::NoTransactions {
                dialect: self.dialect.to_string(),
            });
        }
        Ok(self)
    }
}

/// Parse a document with the given dialect.
pub fn parse(document: &StatementDocument, dialect: Dialect, options: &ParseOptions) -> ParseOutcome {
    let mut diagnostics = Diagnostics::new();
    let transactions = dialect.parser(options).parse_document(document, &mut diagnostics);
    tracing::info!(
        %dialect,
        transactions = transactions.len(),
        warnings = diagnostics.len(),
        "statement parsed"
    );

    ParseOutcome {
        dialect,
        transactions,
        warnings: diagnostics.into_warnings(),
    }
}

/// Parse plain statement text with the given dialect.
pub fn parse_text(text: &str, dialect: Dialect, options: &ParseOptions) -> ParseOutcome {
    parse(&StatementDocument::from_text(text), dialect, options)
}
