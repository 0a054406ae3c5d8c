use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Every extraction strategy failed or produced only whitespace.
    #[error("no text extracted from {}", path.display())]
    NoTextExtracted { path: PathBuf },

    /// The document was read but no row matched the dialect's patterns.
    #[error("no transactions found for dialect '{dialect}'")]
    NoTransactions { dialect: String },

    #[error("{strategy} extraction failed: {source}")]
    Extraction {
        strategy: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn extraction(
        strategy: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Extraction {
            strategy,
            source: source.into(),
        }
    }
}
