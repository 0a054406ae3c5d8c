//! Non-fatal problems found while reading a statement.
//!
//! Parsers never print. Each degraded field is recorded here and returned
//! alongside the transactions; the same event is also emitted through `tracing`.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A numeric column matched but could not be converted.
    InvalidAmount,
    /// A date matched but did not form a calendar date.
    InvalidDate,
    /// A text extraction strategy failed and the next one was tried.
    ExtractionFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    /// 1-based line (or table row) number within the scanned text, when known.
    pub line: Option<usize>,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
    line: Option<usize>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line subsequent warnings are attributed to.
    pub fn at_line(&mut self, line: usize) {
        self.line = Some(line);
    }

    pub fn clear_line(&mut self) {
        self.line = None;
    }

    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let warning = Warning {
            line: self.line,
            kind,
            message: message.into(),
        };
        tracing::warn!(kind = ?warning.kind, line = ?warning.line, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
