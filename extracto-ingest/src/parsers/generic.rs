//! Generic statement parser for banks without a dedicated dialect.
//!
//! Pages that came with table cells are read column-agnostically: the date is
//! the first cell holding a full statement date, the description the longest
//! wordy cell, and the last two numeric cells are amount and balance. Other
//! date-shaped cells (value dates, dotted dates) are never taken as amounts. Pages without cells are
//! scanned as text with a few regional row shapes.

use extracto_core::{
    DateFormat, Delimiter, Diagnostics, MovementKind, Transaction, ZeroAmountPolicy, amount_or_zero,
    parse_date, split_description,
};
use regex::Regex;
use std::sync::OnceLock;

use super::scanner::{AMOUNT, LineScanner, PendingRow, ROW_END, continuation_text};
use super::{Dialect, StatementParser};
use crate::document::{StatementDocument, TableRow};
use crate::options::ParseOptions;

const DELIMITERS: &[Delimiter] = &[Delimiter::Por, Delimiter::De];

const HEADER_KEYWORDS: &[&str] = &[
    "fecha", "date", "descrip", "concepto", "importe", "monto", "amount", "saldo", "balance",
];

/// Shorter cells are codes or references, not descriptions.
const MIN_DESCRIPTION_LEN: usize = 10;

/// Row shapes tried in order on pages without table cells.
const TEXT_DATE_FORMATS: [DateFormat; 3] = [
    DateFormat::DayMonthYearSlash,
    DateFormat::DayMonthShortYearSlash,
    DateFormat::DayMonthYearDash,
];

fn text_row_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        TEXT_DATE_FORMATS
            .iter()
            .map(|format| {
                Regex::new(&format!(
                    r"^\s*(?P<date>{date})\s+(?P<desc>.*?)\s+(?P<amount>{amt})\s+(?P<balance>{amt}){end}",
                    date = format.pattern(),
                    amt = AMOUNT,
                    end = ROW_END
                ))
                .expect("generic text row regex")
            })
            .collect()
    })
}

/// Anything shaped like a day/month/year, including shapes `parse_date` rejects.
fn date_like_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{1,2}[/.-]\d{1,2}[/.-](?:\d{4}|\d{2})$").expect("date-like cell regex")
    })
}

fn numeric_cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?\$?\s*\d[\d.,]*$").expect("numeric cell regex"))
}

fn is_header(row: &TableRow) -> bool {
    row.iter().flatten().any(|cell| {
        let cell = cell.to_lowercase();
        HEADER_KEYWORDS.iter().any(|kw| cell.contains(kw))
    })
}

fn is_numeric(cell: &str) -> bool {
    numeric_cell_re().is_match(cell)
}

/// Numeric cell as an amount token: currency sign and inner spaces dropped.
fn amount_token(cell: &str) -> String {
    cell.chars().filter(|c| *c != '$' && !c.is_whitespace()).collect()
}

fn is_wordy(cell: &str) -> bool {
    cell.chars().any(char::is_alphabetic)
}

#[derive(Debug, Clone)]
pub struct GenericParser {
    zero_amount: ZeroAmountPolicy,
}

impl GenericParser {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            zero_amount: options.zero_amount,
        }
    }

    /// Read every data row of one page's table.
    fn parse_table(&self, rows: &[TableRow], diagnostics: &mut Diagnostics) -> Vec<Transaction> {
        let start = rows.iter().position(is_header).map_or(0, |idx| idx + 1);

        rows.iter()
            .enumerate()
            .skip(start)
            .filter_map(|(idx, row)| {
                diagnostics.at_line(idx + 1);
                self.table_row(row, diagnostics)
            })
            .collect()
    }

    fn table_row(&self, row: &TableRow, diagnostics: &mut Diagnostics) -> Option<Transaction> {
        let cells: Vec<&str> = row
            .iter()
            .flatten()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();

        let date_idx = cells.iter().position(|c| parse_date(c).is_some())?;
        let rest = cells
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != date_idx)
            .map(|(_, c)| *c);

        let mut description = "";
        let mut numeric = Vec::new();
        for cell in rest {
            if date_like_re().is_match(cell) {
                continue;
            }
            if is_numeric(cell) {
                numeric.push(cell);
            } else if is_wordy(cell)
                && cell.chars().count() > MIN_DESCRIPTION_LEN
                && cell.chars().count() > description.chars().count()
            {
                description = cell;
            }
        }

        let (amount, amount_ok, balance) = match numeric.as_slice() {
            [] => (0.0, true, 0.0),
            [only] => {
                let (balance, _) = amount_or_zero(&amount_token(only), diagnostics);
                (0.0, true, balance)
            }
            [.., amount, balance] => {
                let (amount, ok) = amount_or_zero(&amount_token(amount), diagnostics);
                let (balance, _) = amount_or_zero(&amount_token(balance), diagnostics);
                (amount, ok, balance)
            }
        };

        let movement_kind = if amount_ok {
            MovementKind::from_amount(amount, self.zero_amount)
        } else {
            MovementKind::Indeterminate
        };
        let (description, detail) = split_description(description, DELIMITERS);

        Some(Transaction {
            date: cells[date_idx].to_string(),
            description,
            detail,
            amount,
            balance,
            movement_kind,
        })
    }
}

impl StatementParser for GenericParser {
    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    fn parse_text(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<Transaction> {
        let mut scanner = LineScanner::new(DELIMITERS);

        for (idx, line) in text.lines().enumerate() {
            diagnostics.at_line(idx + 1);

            let caps = text_row_res().iter().find_map(|re| re.captures(line));
            if let Some(caps) = caps {
                scanner.start(PendingRow::from_tokens(
                    &caps["date"],
                    &caps["desc"],
                    &caps["amount"],
                    &caps["balance"],
                    self.zero_amount,
                    diagnostics,
                ));
            } else if let Some(text) = continuation_text(line) {
                scanner.extend(text);
            }
        }

        diagnostics.clear_line();
        scanner.finish()
    }

    fn parse_document(
        &self,
        document: &StatementDocument,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Transaction> {
        let mut out = Vec::new();

        for (page_no, page) in document.pages().iter().enumerate() {
            let txns = match &page.table {
                Some(rows) if !rows.is_empty() => self.parse_table(rows, diagnostics),
                _ => self.parse_text(&page.text, diagnostics),
            };
            tracing::debug!(page = page_no + 1, transactions = txns.len(), "page parsed");
            out.extend(txns);
        }

        diagnostics.clear_line();
        out
    }
}
