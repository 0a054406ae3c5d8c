//! Banco Provincia statement parser (text)
//!
//! Expected extracted-text rows:
//!   FECHA     DESCRIPCION                       IMPORTE   FECHA VALOR     SALDO
//!   01-02-23  COMPRA DEBITO - SUPERMERCADO      -1.500,00     01-02   10.000,00
//!             TRANSFERENCIA RECIBIDA             2.000,00     01-02   12.000,00
//!             CUIT 20-12345678-9
//!
//! The value-date column is discarded. An indented row with amounts but no
//! date belongs to the last date seen.

use extracto_core::{Delimiter, Diagnostics, Transaction, ZeroAmountPolicy};
use regex::Regex;
use std::sync::OnceLock;

use super::scanner::{AMOUNT, LineScanner, PendingRow, ROW_END, continuation_text};
use super::{Dialect, StatementParser};
use crate::options::ParseOptions;

const DELIMITERS: &[Delimiter] = &[Delimiter::Dash];

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            concat!(
                r"^\s*(?P<date>\d{{2}}-\d{{2}}-\d{{2}})\s+",
                r"(?P<desc>.*?)\s+",
                r"(?P<amount>{amt})\s+",
                r"(?P<value_date>\d{{2}}-\d{{2}})\s+",
                r"(?P<balance>{amt}){end}"
            ),
            amt = AMOUNT,
            end = ROW_END
        ))
        .expect("provincia row regex")
    })
}

fn dateless_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            concat!(
                r"^[ \t]+(?P<desc>\S.*?)\s+",
                r"(?P<amount>{amt})\s+",
                r"(?P<value_date>\d{{2}}-\d{{2}})\s+",
                r"(?P<balance>{amt}){end}"
            ),
            amt = AMOUNT,
            end = ROW_END
        ))
        .expect("provincia dateless row regex")
    })
}

#[derive(Debug, Clone)]
pub struct ProvinciaParser {
    zero_amount: ZeroAmountPolicy,
}

impl ProvinciaParser {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            zero_amount: options.zero_amount,
        }
    }
}

impl StatementParser for ProvinciaParser {
    fn dialect(&self) -> Dialect {
        Dialect::Provincia
    }

    fn parse_text(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<Transaction> {
        let mut scanner = LineScanner::new(DELIMITERS);

        for (idx, line) in text.lines().enumerate() {
            diagnostics.at_line(idx + 1);

            if let Some(caps) = row_re().captures(line) {
                let row = PendingRow::from_tokens(
                    &caps["date"],
                    &caps["desc"],
                    &caps["amount"],
                    &caps["balance"],
                    self.zero_amount,
                    diagnostics,
                );
                scanner.start(row);
                continue;
            }

            if let Some(caps) = dateless_row_re().captures(line) {
                let Some(date) = scanner.last_date().map(str::to_string) else {
                    continue;
                };
                let row = PendingRow::from_tokens(
                    &date,
                    &caps["desc"],
                    &caps["amount"],
                    &caps["balance"],
                    self.zero_amount,
                    diagnostics,
                );
                scanner.start(row);
                continue;
            }

            if let Some(text) = continuation_text(line) {
                scanner.extend(text);
            }
        }

        diagnostics.clear_line();
        scanner.finish()
    }
}
