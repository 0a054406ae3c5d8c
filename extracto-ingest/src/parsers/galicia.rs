//! Banco Galicia statement parser (text)
//!
//! Expected extracted-text rows:
//!   01/02/2023  TRANSFERENCIA A TERCEROS        -2.500,00    7.500,00
//!               VARELA MARIA
//!
//! Two trailing numeric columns, amount then balance; the movement kind comes
//! from the amount's sign.

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
                r"^\s*(?P<date>\d{{2}}/\d{{2}}/(?:\d{{4}}|\d{{2}}))\s+",
                r"(?P<desc>.*?)\s+",
                r"(?P<amount>{amt})\s+",
                r"(?P<balance>{amt}){end}"
            ),
            amt = AMOUNT,
            end = ROW_END
        ))
        .expect("galicia row regex")
    })
}

#[derive(Debug, Clone)]
pub struct GaliciaParser {
    zero_amount: ZeroAmountPolicy,
}

impl GaliciaParser {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            zero_amount: options.zero_amount,
        }
    }
}

impl StatementParser for GaliciaParser {
    fn dialect(&self) -> Dialect {
        Dialect::Galicia
    }

    fn parse_text(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<Transaction> {
        let mut scanner = LineScanner::new(DELIMITERS);

        for (idx, line) in text.lines().enumerate() {
            diagnostics.at_line(idx + 1);

            if let Some(caps) = row_re().captures(line) {
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
}
