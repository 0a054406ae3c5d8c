//! Banco Galicia statement parser, tabular layout (layout-preserving text)
//!
//! Expected extracted-text section:
//!   Fecha       Descripción                  Crédito        Débito         Saldo
//!   01/02/2023  ACREDITACION HABERES      150.000,00                  157.500,00
//!   02/02/2023  PAGO SERVICIOS                             3.500,00   154.000,00
//!
//! Nothing before the header row is read. A row carries either a credit or a
//! debit value, told apart by the header column it sits under. Rows whose
//! amount carries its own sign are read by sign instead.

use extracto_core::{
    Delimiter, Diagnostics, MovementKind, Transaction, ZeroAmountPolicy, amount_or_zero,
};
use regex::{Captures, Regex};
use std::cmp::Ordering;
use std::sync::OnceLock;

use super::scanner::{AMOUNT, LineScanner, PendingRow, ROW_END, continuation_text};
use super::{Dialect, StatementParser};
use crate::options::ParseOptions;

const DELIMITERS: &[Delimiter] = &[Delimiter::Dash];

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bfecha\b.*\bsaldo\b").expect("header regex"))
}

fn credit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bcr[eé]ditos?\b").expect("credit column regex"))
}

fn debit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bd[eé]bitos?\b").expect("debit column regex"))
}

/// Row with an unsigned amount that sits under the credit or debit column.
fn column_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            concat!(
                r"^\s*(?P<date>\d{{2}}/\d{{2}}/(?:\d{{4}}|\d{{2}}))\s+",
                r"(?P<desc>.*?)\s+",
                r"(?P<amount>\d[\d.]*(?:,\d+)?)\s+",
                r"(?P<balance>{amt}){end}"
            ),
            amt = AMOUNT,
            end = ROW_END
        ))
        .expect("galicia table row regex")
    })
}

/// Row with a single signed amount field.
fn signed_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            concat!(
                r"^\s*(?P<date>\d{{2}}/\d{{2}}/(?:\d{{4}}|\d{{2}}))\s+",
                r"(?P<desc>.*?)\s+",
                r"(?P<amount>[-+]?\d[\d.]*(?:,\d+)?)\s+",
                r"(?P<balance>{amt}){end}"
            ),
            amt = AMOUNT,
            end = ROW_END
        ))
        .expect("galicia table signed row regex")
    })
}

fn char_col(line: &str, byte_idx: usize) -> usize {
    line[..byte_idx].chars().count()
}

/// Right edges (in characters) of the credit and debit header labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Columns {
    credit_end: Option<usize>,
    debit_end: Option<usize>,
}

impl Columns {
    fn from_header(line: &str) -> Option<Self> {
        if !header_re().is_match(line) {
            return None;
        }
        let credit_end = credit_re().find(line).map(|m| char_col(line, m.end()));
        let debit_end = debit_re().find(line).map(|m| char_col(line, m.end()));
        if credit_end.is_none() && debit_end.is_none() {
            return None;
        }
        Some(Self {
            credit_end,
            debit_end,
        })
    }

    /// Which column a right-aligned value ending at `end` belongs to.
    fn classify(&self, end: usize) -> Option<MovementKind> {
        let credit = self.credit_end?.abs_diff(end);
        let debit = self.debit_end?.abs_diff(end);
        match credit.cmp(&debit) {
            Ordering::Less => Some(MovementKind::Credit),
            Ordering::Greater => Some(MovementKind::Debit),
            Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GaliciaTableParser {
    zero_amount: ZeroAmountPolicy,
}

impl GaliciaTableParser {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            zero_amount: options.zero_amount,
        }
    }

    fn column_row(
        &self,
        line: &str,
        caps: &Captures<'_>,
        columns: Columns,
        diagnostics: &mut Diagnostics,
    ) -> PendingRow {
        let amount_match = &caps["amount"];
        let end = caps
            .name("amount")
            .map(|m| char_col(line, m.end()))
            .unwrap_or_default();

        let Some(kind) = columns.classify(end) else {
            return self.signed_row(caps, diagnostics);
        };

        let (amount, amount_ok) = amount_or_zero(amount_match, diagnostics);
        let (balance, _) = amount_or_zero(&caps["balance"], diagnostics);

        PendingRow {
            date: caps["date"].to_string(),
            description: caps["desc"].to_string(),
            amount,
            balance,
            movement_kind: if amount_ok {
                kind
            } else {
                MovementKind::Indeterminate
            },
        }
        .with_aligned_sign()
    }

    fn signed_row(&self, caps: &Captures<'_>, diagnostics: &mut Diagnostics) -> PendingRow {
        PendingRow::from_tokens(
            &caps["date"],
            &caps["desc"],
            &caps["amount"],
            &caps["balance"],
            self.zero_amount,
            diagnostics,
        )
    }
}

impl StatementParser for GaliciaTableParser {
    fn dialect(&self) -> Dialect {
        Dialect::GaliciaTable
    }

    fn parse_text(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<Transaction> {
        let mut scanner = LineScanner::new(DELIMITERS);
        let mut columns: Option<Columns> = None;

        for (idx, line) in text.lines().enumerate() {
            diagnostics.at_line(idx + 1);

            // The header repeats on every page; re-read it each time.
            if let Some(header) = Columns::from_header(line) {
                columns = Some(header);
                continue;
            }
            let Some(current) = columns else {
                continue;
            };

            if let Some(caps) = column_row_re().captures(line) {
                let row = self.column_row(line, &caps, current, diagnostics);
                scanner.start(row);
            } else if let Some(caps) = signed_row_re().captures(line) {
                let row = self.signed_row(&caps, diagnostics);
                scanner.start(row);
            } else if let Some(text) = continuation_text(line) {
                scanner.extend(text);
            }
        }

        diagnostics.clear_line();
        scanner.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = r#"
Banco de Galicia y Buenos Aires S.A.U.
01/01/2023  SALDO INICIAL      10.000,00   10.000,00
Fecha       Descripción                  Crédito        Débito         Saldo
01/02/2023  ACREDITACION HABERES      150.000,00                  160.000,00
02/02/2023  PAGO SERVICIOS - EDESUR                     3.500,00  156.500,00
            NRO CLIENTE 0099123 AB
03/02/2023  AJUSTE COMISION                             -150,00  156.350,00
"#;

    fn parse(text: &str, options: &ParseOptions) -> Vec<Transaction> {
        GaliciaTableParser::new(options).parse_text(text, &mut Diagnostics::new())
    }

    #[test]
    fn test_rows_before_header_are_ignored() {
        let txns = parse(STATEMENT, &ParseOptions::default());
        assert_eq!(txns.len(), 3);
        assert!(txns.iter().all(|t| t.description != "SALDO INICIAL"));
    }

    #[test]
    fn test_column_placement_decides_kind() {
        let txns = parse(STATEMENT, &ParseOptions::default());

        assert_eq!(txns[0].date, "01/02/2023");
        assert_eq!(txns[0].amount, 150000.0);
        assert_eq!(txns[0].movement_kind, MovementKind::Credit);
        assert_eq!(txns[0].balance, 160000.0);

        assert_eq!(txns[1].amount, -3500.0);
        assert_eq!(txns[1].movement_kind, MovementKind::Debit);
        assert_eq!(txns[1].description, "PAGO SERVICIOS");
        assert_eq!(txns[1].detail, "EDESUR NRO CLIENTE 0099123 AB");
    }

    #[test]
    fn test_signed_amount_falls_back_to_sign() {
        let txns = parse(STATEMENT, &ParseOptions::default());
        assert_eq!(txns[2].amount, -150.0);
        assert_eq!(txns[2].movement_kind, MovementKind::Debit);
        assert_eq!(txns[2].balance, 156350.0);
    }

    #[test]
    fn test_explicit_sign_uses_sign_and_policy() {
        let text = "Fecha  Concepto  Importe crédito/débito  Saldo\n04/02/2023  REINTEGRO  +0,00  156.350,00";
        let opts = ParseOptions {
            zero_amount: ZeroAmountPolicy::Credit,
        };
        let txns = parse(text, &opts);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 0.0);
        assert_eq!(txns[0].movement_kind, MovementKind::Credit);
    }

    #[test]
    fn test_columns_from_header() {
        let header = "Fecha   Descripción   Crédito   Débito   Saldo";
        let cols = Columns::from_header(header).unwrap();
        assert_eq!(cols.credit_end, Some(29));
        assert_eq!(cols.debit_end, Some(38));
        assert_eq!(cols.classify(28), Some(MovementKind::Credit));
        assert_eq!(cols.classify(40), Some(MovementKind::Debit));
        assert!(Columns::from_header("Fecha   Saldo").is_none());
        assert!(Columns::from_header("TOTAL CREDITOS 1.000,00").is_none());
    }
}
