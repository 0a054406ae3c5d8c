//! Line-by-line scan shared by the text dialects.
//!
//! The scan is a two-state machine. `Idle` has no open row; `Accumulating`
//! holds the last primary row so that indented lines below it can extend it.
//! The primary description is split into description/detail once, when the
//! row opens; continuation text is only appended.

use extracto_core::{
    Delimiter, Diagnostics, MovementKind, Transaction, ZeroAmountPolicy, amount_or_zero,
    collapse_whitespace, split_description,
};
use regex::Regex;
use std::sync::OnceLock;

/// Amount token: optional minus, digits with dot grouping, optional comma decimals.
pub(crate) const AMOUNT: &str = r"-?\d[\d.]*(?:,\d+)?";

/// End of a row after the balance: nothing, or digit-free trailing text
/// (`CR`, `DB`, column markers).
pub(crate) const ROW_END: &str = r"(?:\s+\D*)?$";

/// A primary row that has not been closed yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingRow {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub balance: f64,
    pub movement_kind: MovementKind,
}

impl PendingRow {
    /// Build a row whose kind comes from the amount's sign.
    ///
    /// An unreadable amount becomes `0.0` / `Indeterminate`; an unreadable
    /// balance becomes `0.0`. Both leave a warning behind.
    pub fn from_tokens(
        date: &str,
        description: &str,
        amount: &str,
        balance: &str,
        zero_amount: ZeroAmountPolicy,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let (amount, amount_ok) = amount_or_zero(amount, diagnostics);
        let (balance, _) = amount_or_zero(balance, diagnostics);
        let movement_kind = if amount_ok {
            MovementKind::from_amount(amount, zero_amount)
        } else {
            MovementKind::Indeterminate
        };

        Self {
            date: date.to_string(),
            description: description.to_string(),
            amount,
            balance,
            movement_kind,
        }
        .with_aligned_sign()
    }

    /// Force the amount's sign to agree with the movement kind.
    pub fn with_aligned_sign(mut self) -> Self {
        match self.movement_kind {
            MovementKind::Debit if self.amount > 0.0 => self.amount = -self.amount,
            MovementKind::Credit if self.amount < 0.0 => self.amount = -self.amount,
            _ => {}
        }
        self
    }

    fn open(self, delimiters: &[Delimiter]) -> Transaction {
        let (description, detail) = split_description(&self.description, delimiters);
        Transaction {
            date: self.date,
            description,
            detail,
            amount: self.amount,
            balance: self.balance,
            movement_kind: self.movement_kind,
        }
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    Accumulating(Transaction),
}

#[derive(Debug)]
pub(crate) struct LineScanner {
    state: ScanState,
    last_date: Option<String>,
    delimiters: &'static [Delimiter],
    out: Vec<Transaction>,
}

impl LineScanner {
    pub fn new(delimiters: &'static [Delimiter]) -> Self {
        Self {
            state: ScanState::Idle,
            last_date: None,
            delimiters,
            out: Vec::new(),
        }
    }

    /// Date of the most recent primary row, if any.
    pub fn last_date(&self) -> Option<&str> {
        self.last_date.as_deref()
    }

    /// A primary line: close the open row and open `row`.
    pub fn start(&mut self, row: PendingRow) {
        tracing::debug!(date = %row.date, amount = row.amount, "row");
        self.close_open_row();
        self.last_date = Some(row.date.clone());
        self.state = ScanState::Accumulating(row.open(self.delimiters));
    }

    /// A continuation line: append to the open row's detail, or to its
    /// description when it has no detail. Ignored while idle.
    pub fn extend(&mut self, text: &str) -> bool {
        let text = collapse_whitespace(text);
        match &mut self.state {
            ScanState::Accumulating(_) if text.is_empty() => false,
            ScanState::Accumulating(txn) => {
                let field = if txn.detail.is_empty() {
                    &mut txn.description
                } else {
                    &mut txn.detail
                };
                if !field.is_empty() {
                    field.push(' ');
                }
                field.push_str(&text);
                true
            }
            ScanState::Idle => false,
        }
    }

    /// Close whatever is open without starting a new row.
    pub fn close_open_row(&mut self) {
        if let ScanState::Accumulating(txn) = std::mem::take(&mut self.state) {
            self.out.push(txn);
        }
    }

    pub fn finish(mut self) -> Vec<Transaction> {
        self.close_open_row();
        self.out
    }
}

fn continuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]+(?P<text>\S.*?)\s*$").expect("continuation regex"))
}

/// A money column closing the line: decimal comma with two places.
/// Bare integers (CUIT, policy and reference numbers) do not count.
fn trailing_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\s)-?\d[\d.]*,\d{2}\s*$").expect("trailing amount regex"))
}

/// Text of an indented line that does not end in an amount column.
pub(crate) fn continuation_text(line: &str) -> Option<&str> {
    if trailing_amount_re().is_match(line) {
        return None;
    }
    continuation_re()
        .captures(line)
        .and_then(|caps| caps.name("text"))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, description: &str, amount: f64) -> PendingRow {
        PendingRow {
            date: date.to_string(),
            description: description.to_string(),
            amount,
            balance: 100.0,
            movement_kind: MovementKind::from_amount(amount, ZeroAmountPolicy::Debit),
        }
    }

    #[test]
    fn test_idle_ignores_continuations() {
        let mut scanner = LineScanner::new(&[Delimiter::Dash]);
        assert!(!scanner.extend("ORPHAN TEXT"));
        assert!(scanner.finish().is_empty());
    }

    #[test]
    fn test_continuation_extends_description_without_split() {
        let mut scanner = LineScanner::new(&[Delimiter::Dash]);
        scanner.start(row("01/02/2023", "TRANSFERENCIA RECIBIDA", 10.0));
        assert!(scanner.extend("  CUIT   20-12345678-9"));
        scanner.start(row("02/02/2023", "PAGO", -5.0));

        let txns = scanner.finish();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].description, "TRANSFERENCIA RECIBIDA CUIT 20-12345678-9");
        assert_eq!(txns[0].detail, "");
        assert_eq!(txns[1].description, "PAGO");
    }

    #[test]
    fn test_continuation_goes_to_detail_once_split() {
        let mut scanner = LineScanner::new(&[Delimiter::Dash]);
        scanner.start(row("01/02/2023", "COMPRA DEBITO - SUPERMERCADO", -10.0));
        assert!(scanner.extend("SUCURSAL 12 - CABA"));

        let txns = scanner.finish();
        assert_eq!(txns[0].description, "COMPRA DEBITO");
        assert_eq!(txns[0].detail, "SUPERMERCADO SUCURSAL 12 - CABA");
    }

    #[test]
    fn test_last_date_tracks_primary_rows() {
        let mut scanner = LineScanner::new(&[]);
        assert_eq!(scanner.last_date(), None);
        scanner.start(row("01-02-23", "X", 1.0));
        assert_eq!(scanner.last_date(), Some("01-02-23"));
    }

    #[test]
    fn test_unreadable_amount_is_indeterminate() {
        let mut diags = Diagnostics::new();
        let row = PendingRow::from_tokens("01/02/2023", "X", "1,2,3", "10,00", ZeroAmountPolicy::Debit, &mut diags);
        assert_eq!(row.amount, 0.0);
        assert_eq!(row.movement_kind, MovementKind::Indeterminate);
        assert_eq!(row.balance, 10.0);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_aligned_sign() {
        let mut r = row("d", "x", 50.0);
        r.movement_kind = MovementKind::Debit;
        assert_eq!(r.with_aligned_sign().amount, -50.0);
    }

    #[test]
    fn test_continuation_text() {
        assert_eq!(continuation_text("     CUIT 20-12345678-9 PEREZ"), Some("CUIT 20-12345678-9 PEREZ"));
        assert_eq!(continuation_text("NOT INDENTED"), None);
        assert_eq!(continuation_text("    SALDO ANTERIOR   1.000,00"), None);
        assert_eq!(continuation_text("    TOTAL -250,50"), None);
        assert_eq!(continuation_text("            POLIZA NRO 778812"), Some("POLIZA NRO 778812"));
        assert_eq!(continuation_text("    CUIT 20-12345678-9"), Some("CUIT 20-12345678-9"));
        assert_eq!(continuation_text("      "), None);
    }
}
