use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a movement as read from the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
    /// The amount column could not be read.
    #[serde(rename = "indeterminate")]
    Indeterminate,
}

impl MovementKind {
    /// Label used in exported tables (statements are in Spanish).
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Credit => "Crédito",
            MovementKind::Debit => "Débito",
            MovementKind::Indeterminate => "Indeterminado",
        }
    }

    /// Classify a signed amount. Zero goes wherever `policy` says.
    pub fn from_amount(amount: f64, policy: ZeroAmountPolicy) -> Self {
        if amount > 0.0 {
            MovementKind::Credit
        } else if amount < 0.0 {
            MovementKind::Debit
        } else {
            policy.kind()
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a zero amount is classified when the kind comes from the sign alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroAmountPolicy {
    /// `credit if amount > 0 else debit`
    #[default]
    Debit,
    Credit,
    Indeterminate,
}

impl ZeroAmountPolicy {
    pub fn kind(&self) -> MovementKind {
        match self {
            ZeroAmountPolicy::Debit => MovementKind::Debit,
            ZeroAmountPolicy::Credit => MovementKind::Credit,
            ZeroAmountPolicy::Indeterminate => MovementKind::Indeterminate,
        }
    }
}

/// One statement row, bank-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date exactly as matched on the statement line; normalized on export.
    pub date: String,
    pub description: String,
    /// Remainder of the original description, empty when there is none.
    pub detail: String,
    /// Positive = credit, negative = debit.
    pub amount: f64,
    /// Running balance as printed on the line.
    pub balance: f64,
    pub movement_kind: MovementKind,
}
