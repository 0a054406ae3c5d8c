//! Table exporter: normalizes dates, orders rows and lays out columns.

use extracto_core::{Transaction, parse_date, reformat_date};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How exported rows are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Date as text (descending), then balance (descending).
    ///
    /// On `DD/MM/YYYY` strings this orders by day first, so it is only
    /// chronological within a single month.
    #[default]
    AsText,
    /// Calendar date (descending), then balance (descending). Dates that do
    /// not parse go last.
    Chronological,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub sort: SortOrder,
    pub include_detail: bool,
    pub include_movement_kind: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sort: SortOrder::AsText,
            include_detail: true,
            include_movement_kind: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Description,
    Detail,
    Amount,
    Balance,
    MovementKind,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "fecha",
            Column::Description => "descripcion",
            Column::Detail => "detalle",
            Column::Amount => "importe",
            Column::Balance => "saldo",
            Column::MovementKind => "tipo_movimiento",
        }
    }

    pub fn render(&self, txn: &Transaction) -> String {
        match self {
            Column::Date => txn.date.clone(),
            Column::Description => txn.description.clone(),
            Column::Detail => txn.detail.clone(),
            Column::Amount => money(txn.amount),
            Column::Balance => money(txn.balance),
            Column::MovementKind => txn.movement_kind.label().to_string(),
        }
    }
}

fn money(value: f64) -> String {
    // no "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

/// Rows ready to be serialized, with their column layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Transaction>,
}

impl Table {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::header).collect()
    }

    /// Each row rendered as strings, in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows
            .iter()
            .map(|txn| self.columns.iter().map(|c| c.render(txn)).collect::<Vec<_>>())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn by_balance_desc(a: &Transaction, b: &Transaction) -> Ordering {
    b.balance.total_cmp(&a.balance)
}

fn as_text_desc(a: &Transaction, b: &Transaction) -> Ordering {
    b.date.cmp(&a.date).then_with(|| by_balance_desc(a, b))
}

fn chronological_desc(a: &Transaction, b: &Transaction) -> Ordering {
    let by_date = match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.date.cmp(&a.date),
    };
    by_date.then_with(|| by_balance_desc(a, b))
}

/// Builds export tables from parsed transactions
pub struct TableExporter;

impl TableExporter {
    pub fn export(txns: &[Transaction], options: &ExportOptions) -> Table {
        let mut rows: Vec<Transaction> = txns
            .iter()
            .map(|t| Transaction {
                date: reformat_date(&t.date),
                ..t.clone()
            })
            .collect();

        match options.sort {
            SortOrder::AsText => rows.sort_by(as_text_desc),
            SortOrder::Chronological => rows.sort_by(chronological_desc),
        }

        let mut columns = vec![Column::Date, Column::Description];
        if options.include_detail {
            columns.push(Column::Detail);
        }
        columns.extend([Column::Amount, Column::Balance]);
        if options.include_movement_kind {
            columns.push(Column::MovementKind);
        }

        tracing::debug!(rows = rows.len(), sort = ?options.sort, "table built");
        Table { columns, rows }
    }
}
