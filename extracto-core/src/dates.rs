//! Statement date shapes and normalization to `DD/MM/YYYY`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Format every exported date is rewritten to.
pub const CANONICAL_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `01-02-23`
    DayMonthShortYearDash,
    /// `01/02/2023`
    DayMonthYearSlash,
    /// `01/02/23`
    DayMonthShortYearSlash,
    /// `01-02-2023`
    DayMonthYearDash,
}

impl DateFormat {
    /// Order in which formats are tried when normalizing.
    pub const ALL: [DateFormat; 4] = [
        DateFormat::DayMonthShortYearDash,
        DateFormat::DayMonthYearSlash,
        DateFormat::DayMonthShortYearSlash,
        DateFormat::DayMonthYearDash,
    ];

    pub fn chrono_format(&self) -> &'static str {
        match self {
            DateFormat::DayMonthShortYearDash => "%d-%m-%y",
            DateFormat::DayMonthYearSlash => "%d/%m/%Y",
            DateFormat::DayMonthShortYearSlash => "%d/%m/%y",
            DateFormat::DayMonthYearDash => "%d-%m-%Y",
        }
    }

    /// Unanchored regex fragment matching this shape.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DayMonthShortYearDash => r"\d{2}-\d{2}-\d{2}",
            DateFormat::DayMonthYearSlash => r"\d{2}/\d{2}/\d{4}",
            DateFormat::DayMonthShortYearSlash => r"\d{2}/\d{2}/\d{2}",
            DateFormat::DayMonthYearDash => r"\d{2}-\d{2}-\d{4}",
        }
    }

    fn shape(&self) -> &'static Regex {
        static SHAPES: OnceLock<Vec<Regex>> = OnceLock::new();
        let shapes = SHAPES.get_or_init(|| {
            Self::ALL
                .iter()
                .map(|f| Regex::new(&format!("^{}$", f.pattern())).expect("date shape regex"))
                .collect()
        });
        // variants are declared in `ALL` order
        &shapes[*self as usize]
    }

    /// Parse `s` if it has exactly this shape.
    ///
    /// The shape check keeps `%Y` from accepting a two-digit year.
    pub fn parse(&self, s: &str) -> Option<NaiveDate> {
        if !self.shape().is_match(s) {
            return None;
        }
        NaiveDate::parse_from_str(s, self.chrono_format()).ok()
    }
}

/// Parse a statement date in any known format, trying them in order.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateFormat::ALL.iter().find_map(|f| f.parse(raw))
}

/// Rewrite `raw` as `DD/MM/YYYY`; unknown shapes come back unchanged.
pub fn reformat_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format(CANONICAL_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
