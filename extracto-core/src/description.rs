//! Split a raw statement description into a label and a free-text detail.

use regex::Regex;
use std::sync::OnceLock;

/// A place where a description may be cut in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// First `-`, with or without surrounding spaces.
    Dash,
    /// Literal `" POR "`.
    Por,
    /// Literal `" DE "`.
    De,
}

impl Delimiter {
    fn pattern(&self) -> &'static str {
        match self {
            Delimiter::Dash => "-",
            Delimiter::Por => " POR ",
            Delimiter::De => " DE ",
        }
    }
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// Trim and squeeze every run of whitespace to one space.
pub fn collapse_whitespace(s: &str) -> String {
    whitespace_re().replace_all(s.trim(), " ").into_owned()
}

/// Split `raw` at the first delimiter (in priority order) that occurs in it.
///
/// Returns `(description, detail)`; `detail` is empty when nothing matched.
pub fn split_description(raw: &str, delimiters: &[Delimiter]) -> (String, String) {
    let raw = collapse_whitespace(raw);

    for delimiter in delimiters {
        if let Some((head, tail)) = raw.split_once(delimiter.pattern()) {
            return (head.trim().to_string(), tail.trim().to_string());
        }
    }

    (raw, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_with_spaces() {
        let (desc, detail) = split_description("SUPERMERCADO - COMPRA TARJETA", &[Delimiter::Dash]);
        assert_eq!(desc, "SUPERMERCADO");
        assert_eq!(detail, "COMPRA TARJETA");
    }

    #[test]
    fn test_bare_dash_splits_on_first() {
        let (desc, detail) = split_description("TRANSF-CBU-0170", &[Delimiter::Dash]);
        assert_eq!(desc, "TRANSF");
        assert_eq!(detail, "CBU-0170");
    }

    #[test]
    fn test_no_delimiter() {
        let (desc, detail) = split_description("  PAGO   SERVICIOS ", &[Delimiter::Dash]);
        assert_eq!(desc, "PAGO SERVICIOS");
        assert_eq!(detail, "");
    }

    #[test]
    fn test_por_has_priority_over_de() {
        let delims = [Delimiter::Por, Delimiter::De];
        let (desc, detail) = split_description("TRANSFERENCIA DE FONDOS POR HABERES", &delims);
        assert_eq!(desc, "TRANSFERENCIA DE FONDOS");
        assert_eq!(detail, "HABERES");

        let (desc, detail) = split_description("DEBITO DE TARJETA VISA", &delims);
        assert_eq!(desc, "DEBITO");
        assert_eq!(detail, "TARJETA VISA");
    }

    #[test]
    fn test_keywords_are_case_sensitive_and_spaced() {
        let (desc, detail) = split_description("DEPOSITO EFECTIVO", &[Delimiter::Por, Delimiter::De]);
        assert_eq!(desc, "DEPOSITO EFECTIVO");
        assert_eq!(detail, "");
    }

    #[test]
    fn test_whitespace_collapsed_before_matching() {
        let (desc, detail) = split_description("COMPRA\t\tVISA   -  FARMACIA   CENTRAL", &[Delimiter::Dash]);
        assert_eq!(desc, "COMPRA VISA");
        assert_eq!(detail, "FARMACIA CENTRAL");
    }
}
