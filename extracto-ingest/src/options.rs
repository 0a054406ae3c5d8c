use extracto_core::ZeroAmountPolicy;
use serde::{Deserialize, Serialize};

/// Knobs shared by every dialect parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Movement kind given to a zero amount when the kind comes from its sign.
    pub zero_amount: ZeroAmountPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_section_is_empty() {
        let opts: ParseOptions = toml::from_str("").unwrap();
        assert_eq!(opts, ParseOptions::default());
        assert_eq!(opts.zero_amount, ZeroAmountPolicy::Debit);
    }

    #[test]
    fn test_reads_policy() {
        let opts: ParseOptions = toml::from_str(r#"zero_amount = "indeterminate""#).unwrap();
        assert_eq!(opts.zero_amount, ZeroAmountPolicy::Indeterminate);
    }
}
