//! Identifier formatting and letter casing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches identifiers the catalog stores in their canonical (unquoted) form.
static UNQUOTED_SAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z_0-9]*$").expect("valid identifier pattern"));

/// Letter casing for keywords, identifiers and type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    #[default]
    Lower,
    Upper,
}

impl Casing {
    pub fn from_upper(use_upper_case: bool) -> Self {
        if use_upper_case { Self::Upper } else { Self::Lower }
    }

    /// Parse casing from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lower" => Some(Self::Lower),
            "upper" => Some(Self::Upper),
            _ => None,
        }
    }

    /// Apply this casing to a keyword or type name.
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Lower => s.to_lowercase(),
            Self::Upper => s.to_uppercase(),
        }
    }
}

/// True when `name` can be emitted without quotes.
pub fn is_unquoted_safe(name: &str) -> bool {
    UNQUOTED_SAFE.is_match(name)
}

/// Format an identifier for SQL output.
///
/// Canonical names (`^[A-Z_0-9]*$`) are folded to `casing` and left bare.
/// Anything else keeps its exact spelling and is wrapped in double quotes.
pub fn format_identifier(name: &str, casing: Casing) -> String {
    if is_unquoted_safe(name) {
        casing.apply(name)
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Format an identifier for display, where quoting is not wanted.
///
/// Case-sensitive names come back verbatim.
pub fn display_identifier(name: &str, casing: Casing) -> String {
    if is_unquoted_safe(name) {
        casing.apply(name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_safe_is_folded() {
        assert_eq!(format_identifier("CUSTOMER_ID", Casing::Lower), "customer_id");
        assert_eq!(format_identifier("CUSTOMER_ID", Casing::Upper), "CUSTOMER_ID");
        assert_eq!(format_identifier("T2", Casing::Lower), "t2");
    }

    #[test]
    fn test_mixed_case_is_quoted_verbatim() {
        assert_eq!(format_identifier("Orders", Casing::Lower), "\"Orders\"");
        assert_eq!(format_identifier("Orders", Casing::Upper), "\"Orders\"");
        assert_eq!(format_identifier("ORDER ITEMS", Casing::Upper), "\"ORDER ITEMS\"");
        assert_eq!(format_identifier("a-b", Casing::Lower), "\"a-b\"");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        assert_eq!(format_identifier("say\"hi", Casing::Lower), "\"say\"\"hi\"");
    }

    #[test]
    fn test_upper_formatting_is_idempotent() {
        let once = format_identifier("LINE_ITEM_2", Casing::Upper);
        let twice = format_identifier(&once, Casing::Upper);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_display_identifier_never_quotes() {
        assert_eq!(display_identifier("Orders", Casing::Upper), "Orders");
        assert_eq!(display_identifier("ORDERS", Casing::Lower), "orders");
        assert_eq!(display_identifier("ORDERS", Casing::Upper), "ORDERS");
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(format_identifier("", Casing::Upper), "");
    }

    #[test]
    fn test_casing_from_str() {
        assert_eq!(Casing::from_str("UPPER"), Some(Casing::Upper));
        assert_eq!(Casing::from_str("lower"), Some(Casing::Lower));
        assert_eq!(Casing::from_str("title"), None);
        assert_eq!(Casing::from_upper(true), Casing::Upper);
    }
}
