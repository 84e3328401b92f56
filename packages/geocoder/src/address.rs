//! Free-text address parsing.
//!
//! Search input and autocomplete suggestions both arrive as one-line
//! comma-delimited strings ("123 Main St, Seattle, WA 98101"). Splitting
//! is heuristic: street, city, then a combined state + ZIP segment. The
//! autocomplete sources share this parser so suggestions and searches
//! decompose identically.

use regex::Regex;
use std::sync::LazyLock;

use crate::Address;

/// Trailing 5-digit (optionally ZIP+4) pattern used to split "WA 98101".
static STATE_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+([0-9]{5}(?:-[0-9]{4})?)$").expect("valid regex"));

/// Splits a comma-delimited address string into components.
///
/// Missing segments come back as empty strings. Never fails — garbage in
/// yields an [`Address`] with the input preserved in `full` and whatever
/// components could be recognized.
#[must_use]
pub fn parse_address(input: &str) -> Address {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();

    let street = parts.first().copied().unwrap_or_default().to_string();
    let city = parts.get(1).copied().unwrap_or_default().to_string();

    let (state, zip_code) = parts
        .get(2)
        .map_or_else(|| (String::new(), String::new()), |s| split_state_zip(s));

    Address {
        street,
        city,
        state,
        zip_code,
        full: input.to_string(),
    }
}

/// Splits "WA 98101" into ("WA", "98101"). A segment without a trailing
/// ZIP keeps the whole text in the state position with an empty ZIP.
fn split_state_zip(segment: &str) -> (String, String) {
    STATE_ZIP_RE.captures(segment).map_or_else(
        || (segment.to_string(), String::new()),
        |caps| (caps[1].to_string(), caps[2].to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_address() {
        let addr = parse_address("123 Main St, Seattle, WA 98101");
        assert_eq!(addr.street, "123 Main St");
        assert_eq!(addr.city, "Seattle");
        assert_eq!(addr.state, "WA");
        assert_eq!(addr.zip_code, "98101");
        assert_eq!(addr.full, "123 Main St, Seattle, WA 98101");
    }

    #[test]
    fn parses_zip_plus_four() {
        let addr = parse_address("456 Broadway Ave, Portland, OR 97201-1234");
        assert_eq!(addr.state, "OR");
        assert_eq!(addr.zip_code, "97201-1234");
    }

    #[test]
    fn missing_zip_keeps_segment_as_state() {
        let addr = parse_address("789 Pine St, San Francisco, California");
        assert_eq!(addr.state, "California");
        assert_eq!(addr.zip_code, "");
    }

    #[test]
    fn multi_word_state_before_zip() {
        let addr = parse_address("1600 Pennsylvania Ave, Washington, District of Columbia 20500");
        assert_eq!(addr.state, "District of Columbia");
        assert_eq!(addr.zip_code, "20500");
    }

    #[test]
    fn street_only() {
        let addr = parse_address("123 Main St");
        assert_eq!(addr.street, "123 Main St");
        assert_eq!(addr.city, "");
        assert_eq!(addr.state, "");
        assert_eq!(addr.zip_code, "");
    }

    #[test]
    fn empty_input() {
        let addr = parse_address("");
        assert_eq!(addr.street, "");
        assert_eq!(addr.full, "");
    }

    #[test]
    fn trims_segment_whitespace() {
        let addr = parse_address("  123 Main St ,  Seattle ,  WA 98101 ");
        assert_eq!(addr.street, "123 Main St");
        assert_eq!(addr.city, "Seattle");
        assert_eq!(addr.state, "WA");
        assert_eq!(addr.zip_code, "98101");
    }
}
