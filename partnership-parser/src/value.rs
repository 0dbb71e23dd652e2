use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::{ParseError, ParseResult};

/// Reads a posting value such as `$ 1,000.00`, `-$12.50` or `25`, ignoring the currency sign,
/// digit grouping and any space between them.
pub fn parse_value(text: &str, line: usize) -> ParseResult<Decimal> {
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if digits.is_empty() {
        return Err(ParseError::malformed_value(text, line));
    }
    Decimal::from_str(&digits).map_err(|e| ParseError::decimal_value_error(e, text, line))
}
