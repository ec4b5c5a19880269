use crate::core::{EstimatorError, RangeBound, RevenueRange, ValueRange};
use std::str::FromStr;

#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits `"low, high"` into its two trimmed tokens. Brackets around the
/// pair (`(1, 2)`, `[1, 2]`) are tolerated.
pub fn split_pair<'a>(field: &str, text: &'a str) -> Result<(&'a str, &'a str), EstimatorError> {
    let body = strip_surrounding_quotes(text.trim()).trim();
    let body = body
        .strip_prefix(['(', '['])
        .and_then(|b| b.strip_suffix([')', ']']))
        .unwrap_or(body);

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [low, high] if !low.is_empty() && !high.is_empty() => Ok((*low, *high)),
        [single] if single.is_empty() => Err(EstimatorError::parse(field, "empty input")),
        _ => Err(EstimatorError::parse(
            field,
            format!(
                "expected two values as `low, high`, got {} in {text:?}",
                parts.len()
            ),
        )),
    }
}

fn parse_token<T: FromStr>(field: &str, token: &str) -> Result<T, EstimatorError> {
    token
        .parse()
        .map_err(|_| EstimatorError::parse(field, format!("{token:?} is not a valid number")))
}

/// Parses and validates a `"low, high"` range of `T`.
pub fn parse_range<T: RangeBound + FromStr>(
    field: &str,
    text: &str,
) -> Result<ValueRange<T>, EstimatorError> {
    let (low, high) = split_pair(field, text)?;
    ValueRange::new(field, parse_token(field, low)?, parse_token(field, high)?)
}

/// Integer range when both tokens are whole numbers, real range otherwise.
pub fn parse_revenue_range(field: &str, text: &str) -> Result<RevenueRange, EstimatorError> {
    let (low, high) = split_pair(field, text)?;
    match (low.parse::<i64>(), high.parse::<i64>()) {
        (Ok(l), Ok(h)) => Ok(RevenueRange::Integer(ValueRange::new(field, l, h)?)),
        _ => Ok(RevenueRange::Real(ValueRange::new(
            field,
            parse_token(field, low)?,
            parse_token(field, high)?,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_works() {
        assert_eq!(strip_surrounding_quotes("'a,b'"), "a,b");
        assert_eq!(strip_surrounding_quotes(r#""x""#), "x");
        assert_eq!(strip_surrounding_quotes("nq"), "nq");
    }

    #[test]
    fn parses_entry_text() {
        let r: ValueRange<u64> = parse_range("customers", "5000, 10000").unwrap();
        assert_eq!(r, ValueRange { low: 5000, high: 10000 });

        let p: ValueRange<f64> = parse_range("probability", " (0.1,0.5) ").unwrap();
        assert_eq!(p, ValueRange { low: 0.1, high: 0.5 });
    }

    #[test]
    fn rejects_under_and_over_specified_pairs() {
        for text in ["5000", "1, 2, 3", "", "  ", "1,", ",2"] {
            let err = parse_range::<u64>("customers", text).unwrap_err();
            assert!(matches!(err, EstimatorError::Parse { .. }), "{text:?} -> {err:?}");
        }
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let err = parse_range::<f64>("probability", "low, 0.5").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not parse probability: \"low\" is not a valid number"
        );
        // counts must be whole numbers
        assert!(matches!(
            parse_range::<u64>("customers", "10.5, 20").unwrap_err(),
            EstimatorError::Parse { .. }
        ));
    }

    #[test]
    fn inverted_text_range_is_a_range_error() {
        let err = parse_range::<u64>("customers", "10, 5").unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidRange { .. }));
    }

    #[test]
    fn revenue_kind_follows_the_text() {
        assert_eq!(
            parse_revenue_range("revenue", "150, 450").unwrap(),
            RevenueRange::Integer(ValueRange { low: 150, high: 450 })
        );
        assert_eq!(
            parse_revenue_range("revenue", "150, 450.5").unwrap(),
            RevenueRange::Real(ValueRange { low: 150.0, high: 450.5 })
        );
        assert!(parse_revenue_range("revenue", "abc, 1").is_err());
    }
}
