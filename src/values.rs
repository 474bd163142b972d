//! Script-style value semantics over JSON values.
//!
//! Templates hand helpers plain JSON, while the helper contracts (string
//! concatenation in `add`, strict equality in `is`, relational operators in
//! `gt`) are defined in terms of loosely typed script values. Every coercion
//! the helpers rely on lives here so the helper modules stay declarative.

use std::cmp::Ordering;

use serde_json::{Number, Value as Json};

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Human readable name of a JSON value's type, used in error messages.
pub fn type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// String form of a value, the way string concatenation would render it.
pub fn to_js_string(value: &Json) -> String {
    match value {
        Json::Null => "null".to_string(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => number_to_string(n),
        Json::String(s) => s.clone(),
        Json::Array(items) => items
            .iter()
            .map(|item| match item {
                Json::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Json::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        format_number(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Shortest string form of a double: integral values print without a
/// fractional part, very large and very small magnitudes use `1e+21` notation.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            value.to_string()
        }
    } else {
        with_signed_exponent(&format!("{value:e}"))
    }
}

/// Rust prints `1e21`, scripts print `1e+21`.
pub(crate) fn with_signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted.to_string(),
    }
}

/// Numeric coercion of a value. Unparseable input yields NaN.
pub fn to_number(value: &Json) -> f64 {
    match value {
        Json::Null => 0.0,
        Json::Bool(b) => f64::from(u8::from(*b)),
        Json::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Json::String(s) => parse_number_literal(s),
        Json::Array(_) => parse_number_literal(&to_js_string(value)),
        Json::Object(_) => f64::NAN,
    }
}

/// Parses a whole string as a number: surrounding whitespace is ignored and an
/// empty string is zero.
pub fn parse_number_literal(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }
    // Rust's float grammar also accepts `inf` and `nan`, which are not numbers here.
    let numeric_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric_chars {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Truthiness: `false`, `0`, `NaN`, `""` and `null` are falsy, every array and
/// object is truthy. A missing value is falsy.
pub fn is_truthy(value: Option<&Json>) -> bool {
    match value {
        None | Some(Json::Null) => false,
        Some(Json::Bool(b)) => *b,
        Some(Json::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Json::String(s)) => !s.is_empty(),
        Some(Json::Array(_)) | Some(Json::Object(_)) => true,
    }
}

/// Strict equality without type coercion. Numbers compare by value, so `1`
/// equals `1.0`; containers compare structurally.
pub fn strict_equals(left: &Json, right: &Json) -> bool {
    match (left, right) {
        (Json::Number(l), Json::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        },
        (Json::Array(l), Json::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| strict_equals(a, b))
        }
        (Json::Object(l), Json::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| strict_equals(a, b)))
        }
        _ => left == right,
    }
}

/// Strict equality where either side may be missing (`undefined`).
pub fn strict_equals_opt(left: Option<&Json>, right: Option<&Json>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => strict_equals(l, r),
        _ => false,
    }
}

/// Relational comparison. Two strings (or values whose primitive form is a
/// string) compare lexicographically, anything else numerically. `None` means
/// the values are unordered (a NaN or a missing operand was involved).
pub fn compare(left: Option<&Json>, right: Option<&Json>) -> Option<Ordering> {
    let (left, right) = (left?, right?);
    match (primitive_string(left), primitive_string(right)) {
        (Some(l), Some(r)) => Some(l.cmp(&r)),
        _ => to_number(left).partial_cmp(&to_number(right)),
    }
}

fn primitive_string(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Array(_) | Json::Object(_) => Some(to_js_string(value)),
        _ => None,
    }
}

/// Converts an arithmetic result back into JSON. Integral results become
/// integers so they render without a trailing `.0`; non-finite results become
/// their string form.
pub fn number_to_json(value: f64) -> Json {
    if !value.is_finite() {
        return Json::String(format_number(value));
    }
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Json::from(value as i64);
    }
    Number::from_f64(value).map_or(Json::Null, Json::Number)
}

/// Integer part of a numeric argument, treating NaN as zero.
pub fn to_integer(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.trunc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_js_string() {
        assert_eq!(to_js_string(&json!("plain")), "plain");
        assert_eq!(to_js_string(&json!(42)), "42");
        assert_eq!(to_js_string(&json!(4.0)), "4");
        assert_eq!(to_js_string(&json!(2.5)), "2.5");
        assert_eq!(to_js_string(&json!(null)), "null");
        assert_eq!(to_js_string(&json!([1, null, "a"])), "1,,a");
        assert_eq!(to_js_string(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_format_number_extremes() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(" 12 ")), 12.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!([7])), 7.0);
        assert_eq!(to_number(&json!("0x1A")), 26.0);
        assert!(to_number(&json!("inf")).is_nan());
        assert!(to_number(&json!("12px")).is_nan());
        assert!(to_number(&json!({})).is_nan());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
        assert!(is_truthy(Some(&json!("0"))));
    }

    #[test]
    fn test_strict_equals_has_no_coercion() {
        assert!(strict_equals(&json!(1), &json!(1.0)));
        assert!(!strict_equals(&json!(1), &json!("1")));
        assert!(!strict_equals(&json!(null), &json!(false)));
        assert!(strict_equals(&json!({"a": [1]}), &json!({"a": [1.0]})));
        assert!(strict_equals_opt(None, None));
        assert!(!strict_equals_opt(None, Some(&json!(null))));
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            compare(Some(&json!("b")), Some(&json!("a"))),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare(Some(&json!("10")), Some(&json!(9))),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare(Some(&json!("10")), Some(&json!("9"))),
            Some(Ordering::Less)
        );
        assert_eq!(compare(Some(&json!("abc")), Some(&json!(1))), None);
        assert_eq!(compare(None, Some(&json!(1))), None);
    }

    #[test]
    fn test_number_to_json() {
        assert_eq!(number_to_json(3.0), json!(3));
        assert_eq!(number_to_json(0.5), json!(0.5));
        assert_eq!(number_to_json(f64::INFINITY), json!("Infinity"));
        assert_eq!(number_to_json(f64::NAN), json!("NaN"));
    }
}
