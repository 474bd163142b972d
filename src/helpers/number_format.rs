//! Decimal formatting of doubles: fixed point, exponential and precision
//! forms, leading-number parsing and digit grouping.
//!
//! Rounding is half away from zero on the exact decimal value of the double,
//! so `1.005` (stored as `1.00499..`) rounds to `1.00` while `2.5` rounds to
//! `3`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::values;

/// Extra digits formatted past the rounding position. The dropped part is
/// inspected only for its first digit.
const GUARD_DIGITS: usize = 25;

/// Largest digit argument accepted by the formatting helpers.
pub const MAX_FRACTION_DIGITS: usize = 100;

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid pattern"));
static LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?))")
        .expect("valid pattern")
});
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid pattern"));

/// Adds one unit in the last place of a decimal string, carrying through
/// nines. A `.` is passed over.
fn increment_decimal(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            d => {
                *c = char::from(d as u8 + 1);
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

fn rounds_up(dropped: &str) -> bool {
    dropped.as_bytes().first().is_some_and(|d| *d >= b'5')
}

fn sign_of(value: f64) -> &'static str {
    if value < 0.0 {
        "-"
    } else {
        ""
    }
}

fn non_finite(value: f64) -> Option<String> {
    (!value.is_finite()).then(|| values::format_number(value))
}

/// Significant digits (`fraction_digits + 1` of them) and decimal exponent of
/// a non-negative magnitude.
fn exponential_parts(magnitude: f64, fraction_digits: usize) -> (String, i32) {
    if magnitude == 0.0 {
        return ("0".repeat(fraction_digits + 1), 0);
    }

    let formatted = format!("{:.*e}", fraction_digits + GUARD_DIGITS, magnitude);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let (kept, dropped) = digits.split_at(fraction_digits + 1);
    let mut kept = kept.to_string();
    if rounds_up(dropped) {
        kept = increment_decimal(&kept);
        if kept.len() > fraction_digits + 1 {
            kept.truncate(fraction_digits + 1);
            exponent += 1;
        }
    }
    (kept, exponent)
}

fn exponent_suffix(exponent: i32) -> String {
    if exponent < 0 {
        format!("e{exponent}")
    } else {
        format!("e+{exponent}")
    }
}

/// `value` with exactly `fraction_digits` digits after the point. Magnitudes
/// of `1e21` and above fall back to the shortest string form.
pub fn to_fixed(value: f64, fraction_digits: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }
    if value.abs() >= 1e21 {
        return values::format_number(value);
    }

    let formatted = format!("{:.*}", fraction_digits + GUARD_DIGITS, value.abs());
    let (kept, dropped) = formatted.split_at(formatted.len() - GUARD_DIGITS);
    let kept = kept.strip_suffix('.').unwrap_or(kept);
    let rounded = if rounds_up(dropped) {
        increment_decimal(kept)
    } else {
        kept.to_string()
    };
    format!("{}{rounded}", sign_of(value))
}

/// One digit before the point, `fraction_digits` after it, and a signed
/// exponent: `1.5e+2`.
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }

    let (digits, exponent) = exponential_parts(value.abs(), fraction_digits);
    let (lead, rest) = digits.split_at(1);
    let mantissa = if rest.is_empty() {
        lead.to_string()
    } else {
        format!("{lead}.{rest}")
    };
    format!("{}{mantissa}{}", sign_of(value), exponent_suffix(exponent))
}

/// `precision` significant digits, in fixed notation unless the exponent is
/// below -6 or at least `precision`.
pub fn to_precision(value: f64, precision: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text;
    }

    let precision = precision.max(1);
    let (digits, exponent) = exponential_parts(value.abs(), precision - 1);
    let sign = sign_of(value);

    if exponent < -6 || exponent >= precision as i32 {
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{lead}.{rest}")
        };
        return format!("{sign}{mantissa}{}", exponent_suffix(exponent));
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }

    let (whole, fraction) = digits.split_at(exponent as usize + 1);
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

/// Leading base-10 integer of `text`, NaN when it does not start with one.
pub fn parse_int(text: &str) -> f64 {
    LEADING_INTEGER
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Leading decimal literal of `text`, NaN when it does not start with one.
pub fn parse_float(text: &str) -> f64 {
    let Some(caps) = LEADING_DECIMAL.captures(text) else {
        return f64::NAN;
    };
    let literal = &caps[1];
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => literal.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Inserts thousands separators into every run of digits.
pub fn add_commas(text: &str) -> String {
    DIGIT_RUN
        .replace_all(text, |caps: &Captures| group_thousands(&caps[0]))
        .into_owned()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        Lazy::force(&LEADING_INTEGER);
        Lazy::force(&LEADING_DECIMAL);
        Lazy::force(&DIGIT_RUN);
    }

    #[test]
    fn test_to_fixed_rounds_half_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.45, 1), "1.4"); // stored as 1.4499..
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(5.123456, 2), "5.12");
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(99.5, 0), "100");
    }

    #[test]
    fn test_to_fixed_pads_and_passes_through() {
        assert_eq!(to_fixed(3.0, 3), "3.000");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(150.0, 1), "1.5e+2");
        assert_eq!(to_exponential(123456.0, 0), "1e+5");
        assert_eq!(to_exponential(0.0001220703125, 2), "1.22e-4");
        assert_eq!(to_exponential(9.99, 1), "1.0e+1");
        assert_eq!(to_exponential(0.0, 2), "0.00e+0");
        assert_eq!(to_exponential(-5.0, 0), "-5e+0");
    }

    #[test]
    fn test_to_precision() {
        assert_eq!(to_precision(123.456, 4), "123.5");
        assert_eq!(to_precision(123.456, 1), "1e+2");
        assert_eq!(to_precision(0.000123, 2), "0.00012");
        assert_eq!(to_precision(5.0, 3), "5.00");
        assert_eq!(to_precision(0.0000001, 1), "1e-7");
        assert_eq!(to_precision(99.0, 2), "99");
        assert_eq!(to_precision(-1.25, 2), "-1.3");
    }

    #[test]
    fn test_parse_leading_numbers() {
        assert_eq!(parse_int("42px"), 42.0);
        assert_eq!(parse_int("  -7.9"), -7.0);
        assert!(parse_int("px42").is_nan());

        assert_eq!(parse_float("3.14abc"), 3.14);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("-Infinity and beyond"), f64::NEG_INFINITY);
        assert!(parse_float("abc").is_nan());
    }

    #[test]
    fn test_add_commas() {
        assert_eq!(add_commas("1234567"), "1,234,567");
        assert_eq!(add_commas("123"), "123");
        assert_eq!(add_commas("-1234.5"), "-1,234.5");
        assert_eq!(add_commas("1234.5678"), "1,234.5,678");
    }

    #[test]
    fn test_increment_decimal_carries() {
        assert_eq!(increment_decimal("1.99"), "2.00");
        assert_eq!(increment_decimal("999"), "1000");
    }
}
