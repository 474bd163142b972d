//! Arithmetic and number formatting helpers.

use serde_json::Value as Json;

use super::number_format::{self, MAX_FRACTION_DIGITS};
use super::{Params, Registrar};
use crate::error::HelperError;
use crate::values;

/// `+` on two values: concatenation when either side is a string, numeric
/// addition otherwise.
pub fn add(left: &Json, right: &Json) -> Json {
    if left.is_string() || right.is_string() {
        let mut joined = values::to_js_string(left);
        joined.push_str(&values::to_js_string(right));
        return Json::String(joined);
    }
    values::number_to_json(values::to_number(left) + values::to_number(right))
}

/// Nearest integer, with halves rounded toward positive infinity.
pub fn round(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value - value.floor() >= 0.5 {
        value.ceil()
    } else {
        value.floor()
    }
}

fn binary(params: &Params, op: fn(f64, f64) -> f64) -> Result<Json, HelperError> {
    let result = op(params.number(0)?, params.number(1)?);
    Ok(values::number_to_json(result))
}

fn unary(params: &Params, op: fn(f64) -> f64) -> Result<Json, HelperError> {
    Ok(values::number_to_json(op(params.number(0)?)))
}

/// Digit count argument of the formatting helpers: absent means `default`,
/// anything outside `min..=100` is rejected.
fn digit_count(
    params: &Params,
    index: usize,
    default: usize,
    min: usize,
) -> Result<usize, HelperError> {
    let Some(requested) = params.opt_number(index) else {
        return Ok(default);
    };
    let digits = values::to_integer(requested);
    if digits < min as f64 || digits > MAX_FRACTION_DIGITS as f64 {
        return Err(HelperError::OutOfRange {
            helper: params.name(),
            message: format!(
                "digit count must be between {min} and {MAX_FRACTION_DIGITS}, got {}",
                values::format_number(requested)
            ),
        });
    }
    Ok(digits as usize)
}

fn formatted(
    params: &Params,
    default_digits: usize,
    min_digits: usize,
    format: fn(f64, usize) -> String,
) -> Result<Json, HelperError> {
    let value = params.number(0)?;
    let digits = digit_count(params, 1, default_digits, min_digits)?;
    Ok(Json::String(format(value, digits)))
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.value("add", |p| Ok(add(p.required(0)?, p.required(1)?)));
    registrar.value("subtract", |p| binary(p, |a, b| a - b));
    registrar.value("multiply", |p| binary(p, |a, b| a * b));
    registrar.value("divide", |p| binary(p, |a, b| a / b));
    registrar.value("floor", |p| unary(p, f64::floor));
    registrar.value("ceil", |p| unary(p, f64::ceil));
    registrar.value("round", |p| unary(p, round));
    registrar.value("toFixed", |p| formatted(p, 0, 0, number_format::to_fixed));
    registrar.value("toPrecision", |p| {
        formatted(p, 1, 1, number_format::to_precision)
    });
    registrar.value("toExponential", |p| {
        formatted(p, 0, 0, number_format::to_exponential)
    });
    registrar.value("toInt", |p| {
        Ok(values::number_to_json(number_format::parse_int(&p.string(0)?)))
    });
    registrar.value("toFloat", |p| {
        Ok(values::number_to_json(number_format::parse_float(&p.string(0)?)))
    });
    registrar.value("addCommas", |p| {
        Ok(Json::String(number_format::add_commas(&p.string(0)?)))
    });
}
