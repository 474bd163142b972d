use std::cmp::Ordering;

use serde_json::Value as Json;

use super::math;
use super::Registrar;
use crate::values;

/// Picks `plural` when `count` is zero or greater than one, `singular`
/// otherwise. With `include` set the count is prefixed.
pub fn inflect(count: &Json, singular: &str, plural: &str, include: bool) -> String {
    let one = Json::from(1);
    let is_plural = values::compare(Some(count), Some(&one)) == Some(Ordering::Greater)
        || values::strict_equals(count, &Json::from(0));
    let word = if is_plural { plural } else { singular };

    if include {
        format!("{} {word}", values::to_js_string(count))
    } else {
        word.to_string()
    }
}

/// English ordinal suffix for an integer magnitude.
fn ordinal_suffix(magnitude: f64) -> &'static str {
    if (11.0..=13.0).contains(&(magnitude % 100.0)) {
        return "th";
    }
    match magnitude % 10.0 {
        m if m == 1.0 => "st",
        m if m == 2.0 => "nd",
        m if m == 3.0 => "rd",
        _ => "th",
    }
}

/// `value` followed by its ordinal suffix: `1st`, `22nd`, `113th`.
pub fn ordinalize(value: &Json) -> String {
    let magnitude = math::round(values::to_number(value)).abs();
    format!("{}{}", values::to_js_string(value), ordinal_suffix(magnitude))
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.value("inflect", |p| {
        let include = p.get(3).is_some_and(|flag| flag != &Json::Bool(false));
        Ok(Json::String(inflect(
            p.required(0)?,
            &p.string(1)?,
            &p.string(2)?,
            include,
        )))
    });
    registrar.value("ordinalize", |p| Ok(Json::String(ordinalize(p.required(0)?))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inflect() {
        assert_eq!(inflect(&json!(0), "enemy", "enemies", false), "enemies");
        assert_eq!(inflect(&json!(1), "friend", "friends", true), "1 friend");
        assert_eq!(inflect(&json!(2), "cat", "cats", false), "cats");
        assert_eq!(inflect(&json!(8021), "delivery", "deliveries", true), "8021 deliveries");
    }

    #[test]
    fn test_inflect_zero_must_be_a_number() {
        // "0" is not strictly zero, so the singular form wins
        assert_eq!(inflect(&json!("0"), "cat", "cats", false), "cat");
    }

    #[test]
    fn test_ordinalize() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (24, "24th"),
            (101, "101st"),
            (111, "111th"),
            (-2, "-2nd"),
        ];
        for (value, expected) in cases {
            assert_eq!(ordinalize(&json!(value)), expected);
        }
    }
}
