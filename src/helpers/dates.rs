//! Date helpers. Every date is interpreted and formatted in UTC.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value as Json;

use super::{Params, Registrar};
use crate::error::HelperError;
use crate::values;

/// Layout of `{{now}}` without a format argument.
pub const DEFAULT_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// (seconds per unit, unit name), largest first.
const TIME_AGO_UNITS: &[(i64, &str)] = &[
    (31_536_000, "years"),
    (2_592_000, "months"),
    (86_400, "days"),
    (3_600, "hours"),
    (60, "minutes"),
];

/// Reads a date from epoch milliseconds, RFC 3339, RFC 2822, `YYYY-MM-DD`
/// or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_date(value: &Json) -> Result<DateTime<Utc>, HelperError> {
    let invalid = || HelperError::InvalidDate {
        input: values::to_js_string(value),
    };

    match value {
        Json::Number(_) => {
            let millis = values::to_number(value);
            if !millis.is_finite() {
                return Err(invalid());
            }
            DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64).ok_or_else(invalid)
        }
        Json::String(text) => parse_date_str(text.trim()).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_date_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Some(date.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Formats `date` with strftime specifiers.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> Result<String, HelperError> {
    let mut formatted = String::new();
    write!(formatted, "{}", date.format(format)).map_err(|_| HelperError::InvalidFormat {
        format: format.to_string(),
    })?;
    Ok(formatted)
}

/// Long form used when no format is given: `Tue Oct 15 2026 10:00:00 GMT+0000`.
pub fn default_date_string(date: &DateTime<Utc>) -> String {
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Human readable phrase for an elapsed number of seconds. A unit is used
/// once more than one of it has passed.
pub fn time_ago(seconds: i64) -> String {
    for (unit_seconds, unit) in TIME_AGO_UNITS {
        let interval = seconds.div_euclid(*unit_seconds);
        if interval > 1 {
            return format!("{interval} {unit} ago");
        }
    }
    if seconds == 0 {
        "Just now".to_string()
    } else {
        format!("{seconds} seconds ago")
    }
}

pub fn time_ago_since(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed_millis = now.timestamp_millis() - then.timestamp_millis();
    time_ago(elapsed_millis.div_euclid(1000))
}

fn now_helper(params: &Params) -> Result<Json, HelperError> {
    let now = Utc::now();
    let formatted = match params.opt_string(0) {
        Some(format) => format_date(&now, &format)?,
        None => default_date_string(&now),
    };
    Ok(Json::String(formatted))
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.value("now", now_helper);
    registrar.value("formatDate", |p| {
        let date = parse_date(p.required(0)?)?;
        Ok(Json::String(format_date(&date, &p.string(1)?)?))
    });
    registrar.value("timeago", |p| {
        let then = parse_date(p.required(0)?)?;
        Ok(Json::String(time_ago_since(&then, &Utc::now())))
    });
}
