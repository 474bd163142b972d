//! String casing and formatting helpers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value as Json;

use super::{repeat_count, Params, Registrar};
use crate::error::HelperError;
use crate::values;

static EACH_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("valid pattern"));
static TITLE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \-_]+").expect("valid pattern"));
static TITLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid pattern"));
static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S[^.?!]*[.?!]*").expect("valid pattern"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^>\r\n]?)(\r\n|\n\r|\r|\n)").expect("valid pattern")
});

const NBSP: &str = "&nbsp;";

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character of every whitespace separated word.
pub fn capitalize_each(text: &str) -> String {
    EACH_WORD
        .replace_all(text, |caps: &Captures| capitalize_first(&caps[0]))
        .into_owned()
}

/// Splits on spaces, hyphens and underscores and capitalizes every word.
pub fn titleize(text: &str) -> String {
    let spaced = TITLE_SEPARATORS.replace_all(text, " ");
    TITLE_WORD
        .find_iter(&spaced)
        .map(|word| capitalize_first(word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalizes the first letter of every sentence (delimited by `.`, `?` or
/// `!`) and lowercases the rest of it.
pub fn sentence(text: &str) -> String {
    SENTENCE
        .replace_all(text, |caps: &Captures| {
            let mut chars = caps[0].chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.as_str().to_lowercase().chars())
                    .collect(),
                None => String::new(),
            }
        })
        .into_owned()
}

pub fn hyphenate(text: &str) -> String {
    text.replace(' ', "-")
}

pub fn dashify(text: &str) -> String {
    text.replace('.', "-")
}

pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Cuts `text` so that, with `omission` appended, it is at most `length`
/// characters long. Text that already fits is returned unchanged.
pub fn truncate(text: &str, length: f64, omission: &str) -> String {
    let char_count = text.chars().count();
    if (char_count as f64) <= length || length.is_nan() {
        return text.to_string();
    }
    let keep = values::to_integer(length) - omission.chars().count() as f64;
    let keep = keep.clamp(0.0, char_count as f64) as usize;
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(omission);
    truncated
}

/// Flanks `text` with `spaces` non-breaking spaces on each side.
pub fn center(text: &str, spaces: f64) -> Result<String, HelperError> {
    let padding = NBSP.repeat(repeat_count("center", spaces)?);
    Ok(format!("{padding}{text}{padding}"))
}

/// `(XXX) XXX-XXXX` from the first ten characters. Shorter input is not
/// validated and simply yields shorter groups.
pub fn format_phone_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    let group = |start: usize, len: usize| -> String {
        chars.iter().skip(start).take(len).collect()
    };
    format!("({}) {}-{}", group(0, 3), group(3, 3), group(6, 4))
}

/// Inserts `<br>` before every line break, keeping the break itself.
pub fn nl2br(text: &str) -> String {
    LINE_BREAK.replace_all(text, "$1<br>$2").into_owned()
}

fn string_helper(params: &Params, transform: fn(&str) -> String) -> Result<Json, HelperError> {
    Ok(Json::String(transform(&params.string(0)?)))
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.value("lowercase", |p| string_helper(p, lowercase));
    registrar.value("uppercase", |p| string_helper(p, uppercase));
    registrar.value("capitalizeFirst", |p| string_helper(p, capitalize_first));
    registrar.value("capitalizeEach", |p| string_helper(p, capitalize_each));
    registrar.value("titleize", |p| string_helper(p, titleize));
    registrar.value("sentence", |p| string_helper(p, sentence));
    registrar.value("hyphenate", |p| string_helper(p, hyphenate));
    registrar.value("dashify", |p| string_helper(p, dashify));
    registrar.value("reverse", |p| string_helper(p, reverse));
    registrar.value("formatPhoneNumber", |p| {
        string_helper(p, format_phone_number)
    });
    registrar.value("truncate", |p| {
        let omission = p.opt_string(2).unwrap_or_default();
        Ok(Json::String(truncate(&p.string(0)?, p.number(1)?, &omission)))
    });
    registrar.value("center", |p| {
        let spaces = p.opt_number(1).unwrap_or(0.0);
        Ok(Json::String(center(&p.string(0)?, spaces)?))
    });
    registrar.markup("nl2br", |p| Ok(nl2br(&p.string(0)?)));
}
