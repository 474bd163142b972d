//! Collection helpers: slicing, joining, sorting, iteration and the
//! collection predicates.
//!
//! Counts follow `Array.prototype.slice`: negative counts index from the end
//! and out of range counts clamp, so `first(s, k) ++ after(s, k)` and
//! `before(s, k) ++ last(s, k)` both rebuild `s`.

use std::cmp::Ordering;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    ScopedJson,
};
use serde_json::{json, Value as Json};

use super::{BlockOptions, Params, Registrar};
use crate::error::HelperError;
use crate::values;

/// Resolves a slice index the way `slice` does: negative values count from
/// the end, NaN is zero, and the result is clamped to `0..=len`.
fn resolve_index(index: f64, len: usize) -> usize {
    let index = values::to_integer(index);
    let len_f = len as f64;
    let resolved = if index < 0.0 {
        (len_f + index).max(0.0)
    } else {
        index.min(len_f)
    };
    resolved as usize
}

pub fn slice(items: &[Json], start: f64, end: Option<f64>) -> &[Json] {
    let from = resolve_index(start, items.len());
    let to = end.map_or(items.len(), |end| resolve_index(end, items.len()));
    if from >= to {
        &[]
    } else {
        &items[from..to]
    }
}

pub fn first(items: &[Json], count: f64) -> &[Json] {
    slice(items, 0.0, Some(count))
}

pub fn last(items: &[Json], count: f64) -> &[Json] {
    slice(items, -count, None)
}

pub fn after(items: &[Json], count: f64) -> &[Json] {
    slice(items, count, None)
}

pub fn before(items: &[Json], count: f64) -> &[Json] {
    slice(items, 0.0, Some(-count))
}

pub fn join(items: &[Json], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Json::Null => String::new(),
            other => values::to_js_string(other),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Sorted copy of `items`. Without a field, items order by their string
/// form. With a field, items order by that field: lexicographically when
/// every field value is a string, numerically otherwise (NaN last). The
/// field sort is unstable.
pub fn sort(items: &[Json], field: Option<&str>) -> Vec<Json> {
    let mut sorted = items.to_vec();
    match field {
        None => sorted.sort_by_cached_key(values::to_js_string),
        Some(field) => {
            let key = |item: &Json| item.get(field).cloned().unwrap_or(Json::Null);
            if sorted.iter().all(|item| key(item).is_string()) {
                sorted.sort_unstable_by_key(|item| values::to_js_string(&key(item)));
            } else {
                sorted.sort_unstable_by(|a, b| {
                    numeric_order(values::to_number(&key(a)), values::to_number(&key(b)))
                });
            }
        }
    }
    sorted
}

fn numeric_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Length of an array, or the character count of a string.
pub fn length_of(value: &Json) -> Option<usize> {
    match value {
        Json::Array(items) => Some(items.len()),
        Json::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

/// Membership with strict equality; for strings, substring search.
pub fn contains(haystack: &Json, needle: Option<&Json>) -> bool {
    match (haystack, needle) {
        (Json::Array(items), Some(needle)) => {
            items.iter().any(|item| values::strict_equals(item, needle))
        }
        (Json::String(s), needle) => {
            let needle = needle.map_or_else(|| "undefined".to_string(), values::to_js_string);
            s.contains(&needle)
        }
        _ => false,
    }
}

fn length_param(params: &Params, index: usize) -> Result<usize, HelperError> {
    let value = params.required(index)?;
    length_of(value).ok_or_else(|| params.invalid(index, "an array or string", value))
}

/// `withFirst`, `withLast`, `withAfter` and `withBefore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    First,
    Last,
    After,
    Before,
}

impl Selection {
    /// Items selected from `items`. Without a count `First`/`Last` pick the
    /// single element, `After` keeps everything and `Before` nothing.
    pub fn select<'v>(&self, items: &'v [Json], count: Option<f64>) -> &'v [Json] {
        match (self, count) {
            (Selection::First, None) => first(items, 1.0),
            (Selection::First, Some(count)) => first(items, count),
            (Selection::Last, None) => last(items, 1.0),
            (Selection::Last, Some(count)) => last(items, count),
            (Selection::After, count) => after(items, count.unwrap_or(0.0)),
            (Selection::Before, count) => before(items, count.unwrap_or(f64::NAN)),
        }
    }
}

pub struct SelectionHelper {
    name: &'static str,
    selection: Selection,
}

impl HelperDef for SelectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params = Params::new(self.name, h);
        let items = params.array(0)?;
        let selected = self.selection.select(items, params.opt_number(1));

        let mut block = BlockOptions::new(h, r, ctx, rc);
        out.write(&block.render_each(selected)?)?;
        Ok(())
    }
}

/// `{{#withSort items ["field"]}}`
pub struct WithSortHelper;

impl HelperDef for WithSortHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params = Params::new("withSort", h);
        let sorted = sort(params.array(0)?, params.opt_string(1).as_deref());

        let mut block = BlockOptions::new(h, r, ctx, rc);
        out.write(&block.render_each(&sorted)?)?;
        Ok(())
    }
}

/// `{{#eachIndex items}}`: like `each`, but object items also receive an
/// `index` field alongside `@index`.
pub struct EachIndexHelper;

impl HelperDef for EachIndexHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params = Params::new("eachIndex", h);
        let mut block = BlockOptions::new(h, r, ctx, rc);

        let items = match params.get(0) {
            Some(Json::Array(items)) if !items.is_empty() => items,
            _ => {
                out.write(&block.render_inverse()?)?;
                return Ok(());
            }
        };

        for (index, item) in items.iter().enumerate() {
            let mut item = item.clone();
            if let Json::Object(fields) = &mut item {
                fields.insert("index".to_string(), Json::from(index));
            }
            let rendered = block.render_primary_with_locals(item, &[("index", Json::from(index))])?;
            out.write(&rendered)?;
        }
        Ok(())
    }
}

/// `{{#eachProperty object}}{{property}}: {{value}}{{/eachProperty}}`
pub struct EachPropertyHelper;

impl HelperDef for EachPropertyHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params = Params::new("eachProperty", h);
        let entries: Vec<Json> = match params.get(0) {
            Some(Json::Object(fields)) => fields
                .iter()
                .map(|(property, value)| json!({ "property": property, "value": value }))
                .collect(),
            Some(Json::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, value)| json!({ "property": index.to_string(), "value": value }))
                .collect(),
            _ => Vec::new(),
        };

        let mut block = BlockOptions::new(h, r, ctx, rc);
        out.write(&block.render_each(&entries)?)?;
        Ok(())
    }
}

/// Block predicates over a collection: `lengthEqual`, `empty`, `any`,
/// `inArray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionTest {
    LengthEqual,
    Empty,
    Any,
    InArray,
}

pub struct CollectionTestHelper {
    name: &'static str,
    test: CollectionTest,
}

impl CollectionTestHelper {
    fn evaluate(&self, params: &Params) -> Result<bool, HelperError> {
        Ok(match self.test {
            CollectionTest::LengthEqual => {
                let length = length_param(params, 0)?;
                params
                    .get(1)
                    .is_some_and(|expected| values::strict_equals(&Json::from(length), expected))
            }
            CollectionTest::Empty => length_param(params, 0)? == 0,
            CollectionTest::Any => length_param(params, 0)? > 0,
            CollectionTest::InArray => contains(params.required(0)?, params.get(1)),
        })
    }
}

impl HelperDef for CollectionTestHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let outcome = self.evaluate(&Params::new(self.name, h))?;
        Ok(ScopedJson::Derived(Json::Bool(outcome)))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let outcome = self.evaluate(&Params::new(self.name, h))?;
        if !h.is_block() {
            out.write(&outcome.to_string())?;
            return Ok(());
        }
        let mut block = BlockOptions::new(h, r, ctx, rc);
        out.write(&block.branch(outcome)?)?;
        Ok(())
    }
}

fn count_or_element(
    params: &Params,
    pick: fn(&[Json]) -> Option<&Json>,
    take: fn(&[Json], f64) -> &[Json],
) -> Result<Json, HelperError> {
    let items = params.array(0)?;
    Ok(match params.opt_number(1) {
        None => pick(items).cloned().unwrap_or(Json::Null),
        Some(count) => Json::Array(take(items, count).to_vec()),
    })
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.value("first", |p| count_or_element(p, <[Json]>::first, first));
    registrar.value("last", |p| count_or_element(p, <[Json]>::last, last));
    registrar.value("after", |p| {
        let count = p.opt_number(1).unwrap_or(0.0);
        Ok(Json::Array(after(p.array(0)?, count).to_vec()))
    });
    registrar.value("before", |p| {
        let count = p.opt_number(1).unwrap_or(f64::NAN);
        Ok(Json::Array(before(p.array(0)?, count).to_vec()))
    });
    registrar.value("join", |p| {
        let separator = p.opt_string(1).unwrap_or_else(|| " ".to_string());
        Ok(Json::String(join(p.array(0)?, &separator)))
    });
    registrar.value("sort", |p| {
        Ok(Json::Array(sort(p.array(0)?, p.opt_string(1).as_deref())))
    });
    registrar.value("length", |p| Ok(Json::from(length_param(p, 0)?)));

    for (name, selection) in [
        ("withFirst", Selection::First),
        ("withLast", Selection::Last),
        ("withAfter", Selection::After),
        ("withBefore", Selection::Before),
    ] {
        registrar.helper(name, Box::new(SelectionHelper { name, selection }));
    }
    registrar.helper("withSort", Box::new(WithSortHelper));
    registrar.helper("eachIndex", Box::new(EachIndexHelper));
    registrar.helper("eachProperty", Box::new(EachPropertyHelper));

    for (name, test) in [
        ("lengthEqual", CollectionTest::LengthEqual),
        ("empty", CollectionTest::Empty),
        ("any", CollectionTest::Any),
        ("inArray", CollectionTest::InArray),
    ] {
        registrar.helper(name, Box::new(CollectionTestHelper { name, test }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crew() -> Vec<Json> {
        vec![json!("Leela"), json!("Bender"), json!("Fry"), json!("Zoidberg")]
    }

    #[test]
    fn test_first_and_after_split() {
        let items = crew();
        assert_eq!(first(&items, 2.0), &items[..2]);
        assert_eq!(after(&items, 2.0), &items[2..]);
        assert_eq!(first(&items, 10.0), &items[..]);
        assert!(after(&items, 10.0).is_empty());
    }

    #[test]
    fn test_last_and_before_split() {
        let items = crew();
        assert_eq!(last(&items, 1.0), &items[3..]);
        assert_eq!(before(&items, 1.0), &items[..3]);
        // zero keeps the whole sequence on the `last` side
        assert_eq!(last(&items, 0.0), &items[..]);
        assert!(before(&items, 0.0).is_empty());
    }

    #[test]
    fn test_negative_counts_index_from_the_end() {
        let items = crew();
        assert_eq!(first(&items, -1.0), &items[..3]);
        assert_eq!(after(&items, -1.0), &items[3..]);
    }

    #[test]
    fn test_selection_without_count() {
        let items = crew();
        assert_eq!(Selection::First.select(&items, None), &items[..1]);
        assert_eq!(Selection::Last.select(&items, None), &items[3..]);
        assert_eq!(Selection::After.select(&items, None), &items[..]);
        assert!(Selection::Before.select(&items, None).is_empty());
        assert!(Selection::First.select(&[], None).is_empty());
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&crew(), ", "), "Leela, Bender, Fry, Zoidberg");
        assert_eq!(join(&[json!(1), json!(null), json!(true)], "-"), "1--true");
    }

    #[test]
    fn test_sort_without_field_uses_string_order() {
        let sorted = sort(&[json!(10), json!(9), json!(1)], None);
        assert_eq!(sorted, vec![json!(1), json!(10), json!(9)]);

        let sorted = sort(&crew(), None);
        assert_eq!(sorted[0], json!("Bender"));
        assert_eq!(sorted[3], json!("Zoidberg"));
    }

    #[test]
    fn test_sort_by_field() {
        let items = vec![
            json!({"name": "Leela", "deliveries": 8021}),
            json!({"name": "Bender", "deliveries": 239}),
            json!({"name": "Fry", "deliveries": 1}),
        ];

        let by_count = sort(&items, Some("deliveries"));
        let names: Vec<_> = by_count.iter().map(|i| i["name"].clone()).collect();
        assert_eq!(names, vec![json!("Fry"), json!("Bender"), json!("Leela")]);

        let by_name = sort(&items, Some("name"));
        assert_eq!(by_name[0]["name"], json!("Bender"));
        // input is left untouched
        assert_eq!(items[0]["name"], json!("Leela"));
    }

    #[test]
    fn test_length_and_contains() {
        assert_eq!(length_of(&json!([1, 2, 3])), Some(3));
        assert_eq!(length_of(&json!("four")), Some(4));
        assert_eq!(length_of(&json!({"a": 1})), None);

        assert!(contains(&json!([1, 2, 3]), Some(&json!(2.0))));
        assert!(!contains(&json!([1, 2, 3]), Some(&json!("2"))));
        assert!(contains(&json!("planet express"), Some(&json!("express"))));
        assert!(!contains(&json!([1]), None));
    }
}
