//! The helper table: every helper the library installs, grouped by family.

pub mod block;
pub mod collections;
pub mod comparison;
pub mod dates;
pub mod files;
pub mod html;
pub mod inflections;
pub mod inline_partials;
pub mod math;
pub mod misc;
pub mod number_format;
pub mod params;
pub mod paths;
pub mod strings;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    ScopedJson,
};
use serde_json::Value as Json;

use crate::config::HelperConfig;
use crate::error::HelperError;
use crate::partials::SharedPartials;
use crate::values;

pub use block::BlockOptions;
pub use params::Params;

/// Names of every helper installed by [`crate::register_helpers`].
pub const HELPER_NAMES: &[&str] = &[
    // strings
    "lowercase",
    "uppercase",
    "capitalizeFirst",
    "capitalizeEach",
    "titleize",
    "sentence",
    "hyphenate",
    "dashify",
    "reverse",
    "truncate",
    "center",
    "formatPhoneNumber",
    "nl2br",
    // collections
    "first",
    "last",
    "after",
    "before",
    "join",
    "sort",
    "length",
    "withFirst",
    "withLast",
    "withAfter",
    "withBefore",
    "withSort",
    "eachIndex",
    "eachProperty",
    "lengthEqual",
    "empty",
    "any",
    "inArray",
    // comparison
    "is",
    "isnt",
    "gt",
    "gte",
    "lt",
    "lte",
    "and",
    "or",
    "if_eq",
    "unless_eq",
    "if_gt",
    "unless_gt",
    "if_lt",
    "unless_lt",
    "if_gteq",
    "unless_gteq",
    "if_lteq",
    "unless_lteq",
    // math
    "add",
    "subtract",
    "multiply",
    "divide",
    "floor",
    "ceil",
    "round",
    "toFixed",
    "toPrecision",
    "toExponential",
    "toInt",
    "toFloat",
    "addCommas",
    // inflections
    "inflect",
    "ordinalize",
    // dates
    "now",
    "formatDate",
    "timeago",
    // html
    "ul",
    "ol",
    "br",
    "link",
    "gist",
    // files and paths
    "authors",
    "embed",
    "md",
    "markdown",
    "basename",
    "relative",
    // misc
    "default",
    "log",
    "debug",
    // inline partials
    "extend",
    "include",
];

/// Upper bound on the repeat counts of `center` and `br`.
pub const MAX_REPEAT: usize = 10_000;

/// Repeat count from a template argument. Counts up to zero (and NaN) are
/// zero, fractions round up.
pub(crate) fn repeat_count(helper: &'static str, requested: f64) -> Result<usize, HelperError> {
    if requested.is_nan() || requested <= 0.0 {
        return Ok(0);
    }
    let count = requested.ceil();
    if count > MAX_REPEAT as f64 {
        return Err(HelperError::OutOfRange {
            helper,
            message: format!(
                "count must be at most {MAX_REPEAT}, got {}",
                crate::values::format_number(requested)
            ),
        });
    }
    Ok(count as usize)
}

pub(crate) type ValueFn = fn(&Params<'_, '_>) -> Result<Json, HelperError>;
pub(crate) type MarkupFn = fn(&Params<'_, '_>) -> Result<String, HelperError>;

/// Helper whose result goes back to the engine as a value: `{{name ...}}`
/// escapes it, `{{{name ...}}}` does not, and sub-expressions can consume it.
///
/// Written directly into the output, a value takes its script string form
/// (`a,b` for arrays), and null renders as nothing.
pub(crate) struct ValueHelper {
    name: &'static str,
    func: ValueFn,
}

impl HelperDef for ValueHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let value = (self.func)(&Params::new(self.name, h))?;
        Ok(ScopedJson::Derived(value))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        _: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let rendered = match (self.func)(&Params::new(self.name, h))? {
            Json::Null => return Ok(()),
            value => values::to_js_string(&value),
        };
        if rc.is_disable_escape() {
            out.write(&rendered)?;
        } else {
            out.write(&r.get_escape_fn()(&rendered))?;
        }
        Ok(())
    }
}

/// Helper that emits markup which is already safe and written unescaped.
pub(crate) struct MarkupHelper {
    name: &'static str,
    func: MarkupFn,
}

impl HelperDef for MarkupHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let markup = (self.func)(&Params::new(self.name, h))?;
        out.write(&markup)?;
        Ok(())
    }
}

/// Records every name it installs so registration can be checked against
/// [`HELPER_NAMES`].
pub(crate) struct Registrar<'r, 'reg> {
    registry: &'r mut Handlebars<'reg>,
    installed: Vec<&'static str>,
}

impl<'r, 'reg> Registrar<'r, 'reg> {
    fn new(registry: &'r mut Handlebars<'reg>) -> Self {
        Self {
            registry,
            installed: Vec::new(),
        }
    }

    pub(crate) fn value(&mut self, name: &'static str, func: ValueFn) {
        self.helper(name, Box::new(ValueHelper { name, func }));
    }

    pub(crate) fn markup(&mut self, name: &'static str, func: MarkupFn) {
        self.helper(name, Box::new(MarkupHelper { name, func }));
    }

    pub(crate) fn helper(&mut self, name: &'static str, def: Box<dyn HelperDef + Send + Sync + 'reg>) {
        self.registry.register_helper(name, def);
        self.installed.push(name);
    }
}

/// Install every helper family. Returns the installed names in order.
pub(crate) fn register_all(
    registry: &mut Handlebars<'_>,
    config: &HelperConfig,
    partials: &SharedPartials,
) -> Vec<&'static str> {
    let mut registrar = Registrar::new(registry);
    strings::register(&mut registrar);
    collections::register(&mut registrar);
    comparison::register(&mut registrar);
    math::register(&mut registrar);
    inflections::register(&mut registrar);
    dates::register(&mut registrar);
    html::register(&mut registrar);
    files::register(&mut registrar, config);
    paths::register(&mut registrar, config);
    misc::register(&mut registrar);
    inline_partials::register(&mut registrar, partials);
    registrar.installed
}
