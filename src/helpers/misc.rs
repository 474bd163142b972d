use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value as Json;
use tracing::{debug, info};

use super::Registrar;
use crate::values;

/// Target of the messages written by `{{log}}` and `{{debug}}`.
pub const LOG_TARGET: &str = "helper_lib::template";

/// `value` unless it is missing or null.
pub fn default_value(value: Option<&Json>, fallback: Option<&Json>) -> Json {
    match value {
        Some(value) if !value.is_null() => value.clone(),
        _ => fallback.cloned().unwrap_or(Json::Null),
    }
}

fn render_params(h: &Helper) -> String {
    h.params()
        .iter()
        .map(|param| values::to_js_string(param.value()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{{log value ...}}` writes its arguments to the log and renders nothing.
fn log_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    _out: &mut dyn Output,
) -> HelperResult {
    info!(target: LOG_TARGET, "{}", render_params(h));
    Ok(())
}

/// `{{debug [value]}}` logs the current context and, if given, the value.
fn debug_helper(
    h: &Helper,
    _: &Handlebars,
    ctx: &Context,
    rc: &mut RenderContext,
    _out: &mut dyn Output,
) -> HelperResult {
    let context = rc
        .block()
        .and_then(|block| block.base_value())
        .unwrap_or_else(|| ctx.data());
    debug!(target: LOG_TARGET, "Context: {}", context);
    if let Some(value) = h.param(0).filter(|param| !param.is_value_missing()) {
        debug!(target: LOG_TARGET, "Value: {}", value.value());
    }
    Ok(())
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.value("default", |p| Ok(default_value(p.get(0), p.get(1))));
    registrar.helper("log", Box::new(log_helper));
    registrar.helper("debug", Box::new(debug_helper));
}
