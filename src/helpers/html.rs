//! HTML emitting helpers. Their output is markup and is written unescaped;
//! every interpolated argument is escaped first.

use handlebars::{
    html_escape, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use serde_json::Value as Json;

use super::{repeat_count, BlockOptions, Params, Registrar};
use crate::error::HelperError;
use crate::values;

/// `key="value"` pairs separated by spaces, values escaped.
pub fn serialize_attributes(attributes: &[(&str, &Json)]) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(r#"{key}="{}""#, html_escape(&values::to_js_string(value))))
        .collect::<Vec<_>>()
        .join(" ")
}

fn open_tag(tag: &str, attributes: &str) -> String {
    if attributes.is_empty() {
        format!("<{tag}>")
    } else {
        format!("<{tag} {attributes}>")
    }
}

/// `{{#ul items class="crew"}}{{name}}{{/ul}}`, and `ol` likewise.
pub struct ListHelper {
    name: &'static str,
    tag: &'static str,
}

impl HelperDef for ListHelper {
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
        let attributes = serialize_attributes(&params.hash_entries());

        let mut block = BlockOptions::new(h, r, ctx, rc);
        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            rendered.push(format!("<li>{}</li>", block.render_primary_with(item.clone())?));
        }

        out.write(&open_tag(self.tag, &attributes))?;
        out.write(&rendered.join("\n"))?;
        out.write(&format!("</{}>", self.tag))?;
        Ok(())
    }
}

/// `count` line break tags, at least one.
pub fn line_breaks(count: Option<f64>) -> Result<String, HelperError> {
    let count = repeat_count("br", count.unwrap_or(1.0))?;
    Ok("<br>".repeat(count.max(1)))
}

pub fn link(url: &str, text: &str) -> String {
    let url = html_escape(url);
    let text = html_escape(text);
    format!(r#"<a class="" href="{url}" title="{text}">{text}</a>"#)
}

/// Script tag embedding a public gist, optionally a single file of it.
pub fn gist(id: &str, file: Option<&str>) -> String {
    let query = match file {
        Some(file) if !file.is_empty() => format!("?file={}", html_escape(file)),
        _ => String::new(),
    };
    format!(
        r#"<script src="https://gist.github.com/{}.js{query}"></script>"#,
        html_escape(id)
    )
}

pub(crate) fn register(registrar: &mut Registrar) {
    registrar.helper("ul", Box::new(ListHelper { name: "ul", tag: "ul" }));
    registrar.helper("ol", Box::new(ListHelper { name: "ol", tag: "ol" }));
    registrar.markup("br", |p| line_breaks(p.opt_number(0)));
    registrar.markup("link", |p| {
        Ok(link(&p.string(0)?, &p.opt_string(1).unwrap_or_default()))
    });
    registrar.markup("gist", |p| Ok(gist(&p.string(0)?, p.opt_string(1).as_deref())));
}
