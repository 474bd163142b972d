use std::collections::BTreeMap;

use handlebars::{
    BlockContext, Context, Handlebars, Helper, PathAndJson, RenderContext, RenderError,
    RenderErrorReason, Renderable, StringOutput, Template,
};
use serde_json::Value as Json;

/// Everything a block helper needs to render its branches: the primary
/// template, the optional `{{else}}` template and the named arguments.
///
/// A branch that the template did not supply renders as the empty string.
pub struct BlockOptions<'reg: 'rc, 'rc, 'a> {
    registry: &'reg Handlebars<'reg>,
    context: &'rc Context,
    render_context: &'a mut RenderContext<'reg, 'rc>,
    primary: Option<&'rc Template>,
    inverse: Option<&'rc Template>,
    hash: &'a BTreeMap<&'rc str, PathAndJson<'rc>>,
}

impl<'reg: 'rc, 'rc, 'a> BlockOptions<'reg, 'rc, 'a> {
    pub fn new(
        helper: &'a Helper<'rc>,
        registry: &'reg Handlebars<'reg>,
        context: &'rc Context,
        render_context: &'a mut RenderContext<'reg, 'rc>,
    ) -> Self {
        Self {
            registry,
            context,
            render_context,
            primary: helper.template(),
            inverse: helper.inverse(),
            hash: helper.hash(),
        }
    }

    pub fn hash_value(&self, key: &str) -> Option<&'a Json> {
        self.hash
            .get(key)
            .filter(|param| !param.is_value_missing())
            .map(|param| param.value())
    }

    /// Primary branch against the current context.
    pub fn render_primary(&mut self) -> Result<String, RenderError> {
        self.render(self.primary, None, &[])
    }

    /// Primary branch with `value` as the block context.
    pub fn render_primary_with(&mut self, value: Json) -> Result<String, RenderError> {
        self.render(self.primary, Some(value), &[])
    }

    /// Primary branch with `value` as the block context and `@name` locals set.
    pub fn render_primary_with_locals(
        &mut self,
        value: Json,
        locals: &[(&str, Json)],
    ) -> Result<String, RenderError> {
        self.render(self.primary, Some(value), locals)
    }

    pub fn render_inverse(&mut self) -> Result<String, RenderError> {
        self.render(self.inverse, None, &[])
    }

    pub fn branch(&mut self, condition: bool) -> Result<String, RenderError> {
        if condition {
            self.render_primary()
        } else {
            self.render_inverse()
        }
    }

    /// Primary branch once per item, concatenated in order.
    pub fn render_each<'v>(
        &mut self,
        items: impl IntoIterator<Item = &'v Json>,
    ) -> Result<String, RenderError> {
        let mut rendered = String::new();
        for item in items {
            rendered.push_str(&self.render_primary_with(item.clone())?);
        }
        Ok(rendered)
    }

    fn render(
        &mut self,
        template: Option<&'rc Template>,
        base: Option<Json>,
        locals: &[(&str, Json)],
    ) -> Result<String, RenderError> {
        let Some(template) = template else {
            return Ok(String::new());
        };

        let mut buffer = StringOutput::new();
        match base {
            Some(value) => {
                let mut block = BlockContext::new();
                block.set_base_value(value);
                for (name, local) in locals {
                    block.set_local_var(name, local.clone());
                }
                self.render_context.push_block(block);
                let rendered =
                    template.render(self.registry, self.context, self.render_context, &mut buffer);
                self.render_context.pop_block();
                rendered?;
            }
            None => {
                template.render(self.registry, self.context, self.render_context, &mut buffer)?
            }
        }

        buffer
            .into_string()
            .map_err(|e| RenderError::from(RenderErrorReason::Other(e.to_string())))
    }
}
