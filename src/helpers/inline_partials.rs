//! `extend` and `include`: named fragments declared anywhere in a template
//! and emitted at a fixed point.
//!
//! ```handlebars
//! {{{include "scripts"}}}
//!
//! {{#extend "scripts"}}
//! <script src="page.js"></script>
//! {{/extend}}
//! ```
//!
//! `include` drains what has been queued under its name so far, so a layout
//! that includes before the page extends sees the fragments on the next
//! render pass.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    ScopedJson,
};
use serde_json::Value as Json;

use super::{BlockOptions, Params, Registrar};
use crate::partials::SharedPartials;

/// `{{#extend "name"}}..{{/extend}}` renders its block against the current
/// context and queues the result. Writes nothing.
pub struct ExtendHelper {
    partials: SharedPartials,
}

impl HelperDef for ExtendHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        _out: &mut dyn Output,
    ) -> HelperResult {
        let name = Params::new("extend", h).string(0)?;
        let fragment = BlockOptions::new(h, r, ctx, rc).render_primary()?;
        self.partials.define(&name, fragment);
        Ok(())
    }
}

/// `{{include "name"}}` returns every queued fragment, newline separated.
pub struct IncludeHelper {
    partials: SharedPartials,
}

impl HelperDef for IncludeHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let name = Params::new("include", h).string(0)?;
        Ok(ScopedJson::Derived(Json::String(self.partials.consume(&name))))
    }
}

pub(crate) fn register(registrar: &mut Registrar, partials: &SharedPartials) {
    registrar.helper(
        "extend",
        Box::new(ExtendHelper {
            partials: partials.clone(),
        }),
    );
    registrar.helper(
        "include",
        Box::new(IncludeHelper {
            partials: partials.clone(),
        }),
    );
}
