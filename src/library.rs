//! Registration entry point and the render session that owns the partial
//! registry.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::config::HelperConfig;
use crate::error::Result;
use crate::helpers;
use crate::partials::SharedPartials;

/// Installs every helper into `registry` under its fixed name.
///
/// Returns the partial registry handle shared by the `extend` and `include`
/// helpers just installed. Callers that render concurrently with one
/// registry must serialize whole render passes themselves;
/// [`HelperLibrary`] does this for you.
pub fn register_helpers(registry: &mut Handlebars<'_>, config: &HelperConfig) -> SharedPartials {
    let partials = SharedPartials::new();
    let installed = helpers::register_all(registry, config, &partials);
    debug!("Registered {} template helpers", installed.len());
    partials
}

/// A handlebars registry with every helper installed, plus the partial
/// registry its `extend`/`include` helpers write to.
///
/// Renders on one library never interleave: each pass holds the render lock
/// from start to finish.
pub struct HelperLibrary {
    handlebars: Handlebars<'static>,
    config: HelperConfig,
    partials: SharedPartials,
    render_lock: Mutex<()>,
}

impl HelperLibrary {
    pub fn new(config: HelperConfig) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(config.strict_mode);
        let partials = register_helpers(&mut handlebars, &config);

        Self {
            handlebars,
            config,
            partials,
            render_lock: Mutex::new(()),
        }
    }

    /// Builds a library from a YAML configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::new(HelperConfig::load(path)?))
    }

    pub fn register_template_string(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, source)
            .map_err(Box::new)?;
        Ok(())
    }

    /// Renders a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.render_pass(|handlebars| handlebars.render(name, data))
    }

    /// Compiles and renders `source` without registering it.
    pub fn render_template<T: Serialize>(&self, source: &str, data: &T) -> Result<String> {
        self.render_pass(|handlebars| handlebars.render_template(source, data))
    }

    pub fn partials(&self) -> &SharedPartials {
        &self.partials
    }

    /// Drops every fragment queued by `extend` and not yet included.
    pub fn reset_partials(&self) {
        debug!("Resetting inline partials");
        self.partials.clear();
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    pub fn handlebars(&self) -> &Handlebars<'static> {
        &self.handlebars
    }

    fn render_pass<F>(&self, render: F) -> Result<String>
    where
        F: FnOnce(&Handlebars<'static>) -> std::result::Result<String, handlebars::RenderError>,
    {
        let _guard = self
            .render_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.config.isolate_partials {
            self.reset_partials();
        }
        Ok(render(&self.handlebars)?)
    }
}

impl Default for HelperLibrary {
    fn default() -> Self {
        Self::new(HelperConfig::default())
    }
}
