//! Helpers that read from the file system: `authors`, `embed`, `md` and the
//! `markdown` block. Reads are synchronous and a missing file fails the
//! render.

use std::path::{Path, PathBuf};

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{BlockOptions, Params, Registrar};
use crate::config::HelperConfig;
use crate::error::HelperError;
use crate::markdown::MarkdownConverter;

static AUTHOR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*?)\s*\((.*)\)").expect("valid pattern"));

/// Reads a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String, HelperError> {
    debug!("Reading helper input file: {}", path.display());
    std::fs::read_to_string(path).map_err(|source| HelperError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Turns every `Name (url)` entry into a Markdown link `[Name](url)`.
pub fn format_authors(authors: &str) -> String {
    AUTHOR_LINE.replace_all(authors, "[${1}](${2})").into_owned()
}

/// Fenced code block around `content`, tagged with `language`.
pub fn fence(content: &str, language: &str) -> String {
    format!("``` {language}\n{content}\n```")
}

/// `{{authors [path]}}`
pub struct AuthorsHelper {
    default_path: PathBuf,
}

impl HelperDef for AuthorsHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params = Params::new("authors", h);
        let path = params
            .opt_string(0)
            .map_or_else(|| self.default_path.clone(), PathBuf::from);
        out.write(&format_authors(&read_text(&path)?))?;
        Ok(())
    }
}

/// `{{md "path/to/file.md"}}`
pub struct MarkdownFileHelper {
    converter: MarkdownConverter,
}

impl HelperDef for MarkdownFileHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let path = Params::new("md", h).string(0)?;
        out.write(&self.converter.read(Path::new(&path))?)?;
        Ok(())
    }
}

/// `{{#markdown}}# Title{{/markdown}}`
pub struct MarkdownBlockHelper {
    converter: MarkdownConverter,
}

impl HelperDef for MarkdownBlockHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let source = BlockOptions::new(h, r, ctx, rc).render_primary()?;
        out.write(&self.converter.convert(&source))?;
        Ok(())
    }
}

pub(crate) fn register(registrar: &mut Registrar, config: &HelperConfig) {
    let converter = MarkdownConverter::new(config.markdown.clone());

    registrar.helper(
        "authors",
        Box::new(AuthorsHelper {
            default_path: config.authors_path.clone(),
        }),
    );
    registrar.markup("embed", |p| {
        let content = read_text(Path::new(&p.string(0)?))?;
        Ok(fence(&content, &p.opt_string(1).unwrap_or_default()))
    });
    registrar.helper(
        "md",
        Box::new(MarkdownFileHelper {
            converter: converter.clone(),
        }),
    );
    registrar.helper("markdown", Box::new(MarkdownBlockHelper { converter }));
}
