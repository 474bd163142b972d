//! Path helpers. Paths are handled lexically: nothing is required to exist.

use std::path::{Component, Path, PathBuf};

use handlebars::{Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, ScopedJson};
use serde_json::Value as Json;

use super::{Params, Registrar};
use crate::config::HelperConfig;
use crate::error::HelperError;

/// Last segment of a `/` separated path, trailing separators ignored.
/// `ext` is removed from the end unless it is the whole segment.
fn last_segment<'p>(path: &'p str, ext: &str) -> &'p str {
    let trimmed = path.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    match segment.strip_suffix(ext) {
        Some(stem) if !ext.is_empty() && !stem.is_empty() => stem,
        _ => segment,
    }
}

/// Extension of the last segment including the dot; empty for dotfiles and
/// names without one.
pub fn extname(path: &str) -> &str {
    let segment = last_segment(path, "");
    if segment == ".." {
        return "";
    }
    match segment.rfind('.') {
        Some(index) if index > 0 => &segment[index..],
        _ => "",
    }
}

/// File name without directories and without extension. An explicit `ext`
/// is stripped first, then whatever extension remains.
pub fn basename(path: &str, ext: Option<&str>) -> String {
    let full_name = last_segment(path, ext.unwrap_or(""));
    last_segment(full_name, extname(full_name)).to_string()
}

/// Removes `.` components and resolves `..` against the preceding one.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::RootDir);
                }
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    normalized
}

fn absolute(path: &str) -> Result<PathBuf, HelperError> {
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(HelperError::WorkingDirectory)?;
    Ok(normalize(&cwd.join(path)))
}

/// Relative path from `from` to `to`, both absolute, joined with `/`.
/// Identical paths give the empty string.
pub fn relative_between(from: &Path, to: &Path) -> String {
    let from: Vec<_> = from.components().collect();
    let to: Vec<_> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat("..".to_string()).take(from.len() - common);
    let downs = to[common..]
        .iter()
        .map(|component| component.as_os_str().to_string_lossy().into_owned());
    ups.chain(downs).collect::<Vec<_>>().join("/")
}

/// `relative from to`: falls back to `dest` when the paths coincide.
pub fn relative(from: &str, to: &str, dest: &str) -> Result<String, HelperError> {
    let relative = relative_between(&absolute(from)?, &absolute(to)?);
    if relative.is_empty() {
        Ok(dest.to_string())
    } else {
        Ok(relative)
    }
}

pub struct RelativeHelper {
    dest: String,
}

impl HelperDef for RelativeHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let params = Params::new("relative", h);
        let path = relative(&params.string(0)?, &params.string(1)?, &self.dest)?;
        Ok(ScopedJson::Derived(Json::String(path)))
    }
}

pub(crate) fn register(registrar: &mut Registrar, config: &HelperConfig) {
    registrar.value("basename", |p| {
        let ext = p.opt_string(1);
        Ok(Json::String(basename(&p.string(0)?, ext.as_deref())))
    });
    registrar.helper(
        "relative",
        Box::new(RelativeHelper {
            dest: config.dest.clone(),
        }),
    );
}
