use std::path::PathBuf;

use handlebars::{RenderError, RenderErrorReason};
use thiserror::Error;

/// Errors raised by individual helpers while a template renders.
///
/// Every variant aborts the render it occurs in: the engine receives it as a
/// nested [`RenderError`].
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("Helper `{helper}` requires parameter {index}")]
    MissingParam { helper: &'static str, index: usize },

    #[error("Helper `{helper}` expected {expected} for parameter {index}, found {found}")]
    InvalidParam {
        helper: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Helper `{helper}` argument out of range: {message}")]
    OutOfRange {
        helper: &'static str,
        message: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Invalid date: {input}")]
    InvalidDate { input: String },

    #[error("Invalid date format: {format}")]
    InvalidFormat { format: String },
}

impl From<HelperError> for RenderError {
    fn from(error: HelperError) -> Self {
        RenderErrorReason::NestedError(Box::new(error)).into()
    }
}

/// Errors surfaced by [`crate::HelperLibrary`] and configuration loading.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Template compilation failed: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Template rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
