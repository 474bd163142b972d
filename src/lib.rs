//! Helper Lib - template helpers for handlebars
//!
//! This crate installs a library of named helpers (string casing, collection
//! slicing, arithmetic, dates, HTML emitters, conditional blocks) into a
//! [`handlebars::Handlebars`] registry, together with the `extend`/`include`
//! pair that composes named inline partials across a render pass.

pub mod config;
pub mod error;
pub mod helpers;
pub mod library;
pub mod markdown;
pub mod partials;
pub mod values;

pub use config::{HelperConfig, MarkdownOptions};
pub use error::{HelperError, LibraryError, Result};
pub use helpers::{BlockOptions, HELPER_NAMES};
pub use library::{register_helpers, HelperLibrary};
pub use markdown::MarkdownConverter;
pub use partials::{PartialRegistry, SharedPartials};
