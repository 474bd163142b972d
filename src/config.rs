use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Settings shared by every helper registered through [`crate::register_helpers`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HelperConfig {
    /// File read by `{{authors}}` when no path is given.
    pub authors_path: PathBuf,
    /// Base output directory returned by `{{relative}}` when both paths match.
    pub dest: String,
    /// Clear the inline partial accumulator at the start of every render.
    pub isolate_partials: bool,
    /// Fail renders on unresolved template variables.
    pub strict_mode: bool,
    pub markdown: MarkdownOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarkdownOptions {
    /// GitHub flavoured extensions: tables, strikethrough, autolinks, task lists.
    pub gfm: bool,
    /// Render soft line breaks as `<br />`.
    pub hardbreaks: bool,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            authors_path: PathBuf::from("./AUTHORS"),
            dest: "./".to_string(),
            isolate_partials: false,
            strict_mode: false,
            markdown: MarkdownOptions::default(),
        }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            hardbreaks: false,
        }
    }
}

impl HelperConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a YAML configuration file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| LibraryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }
}
