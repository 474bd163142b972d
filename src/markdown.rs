//! Markdown to HTML conversion for the `md` and `markdown` helpers.

use std::path::Path;

use comrak::{markdown_to_html, Options};
use tracing::debug;

use crate::config::MarkdownOptions;
use crate::error::HelperError;
use crate::helpers::files::read_text;

#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: MarkdownOptions,
}

impl MarkdownConverter {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Converts Markdown source to HTML. Raw HTML in the source is not
    /// passed through.
    pub fn convert(&self, text: &str) -> String {
        let mut options = Options::default();
        if self.options.gfm {
            options.extension.table = true;
            options.extension.strikethrough = true;
            options.extension.autolink = true;
            options.extension.tasklist = true;
        }
        options.render.hardbreaks = self.options.hardbreaks;
        markdown_to_html(text, &options)
    }

    /// Reads a Markdown file and converts it.
    pub fn read(&self, path: &Path) -> Result<String, HelperError> {
        debug!("Converting markdown file: {}", path.display());
        let source = read_text(path)?;
        Ok(self.convert(&source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_convert_heading() {
        let converter = MarkdownConverter::default();
        assert_eq!(converter.convert("# This is a title."), "<h1>This is a title.</h1>\n");
    }

    #[test]
    fn test_gfm_extensions_follow_options() {
        let gfm = MarkdownConverter::default();
        assert!(gfm.convert("~~gone~~").contains("<del>gone</del>"));

        let plain = MarkdownConverter::new(MarkdownOptions {
            gfm: false,
            hardbreaks: false,
        });
        assert!(!plain.convert("~~gone~~").contains("<del>"));
    }

    #[test]
    fn test_hardbreaks() {
        let converter = MarkdownConverter::new(MarkdownOptions {
            gfm: true,
            hardbreaks: true,
        });
        assert!(converter.convert("one\ntwo").contains("<br />"));
    }

    #[test]
    fn test_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "*shiny*").unwrap();

        let html = MarkdownConverter::default().read(file.path()).unwrap();
        assert_eq!(html, "<p><em>shiny</em></p>\n");
    }

    #[test]
    fn test_read_missing_file() {
        let result = MarkdownConverter::default().read(Path::new("/no/such/file.md"));
        assert!(matches!(result, Err(HelperError::FileRead { .. })));
    }
}
