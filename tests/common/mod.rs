//! Shared setup for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use helper_lib::{HelperConfig, HelperLibrary};
use serde_json::Value;
use tempfile::{tempdir, TempDir};

/// Installs a test log writer once so `log`/`debug` output shows up with
/// `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Renders `template` with a fresh library and default configuration.
pub fn render(template: &str, data: &Value) -> String {
    try_render(template, data).expect("template should render")
}

pub fn try_render(template: &str, data: &Value) -> helper_lib::Result<String> {
    HelperLibrary::default().render_template(template, data)
}

/// Scratch directory for the file helpers.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Configuration whose `authors` default points into this environment.
    pub fn config(&self) -> HelperConfig {
        HelperConfig {
            authors_path: self.path("AUTHORS"),
            ..HelperConfig::default()
        }
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Planet Express delivery crew, used across the helper tests.
pub fn crew() -> Value {
    serde_json::json!({
        "crew": [
            { "name": "Leela", "deliveries": 8021 },
            { "name": "Bender", "deliveries": 239 },
            { "name": "Fry", "deliveries": 1 }
        ],
        "names": ["Leela", "Bender", "Fry", "Zoidberg"]
    })
}
