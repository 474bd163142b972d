//! Inline partials (`extend`/`include`) across templates and render passes.

mod common;

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use common::render;
use helper_lib::{HelperConfig, HelperLibrary};
use serde_json::json;

#[test]
fn test_fragments_are_joined_in_definition_order() {
    let template = concat!(
        r#"{{#extend "scripts"}}<script src="a.js"></script>{{/extend}}"#,
        r#"{{#extend "scripts"}}<script src="b.js"></script>{{/extend}}"#,
        r#"{{{include "scripts"}}}"#,
    );
    assert_eq!(
        render(template, &json!({})),
        "<script src=\"a.js\"></script>\n<script src=\"b.js\"></script>"
    );
}

#[test]
fn test_extend_renders_against_current_context() {
    let data = json!({"page": {"title": "Delivery Log"}});
    let template = r#"{{#with page}}{{#extend "title"}}{{title}}{{/extend}}{{/with}}<title>{{include "title"}}</title>"#;
    assert_eq!(render(template, &data), "<title>Delivery Log</title>");
}

#[test]
fn test_include_drains_the_queue() {
    let template = r#"{{#extend "x"}}a{{/extend}}[{{include "x"}}][{{include "x"}}]"#;
    assert_eq!(render(template, &json!({})), "[a][]");
}

#[test]
fn test_include_is_escaped_unless_triple_stashed() {
    let template = r#"{{#extend "x"}}<b>{{/extend}}{{include "x"}}"#;
    assert_eq!(render(template, &json!({})), "&lt;b&gt;");
}

#[test]
fn test_layout_pulls_in_page_fragments() -> Result<()> {
    let mut library = HelperLibrary::default();
    library.register_template_string(
        "layout",
        "<head>{{{include \"head\"}}}</head><body>{{{include \"body\"}}}</body>",
    )?;
    library.register_template_string(
        "page",
        concat!(
            r#"{{#extend "head"}}<meta name="author" content="{{author}}">{{/extend}}"#,
            r#"{{#extend "body"}}<p>{{message}}</p>{{/extend}}"#,
            "{{> layout}}",
        ),
    )?;

    let rendered = library.render(
        "page",
        &json!({"author": "Hermes", "message": "Sweet lion of Zion!"}),
    )?;
    assert_eq!(
        rendered,
        r#"<head><meta name="author" content="Hermes"></head><body><p>Sweet lion of Zion!</p></body>"#
    );
    assert!(library.partials().is_empty());
    Ok(())
}

#[test]
fn test_include_before_extend_sees_fragment_on_next_pass() -> Result<()> {
    let library = HelperLibrary::default();
    let template = r#"[{{include "late"}}]{{#extend "late"}}fragment{{/extend}}"#;

    assert_eq!(library.render_template(template, &json!({}))?, "[]");
    assert_eq!(library.partials().pending("late"), 1);

    // the accumulator outlives a render pass unless isolated
    assert_eq!(library.render_template(template, &json!({}))?, "[fragment]");
    Ok(())
}

#[test]
fn test_isolated_partials_start_empty_each_pass() -> Result<()> {
    let library = HelperLibrary::new(HelperConfig {
        isolate_partials: true,
        ..HelperConfig::default()
    });
    let template = r#"[{{include "late"}}]{{#extend "late"}}fragment{{/extend}}"#;

    assert_eq!(library.render_template(template, &json!({}))?, "[]");
    assert_eq!(library.render_template(template, &json!({}))?, "[]");
    Ok(())
}

#[test]
fn test_partials_are_scoped_to_their_library() -> Result<()> {
    let first = HelperLibrary::default();
    let second = HelperLibrary::default();

    first.render_template(r#"{{#extend "x"}}mine{{/extend}}"#, &json!({}))?;
    assert_eq!(second.render_template(r#"{{include "x"}}"#, &json!({}))?, "");
    assert_eq!(first.render_template(r#"{{include "x"}}"#, &json!({}))?, "mine");
    Ok(())
}

#[test]
fn test_concurrent_renders_do_not_interleave() {
    let library = Arc::new(HelperLibrary::default());
    let template = r#"{{#extend "id"}}{{id}}{{/extend}}{{#extend "id"}}{{id}}{{/extend}}{{include "id"}}"#;

    thread::scope(|scope| {
        for id in 0..8 {
            let library = Arc::clone(&library);
            scope.spawn(move || {
                for _ in 0..50 {
                    let rendered = library
                        .render_template(template, &json!({ "id": id }))
                        .unwrap();
                    assert_eq!(rendered, format!("{id}\n{id}"));
                }
            });
        }
    });

    assert!(library.partials().is_empty());
}
