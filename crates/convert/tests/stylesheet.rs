//! End-to-end conversion of whole stylesheets

use std::sync::Arc;
use std::thread;

use pxvw_convert::{
    convert_stylesheet, convert_value, BlacklistEntry, Config, ConvertOptions, Processor,
};
use pxvw_css::{Node, Stylesheet};

fn config(options: ConvertOptions) -> Config {
    Config::from_options(options).unwrap()
}

fn all_props() -> ConvertOptions {
    ConvertOptions {
        prop_list: Some(vec!["*".to_string()]),
        ..Default::default()
    }
}

#[test]
fn converts_rule_and_keeps_fallback() {
    let css = ".rule { font-size: 15px }";
    let output = convert_stylesheet(css, &config(all_props())).unwrap();

    assert_eq!(output, ".rule {\n  font-size: 15px;\n  font-size: 4.6875vw;\n}\n");
}

#[test]
fn leaves_strings_and_urls_alone() {
    let css = r#".a { content: "16px"; background: url(bg-16px.png) 0 16px no-repeat; }"#;
    let output = convert_stylesheet(css, &config(all_props())).unwrap();

    assert!(output.contains(r#"content: "16px";"#));
    assert!(output.contains("background: url(bg-16px.png) 0 5vw no-repeat;"));
    assert_eq!(output.matches("content:").count(), 1);
}

#[test]
fn prop_list_filters_declarations() {
    let options = ConvertOptions {
        prop_list: Some(vec!["*".to_string(), "!font*".to_string()]),
        ..Default::default()
    };
    let output = convert_stylesheet(".a { width: 32px; font-size: 32px }", &config(options)).unwrap();

    assert!(output.contains("width: 10vw;"));
    assert!(output.contains("font-size: 32px;"));
    assert!(!output.contains("font-size: 10vw;"));
}

#[test]
fn blacklisted_selectors_are_skipped() {
    let options = ConvertOptions {
        selector_blacklist: Some(vec![
            BlacklistEntry::Literal(".ignore".to_string()),
            BlacklistEntry::Pattern { pattern: r"^body$".to_string() },
        ]),
        ..all_props()
    };
    let css = ".ignore-me { width: 32px } body { width: 32px } body .x { width: 32px }";
    let output = convert_stylesheet(css, &config(options)).unwrap();

    assert_eq!(output.matches("10vw").count(), 1);
    assert!(output.contains("body .x {\n  width: 32px;\n  width: 10vw;\n}"));
}

#[test]
fn min_pixel_value_threshold() {
    let options = ConvertOptions { min_pixel_value: Some(2.0), ..all_props() };
    let output = convert_stylesheet(".a { border-width: 2px; margin: 3.2px }", &config(options)).unwrap();

    assert!(output.contains("border-width: 2px;"));
    assert!(output.contains("margin: 1vw;"));
}

#[test]
fn media_query_flag_gates_params() {
    let css = "@media (max-width: 640px) { .a { width: 32px } }";

    let off = convert_stylesheet(css, &config(all_props())).unwrap();
    assert!(off.starts_with("@media (max-width: 640px) {"));

    let on_options = ConvertOptions { media_query: Some(true), ..all_props() };
    let on = convert_stylesheet(css, &config(on_options)).unwrap();
    assert!(on.starts_with("@media (max-width: 200vw) {"));
    assert!(on.contains("width: 10vw;"));
}

#[test]
fn nested_rules_are_walked() {
    let css = "@supports (display: grid) { .grid { gap: 16px; .cell { padding: 32px } } }";
    let mut stylesheet = Stylesheet::parse(css).unwrap();
    let config = config(all_props());
    let stats = Processor::new(&config).keep_original(false).process(&mut stylesheet);

    assert_eq!(stats.declarations, 2);
    let output = stylesheet.to_string();
    assert!(output.contains("gap: 5vw;"));
    assert!(output.contains("padding: 10vw;"));
}

#[test]
fn declarations_outside_rules_untouched() {
    let css = "@font-face { font-family: X; size-adjust: 32px }";
    let mut stylesheet = Stylesheet::parse(css).unwrap();
    let config = config(all_props());
    let stats = Processor::new(&config).process(&mut stylesheet);

    assert_eq!(stats.declarations, 0);
    match &stylesheet.nodes[0] {
        Node::AtRule(at) => assert_eq!(at.nodes.as_ref().map(Vec::len), Some(2)),
        other => panic!("Expected at-rule, got {:?}", other),
    }
}

#[test]
fn options_file_shape() {
    let options = ConvertOptions::from_json_str(
        r#"{ "viewportWidth": 750, "unitPrecision": 3, "propList": ["*"], "selectorBlackList": [".keep"] }"#,
    )
    .unwrap();
    let output = convert_stylesheet(".a { width: 75px } .keep { width: 75px }", &config(options)).unwrap();

    assert!(output.contains("width: 10vw;"));
    assert!(output.contains(".keep {\n  width: 75px;\n}"));
}

#[test]
fn config_shared_across_threads() {
    let config = Arc::new(config(all_props()));

    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let config = Arc::clone(&config);
            thread::spawn(move || convert_value(&format!("{}px", i * 32), &config))
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["10vw", "20vw", "30vw", "40vw"]);
}
