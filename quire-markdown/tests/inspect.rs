use crate::common::import;
use insta::assert_snapshot;
use quire_markdown::inspect::{render, rules_to_json, to_treeviz_str, InspectFormat};
use quire_markdown::PLAYGROUND_TRANSFORMERS;

#[test]
fn test_treeviz_of_heading_and_table() {
    let doc = import("# Title\n\n| a | b |\n| --- | --- |\n| c | d |");
    assert_snapshot!(to_treeviz_str(&doc, doc.root()), @r"
    ⧉ Document (2 blocks)
    ├─ § h1 Title
    │ └─ ◦ Title
    └─ ▦ 2 rows × 2 columns
      ├─ ▤ 2 cells
      │ ├─ ▢ a (header)
      │ │ └─ ¶ a
      │ │   └─ ◦ a
      │ └─ ▢ b (header)
      │   └─ ¶ b
      │     └─ ◦ b
      └─ ▤ 2 cells
        ├─ ▢ c
        │ └─ ¶ c
        │   └─ ◦ c
        └─ ▢ d
          └─ ¶ d
            └─ ◦ d
    ");
}

#[test]
fn test_treeviz_shows_formats_and_decorators() {
    let doc = import("**hi**there\n\n$x$\n\n---");
    assert_snapshot!(to_treeviz_str(&doc, doc.root()), @r"
    ⧉ Document (3 blocks)
    ├─ ¶ hithere
    │ ├─ ◦ hi [bold]
    │ └─ ◦ there
    ├─ ¶ x
    │ └─ √ x (inline)
    └─ ⎯ horizontal rule
    ");
}

#[test]
fn test_json_render() {
    let doc = import("---");
    let json = render(&doc, InspectFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["node"]["type"], "horizontal_rule");
}

#[test]
fn test_rules_json_lists_every_rule() {
    let json = rules_to_json(&PLAYGROUND_TRANSFORMERS).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rules = value.as_array().unwrap();
    assert_eq!(rules.len(), PLAYGROUND_TRANSFORMERS.len());
    assert_eq!(rules[0]["name"], "table");
    assert_eq!(rules.last().unwrap()["name"], "link");
    assert_eq!(rules.last().unwrap()["trigger"], ")");
}
