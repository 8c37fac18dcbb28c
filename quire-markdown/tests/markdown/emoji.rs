use crate::common::{blocks, import, round_trip};
use quire_markdown::emoji::find_emoji;
use quire_markdown::tree::NodeType;

#[test]
fn test_known_shortcode_becomes_plain_text() {
    let doc = import(":heart:");
    let paragraph = blocks(&doc)[0];
    let children = doc.children(paragraph);
    assert_eq!(children.len(), 1);
    assert!(doc.is(children[0], NodeType::Text));
    assert_eq!(doc.text(children[0]), Some("\u{2764}\u{FE0F}"));
}

#[test]
fn test_unknown_shortcode_stays_literal() {
    let doc = import(":not_a_real_emoji:");
    let paragraph = blocks(&doc)[0];
    assert_eq!(doc.text_content(paragraph), ":not_a_real_emoji:");
    assert_eq!(find_emoji("not_a_real_emoji"), None);
}

#[test]
fn test_shortcodes_inside_a_sentence() {
    let doc = import("I :heart: :unknown_thing: and :fire:");
    let paragraph = blocks(&doc)[0];
    assert_eq!(
        doc.text_content(paragraph),
        "I \u{2764}\u{FE0F} :unknown_thing: and \u{1F525}"
    );
}

#[test]
fn test_glyphs_export_as_glyphs() {
    // Emoji are plain text after import, so export writes the glyph itself.
    assert_eq!(round_trip("so :heart:"), "so \u{2764}\u{FE0F}");
}
