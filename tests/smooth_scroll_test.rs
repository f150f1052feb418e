use engine_showcase::chrome::scroll::{ScrollOutcome, anchor_fragment, follow_anchor};

use crate::common::test_utils::FakePage;

mod common;

#[test]
fn should_scroll_to_an_existing_section() {
    let mut page = FakePage::with_ids(&["features", "contact"]);

    let outcome = follow_anchor(&mut page, "#contact");

    assert_eq!(outcome, ScrollOutcome::Scrolled("contact".to_string()));
    assert_eq!(page.scrolled_to, vec!["contact".to_string()]);
}

#[test]
fn should_not_scroll_for_a_missing_target() {
    let mut page = FakePage::with_ids(&["features"]);

    let outcome = follow_anchor(&mut page, "#missing-id");

    assert_eq!(outcome, ScrollOutcome::MissingTarget("missing-id".to_string()));
    assert!(page.scrolled_to.is_empty());
}

#[test]
fn should_ignore_links_that_are_not_anchors() {
    let mut page = FakePage::with_ids(&["features"]);

    assert_eq!(follow_anchor(&mut page, "#"), ScrollOutcome::NotAnAnchor);
    assert_eq!(follow_anchor(&mut page, "/features"), ScrollOutcome::NotAnAnchor);
    assert!(page.scrolled_to.is_empty());
}

#[test]
fn should_extract_the_fragment() {
    assert_eq!(anchor_fragment("#team"), Some("team"));
    assert_eq!(anchor_fragment(" #team "), Some("team"));
    assert_eq!(anchor_fragment("#"), None);
    assert_eq!(anchor_fragment("team"), None);
}
