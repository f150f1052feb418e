use engine_showcase::{
    chrome::{
        menu::{MenuToggle, NavVisibility},
        require,
    },
    config::DomConfig,
};

#[test]
fn should_show_hidden_links_on_first_click() {
    let mut menu = MenuToggle::new("");
    assert_eq!(menu.visibility(), NavVisibility::Hidden);

    assert_eq!(menu.toggle(), "flex");
    assert_eq!(menu.visibility(), NavVisibility::Shown);
}

#[test]
fn should_alternate_on_every_click() {
    let mut menu = MenuToggle::new("flex");
    let displays: Vec<&str> = (0..4).map(|_| menu.toggle()).collect();
    assert_eq!(displays, vec!["none", "flex", "none", "flex"]);
}

#[test]
fn should_treat_anything_but_flex_as_hidden() {
    for display in ["none", "block", "grid", "", "inline-flex"] {
        assert_eq!(NavVisibility::from_display(display), NavVisibility::Hidden, "{:?}", display);
    }
    assert_eq!(NavVisibility::from_display(" flex "), NavVisibility::Shown);
}

#[test]
fn should_toggle_back_to_the_same_visibility() {
    assert_eq!(NavVisibility::Shown.toggled().toggled(), NavVisibility::Shown);
    assert_eq!(NavVisibility::Hidden.display(), "none");
}

#[test]
fn should_fail_naming_the_missing_menu_selector() {
    let dom = DomConfig::default();

    let err = require(None::<()>, "menu toggle", dom.menu_toggle_selector).unwrap_err();
    assert_eq!(err.to_string(), "missing menu toggle .menu-toggle");

    let err = require(None::<()>, "navigation links", dom.nav_links_selector).unwrap_err();
    assert!(err.to_string().contains(".nav-links"));

    assert_eq!(require(Some(7), "menu toggle", dom.menu_toggle_selector).unwrap(), 7);
}
