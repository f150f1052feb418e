//! In-page anchor navigation with smooth scrolling.

/// Something that can bring an element into view by id.
pub trait ScrollHost {
    /// Smoothly scrolls the element with `id` to the top of the view.
    /// Returns `false` when there is no such element.
    fn scroll_to_element(&mut self, id: &str) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    Scrolled(String),
    /// The fragment names no element on the page.
    MissingTarget(String),
    /// The link isn't an in-page anchor or its fragment is empty.
    NotAnAnchor,
}

/// The element id an in-page link points at: `"#team"` gives `"team"`.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.trim()
        .strip_prefix('#')
        .filter(|fragment| !fragment.is_empty())
}

/// Follows an in-page link. A missing target is not an error, the page
/// just doesn't move.
pub fn follow_anchor<H: ScrollHost + ?Sized>(host: &mut H, href: &str) -> ScrollOutcome {
    let Some(id) = anchor_fragment(href) else {
        return ScrollOutcome::NotAnAnchor;
    };
    if host.scroll_to_element(id) {
        ScrollOutcome::Scrolled(id.to_string())
    } else {
        log::debug!("no element with id {:?} to scroll to", id);
        ScrollOutcome::MissingTarget(id.to_string())
    }
}
