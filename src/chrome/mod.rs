//! Page behaviours around the scene: smooth in-page scrolling, stat
//! counters and the mobile menu toggle. The state machines are plain Rust;
//! [`web`] binds them to the DOM.

pub mod counter;
pub mod menu;
pub mod scroll;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Unwraps a looked-up page element, failing with an error that names the
/// missing `selector`.
pub fn require<T>(element: Option<T>, what: &str, selector: &str) -> anyhow::Result<T> {
    element.ok_or_else(|| anyhow::anyhow!("missing {} {}", what, selector))
}
