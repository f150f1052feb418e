//! DOM bindings of the page chrome. Only compiled for the web.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `Closure::forget`. The counter animation loop is the only one that ends:
//! it stops once every counter is done or the shutdown token is cancelled.

use std::{cell::RefCell, rc::Rc, sync::Arc};

use anyhow::{Context as _, anyhow};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, Event, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, MouseEvent, PageTransitionEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};
use winit::{dpi::LogicalSize, window::Window};

use crate::{
    camera::{PointerFeed, container_extent, pointer_offset},
    chrome::{
        counter::CounterBoard,
        menu::MenuToggle,
        require,
        scroll::{ScrollHost, ScrollOutcome, follow_anchor},
    },
    config::{DomConfig, ShowcaseConfig},
    lifecycle::{ChildToken, LoopToken, page_hide_ends_loops},
};

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn browser_window() -> anyhow::Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| anyhow!("no window, the showcase must run in a browser page"))
}

fn document() -> anyhow::Result<Document> {
    browser_window()?
        .document()
        .ok_or_else(|| anyhow!("no document, the showcase must run in a browser page"))
}

fn query_all(document: &Document, selector: &str) -> anyhow::Result<Vec<Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(js_error)
        .with_context(|| format!("invalid selector {}", selector))?;
    Ok((0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// The canvas the scene renders into. Both the container and the canvas are
/// required.
pub fn scene_canvas(dom: &DomConfig) -> anyhow::Result<HtmlCanvasElement> {
    let document = document()?;
    document
        .get_element_by_id(dom.container_id)
        .ok_or_else(|| anyhow!("missing scene container #{}", dom.container_id))?;
    document
        .get_element_by_id(dom.canvas_id)
        .ok_or_else(|| anyhow!("missing scene canvas #{}", dom.canvas_id))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{} is not a <canvas>", dom.canvas_id))
}

/// Size of the scene container in CSS pixels, `None` while it is not laid
/// out.
pub fn container_size(dom: &DomConfig) -> anyhow::Result<Option<LogicalSize<u32>>> {
    let container = document()?
        .get_element_by_id(dom.container_id)
        .ok_or_else(|| anyhow!("missing scene container #{}", dom.container_id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("#{} is not an HTML element", dom.container_id))?;
    Ok(container_extent(
        container.offset_width(),
        container.offset_height(),
    ))
}

/// Resizes `window` to the scene container whenever the browser window is
/// resized.
pub fn follow_container(dom: &DomConfig, window: Arc<Window>) -> anyhow::Result<()> {
    let dom = dom.clone();
    let on_resize = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        match container_size(&dom) {
            Ok(Some(size)) => {
                let _ = window.request_inner_size(size);
            }
            Ok(None) => log::debug!("scene container has no size yet"),
            Err(e) => log::error!("cannot measure the scene container: {:#}", e),
        }
    });
    browser_window()?
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_resize.forget();
    Ok(())
}

impl ScrollHost for Document {
    fn scroll_to_element(&mut self, id: &str) -> bool {
        let Some(element) = self.get_element_by_id(id) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

/// Installs every page behaviour: smooth anchors, stat counters, the menu
/// toggle and the page-wide pointer tracking that feeds `pointer`.
/// Cancelling `shutdown` stops the counter loop; leaving the page cancels it.
pub fn install(
    settings: &ShowcaseConfig,
    shutdown: &LoopToken,
    pointer: &PointerFeed,
) -> anyhow::Result<()> {
    let dom = &settings.dom;
    let document = document()?;
    install_smooth_scroll(&document, dom)?;
    install_counters(&document, dom, LoopToken::child_of(shutdown))?;
    install_menu(&document, dom)?;
    install_pointer(&document, pointer.clone(), settings.motion.cursor_sensitivity)?;
    install_page_exit(shutdown)?;
    log::info!("page chrome installed");
    Ok(())
}

fn install_smooth_scroll(document: &Document, dom: &DomConfig) -> anyhow::Result<()> {
    let anchors = query_all(document, dom.anchor_selector)?;
    for anchor in &anchors {
        let mut host = document.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let href = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.get_attribute("href"))
                .unwrap_or_default();
            if let ScrollOutcome::MissingTarget(id) = follow_anchor(&mut host, &href) {
                log::debug!("anchor #{} has no target", id);
            }
        });
        anchor
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_click.forget();
    }
    log::debug!("{} anchors scroll smoothly", anchors.len());
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> anyhow::Result<()> {
    browser_window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(())
}

/// Drives the counters one step per animation frame until none is animating.
fn run_counter_loop(board: Rc<RefCell<CounterBoard>>, elements: Rc<Vec<Element>>, token: ChildToken) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = frame.clone();
    *handle.borrow_mut() = Some(Closure::new(move || {
        if token.is_cancelled() {
            // drop our handle so the closure is freed once it returns
            let _ = frame.borrow_mut().take();
            return;
        }
        for (idx, text) in board.borrow_mut().tick() {
            if let Some(element) = elements.get(idx) {
                element.set_text_content(Some(&text));
            }
        }
        if !board.borrow().is_animating() {
            let _ = frame.borrow_mut().take();
            return;
        }
        if let Some(callback) = frame.borrow().as_ref() {
            if let Err(e) = request_frame(callback) {
                log::error!("counter animation stopped: {:#}", e);
            }
        }
    }));
    if let Some(callback) = handle.borrow().as_ref() {
        if let Err(e) = request_frame(callback) {
            log::error!("counter animation could not start: {:#}", e);
        }
    }
}

fn install_counters(document: &Document, dom: &DomConfig, token: ChildToken) -> anyhow::Result<()> {
    let elements = query_all(document, dom.counter_selector)?;
    let texts: Vec<String> = elements
        .iter()
        .map(|element| element.text_content().unwrap_or_default())
        .collect();
    let board = Rc::new(RefCell::new(CounterBoard::new(texts.iter().map(String::as_str))));
    let elements = Rc::new(elements);

    let stats_selector = dom.stats_selector;
    let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let visible = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| {
                    entry.is_intersecting() && entry.target().matches(stats_selector).unwrap_or(false)
                });
            if !visible {
                return;
            }
            let started = board.borrow_mut().trigger();
            if started > 0 {
                log::debug!("{} counters started", started);
                run_counter_loop(board.clone(), elements.clone(), token.clone());
            }
        },
    );
    let observer = IntersectionObserver::new(on_intersect.as_ref().unchecked_ref()).map_err(js_error)?;
    on_intersect.forget();

    for section in query_all(document, dom.stats_selector)? {
        observer.observe(&section);
    }
    Ok(())
}

fn install_menu(document: &Document, dom: &DomConfig) -> anyhow::Result<()> {
    let button = document
        .query_selector(dom.menu_toggle_selector)
        .map_err(js_error)?;
    let button = require(button, "menu toggle", dom.menu_toggle_selector)?;
    let links = document
        .query_selector(dom.nav_links_selector)
        .map_err(js_error)?;
    let links = require(links, "navigation links", dom.nav_links_selector)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("{} is not an HTML element", dom.nav_links_selector))?;

    let initial = links
        .style()
        .get_property_value("display")
        .unwrap_or_default();
    let mut toggle = MenuToggle::new(&initial);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let display = toggle.toggle();
        if let Err(e) = links.style().set_property("display", display) {
            log::error!("cannot toggle the menu: {:?}", e);
        }
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_click.forget();
    Ok(())
}

/// Tracks the pointer over the whole page, measured from the middle of the
/// browser window in CSS pixels.
fn install_pointer(document: &Document, pointer: PointerFeed, sensitivity: f32) -> anyhow::Result<()> {
    let window = browser_window()?;
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let extent = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default() as f32 / 2.0
        };
        let half_extents = (extent(window.inner_width()), extent(window.inner_height()));
        pointer.publish(pointer_offset(
            event.client_x() as f32,
            event.client_y() as f32,
            half_extents,
            sensitivity,
        ));
    });
    document
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_move.forget();
    Ok(())
}

fn install_page_exit(shutdown: &LoopToken) -> anyhow::Result<()> {
    let window = browser_window()?;
    let shutdown = shutdown.clone();
    let on_exit = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |event: PageTransitionEvent| {
        if page_hide_ends_loops(event.persisted()) {
            shutdown.cancel();
        } else {
            log::debug!("page kept in the back/forward cache, loops stay alive");
        }
    });
    window
        .add_event_listener_with_callback("pagehide", on_exit.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_exit.forget();
    Ok(())
}
