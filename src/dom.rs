//! Thin wrappers over `web_sys` lookups and listener plumbing shared by the
//! controllers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::error::{SiteError, SiteResult};

pub fn window() -> SiteResult<Window> {
    web_sys::window().ok_or(SiteError::MissingElement("window"))
}

pub fn document() -> SiteResult<Document> {
    window()?
        .document()
        .ok_or(SiteError::MissingElement("document"))
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Looks up an element by id and casts it to a concrete element type.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Binds `handler` to `event` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> SiteResult<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Binds a handler that is dropped after its first call.
pub fn listen_once<F>(target: &EventTarget, event: &str, handler: F) -> SiteResult<()>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(handler);
    target.add_event_listener_with_callback(event, callback.unchecked_ref())?;
    Ok(())
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .filter(|h| *h > 0.0)
        .or_else(|| {
            window
                .document()
                .and_then(|d| d.document_element())
                .map(|root| f64::from(root.client_height()))
        })
        .unwrap_or(0.0)
}
