use log::debug;
use web_sys::Document;

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

/// `load` has already fired once the document reports `complete`.
pub fn already_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

/// Hides the loading overlay once every resource has loaded.
pub fn mount(document: &Document, _config: &SiteConfig) -> SiteResult<()> {
    let Some(loader) = dom::query(document, selectors::LOADER) else {
        debug!("No loader overlay on this page");
        return Ok(());
    };

    if already_loaded(&document.ready_state()) {
        dom::set_class(&loader, selectors::HIDDEN, true);
        return Ok(());
    }

    let window = dom::window()?;
    dom::listen_once(&window, "load", move || {
        dom::set_class(&loader, selectors::HIDDEN, true);
    })
}
