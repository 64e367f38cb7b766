use log::debug;
use web_sys::{Document, Element};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

fn toggle(hamburger: &Element, menu: &Element) {
    let _ = hamburger.class_list().toggle(selectors::ACTIVE);
    let _ = menu.class_list().toggle(selectors::ACTIVE);
}

fn collapse(hamburger: &Element, menu: &Element) {
    dom::set_class(hamburger, selectors::ACTIVE, false);
    dom::set_class(menu, selectors::ACTIVE, false);
}

/// Wires the hamburger button to the collapsible menu. Any nav link click
/// closes the menu again.
pub fn mount(document: &Document, _config: &SiteConfig) -> SiteResult<()> {
    let (Some(hamburger), Some(menu)) = (
        dom::query(document, selectors::HAMBURGER),
        dom::query(document, selectors::NAV_MENU),
    ) else {
        debug!("Mobile menu markup missing, menu controller inert");
        return Ok(());
    };

    {
        let (button, nav) = (hamburger.clone(), menu.clone());
        dom::listen(&hamburger, "click", move |_| toggle(&button, &nav))?;
    }

    for link in dom::query_all(document, selectors::NAV_LINK) {
        let (button, nav) = (hamburger.clone(), menu.clone());
        dom::listen(&link, "click", move |_| collapse(&button, &nav))?;
    }
    Ok(())
}
