use log::debug;
use web_sys::{Document, Element};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

const INDEX_PAGE: &str = "index.html";

/// Last path segment of `path`, or `index.html` for a directory path.
pub fn page_filename(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => INDEX_PAGE,
    }
}

/// Filename an href points at. Unlike the current page, an empty tail stays
/// empty so `href="/"` does not match everything.
pub fn href_filename(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or("")
}

pub fn is_current(href: &str, current_page: &str) -> bool {
    href_filename(href) == current_page
}

pub fn highlight(links: &[Element], current_page: &str) {
    for link in links {
        let href = link.get_attribute("href").unwrap_or_default();
        let classes = link.class_list();
        let _ = classes.remove_1(selectors::ACTIVE);
        if is_current(&href, current_page) {
            let _ = classes.add_1(selectors::ACTIVE);
        }
    }
}

pub fn mount(document: &Document, _config: &SiteConfig) -> SiteResult<()> {
    let path = dom::window()?.location().pathname()?;
    let current = page_filename(&path);
    let links = dom::query_all(document, selectors::NAV_LINK);
    debug!("Highlighting {} nav links for page {}", links.len(), current);
    highlight(&links, current);
    Ok(())
}
