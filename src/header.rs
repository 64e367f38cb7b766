use log::debug;
use web_sys::Document;

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let Some(header) = dom::query(document, selectors::HEADER) else {
        debug!("No header on this page, sticky header inert");
        return Ok(());
    };

    let window = dom::window()?;
    let threshold = config.header_threshold;
    let scroll_window = window.clone();
    dom::listen(&window, "scroll", move |_| {
        let scrolled = is_scrolled(dom::scroll_y(&scroll_window), threshold);
        dom::set_class(&header, selectors::SCROLLED, scrolled);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(1200.0, 50.0));
    }
}
