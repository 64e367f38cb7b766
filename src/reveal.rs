use log::debug;
use web_sys::{Document, Element, Window};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Hide again once the element leaves the trigger zone.
    Toggle,
    /// Keep revealed after the first time it enters.
    Once,
}

/// True when an element whose top edge sits at `top` (relative to the
/// viewport) is inside the trigger zone.
pub fn in_view(top: f64, viewport_height: f64, divisor: f64) -> bool {
    top <= viewport_height / divisor
}

pub fn visible_after(mode: RevealMode, was_visible: bool, in_view: bool) -> bool {
    match mode {
        RevealMode::Toggle => in_view,
        RevealMode::Once => was_visible || in_view,
    }
}

fn update(window: &Window, elements: &[Element], divisor: f64, mode: RevealMode) {
    let height = dom::viewport_height(window);
    for element in elements {
        let top = element.get_bounding_client_rect().top();
        let was_visible = element.class_list().contains(selectors::VISIBLE);
        let visible = visible_after(mode, was_visible, in_view(top, height, divisor));
        if visible != was_visible {
            dom::set_class(element, selectors::VISIBLE, visible);
        }
    }
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let elements = dom::query_all(document, selectors::REVEAL);
    if elements.is_empty() {
        debug!("Nothing to reveal on this page");
        return Ok(());
    }

    let window = dom::window()?;
    let (divisor, mode) = (config.reveal_divisor, config.reveal_mode);
    update(&window, &elements, divisor, mode);

    let scroll_window = window.clone();
    dom::listen(&window, "scroll", move |_| {
        update(&scroll_window, &elements, divisor, mode);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trigger_zone_is_viewport_over_divisor() {
        assert!(in_view(0.0, 1000.0, 1.25));
        assert!(in_view(800.0, 1000.0, 1.25));
        assert!(!in_view(800.5, 1000.0, 1.25));
        assert!(in_view(-300.0, 1000.0, 1.25));
    }

    #[test]
    fn toggle_mode_hides_again() {
        assert!(visible_after(RevealMode::Toggle, false, true));
        assert!(!visible_after(RevealMode::Toggle, true, false));
    }

    #[test]
    fn once_mode_keeps_revealed() {
        assert!(visible_after(RevealMode::Once, true, false));
        assert!(!visible_after(RevealMode::Once, false, false));
    }

    proptest! {
        #[test]
        fn visibility_follows_position(top in -2000.0f64..4000.0, height in 1.0f64..3000.0) {
            let visible = visible_after(RevealMode::Toggle, false, in_view(top, height, 1.25));
            prop_assert_eq!(visible, top <= height / 1.25);
        }
    }
}
