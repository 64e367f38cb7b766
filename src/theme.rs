use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, info, warn};
use web_sys::{CustomEvent, Document, Element, HtmlInputElement, Storage};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::{SiteError, SiteResult};

/// Dispatched on the document after every user-triggered theme switch.
pub const THEME_CHANGED: &str = "themeChanged";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The switch is checked exactly when the light theme is on.
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn is_checked(self) -> bool {
        self == Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(SiteError::UnknownTheme(other.to_string())),
        }
    }
}

/// Everything the theme controller touches outside itself.
pub trait ThemeHost {
    fn stored(&self) -> Option<String>;
    fn store(&self, theme: Theme);
    fn set_root(&self, theme: Theme);
    fn set_checked(&self, checked: bool);
    fn broadcast(&self);
}

pub struct ThemeController<H> {
    host: H,
    current: Theme,
}

impl<H: ThemeHost> ThemeController<H> {
    /// Applies the persisted preference (or `default`) without broadcasting.
    pub fn load(host: H, default: Theme) -> Self {
        let current = match host.stored() {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|_| {
                warn!("Ignoring stored theme {:?}", raw);
                default
            }),
            None => default,
        };
        let mut controller = Self { host, current };
        controller.apply(current, false);
        controller
    }

    fn apply(&mut self, theme: Theme, broadcast: bool) {
        self.current = theme;
        self.host.set_root(theme);
        self.host.store(theme);
        self.host.set_checked(theme.is_checked());
        if broadcast {
            self.host.broadcast();
        }
    }

    /// Reaction to the user flipping the switch.
    pub fn on_toggle(&mut self, checked: bool) {
        let theme = Theme::from_checked(checked);
        info!("Switching theme to {}", theme);
        self.apply(theme, true);
    }

    pub fn current(&self) -> Theme {
        self.current
    }
}

pub struct DomThemeHost {
    document: Document,
    root: Option<Element>,
    storage: Option<Storage>,
    switch: Option<HtmlInputElement>,
    key: &'static str,
}

impl ThemeHost for DomThemeHost {
    fn stored(&self) -> Option<String> {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(self.key).ok().flatten())
    }

    fn store(&self, theme: Theme) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(self.key, theme.as_str());
        }
    }

    fn set_root(&self, theme: Theme) {
        if let Some(root) = &self.root {
            let _ = root.set_attribute(selectors::THEME_ATTRIBUTE, theme.as_str());
        }
    }

    fn set_checked(&self, checked: bool) {
        if let Some(switch) = &self.switch {
            switch.set_checked(checked);
        }
    }

    fn broadcast(&self) {
        if let Ok(event) = CustomEvent::new(THEME_CHANGED) {
            let _ = self.document.dispatch_event(&event);
        }
    }
}

/// Theme currently reflected on the document root.
pub fn current_theme(document: &Document, default: Theme) -> Theme {
    document
        .document_element()
        .and_then(|root| root.get_attribute(selectors::THEME_ATTRIBUTE))
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let host = DomThemeHost {
        document: document.clone(),
        root: document.document_element(),
        storage: dom::window()?.local_storage().ok().flatten(),
        switch: dom::by_id::<HtmlInputElement>(document, selectors::THEME_SWITCH_ID),
        key: config.theme_storage_key,
    };
    let switch = host.switch.clone();
    let controller = ThemeController::load(host, config.default_theme);
    debug!("Theme {} applied on load", controller.current());

    let Some(switch) = switch else {
        debug!("No theme switch on this page");
        return Ok(());
    };
    let controller = Rc::new(RefCell::new(controller));
    let input = switch.clone();
    dom::listen(&switch, "change", move |_| {
        controller.borrow_mut().on_toggle(input.checked());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct FakeHost {
        stored: RefCell<Option<String>>,
        root: RefCell<Option<Theme>>,
        checked: RefCell<bool>,
        broadcasts: RefCell<usize>,
    }

    impl ThemeHost for Rc<FakeHost> {
        fn stored(&self) -> Option<String> {
            self.stored.borrow().clone()
        }
        fn store(&self, theme: Theme) {
            *self.stored.borrow_mut() = Some(theme.as_str().to_string());
        }
        fn set_root(&self, theme: Theme) {
            *self.root.borrow_mut() = Some(theme);
        }
        fn set_checked(&self, checked: bool) {
            *self.checked.borrow_mut() = checked;
        }
        fn broadcast(&self) {
            *self.broadcasts.borrow_mut() += 1;
        }
    }

    fn assert_consistent(host: &FakeHost, theme: Theme) {
        assert_eq!(host.stored.borrow().as_deref(), Some(theme.as_str()));
        assert_eq!(*host.root.borrow(), Some(theme));
        assert_eq!(*host.checked.borrow(), theme == Theme::Light);
    }

    #[test]
    fn defaults_to_dark_without_broadcast() {
        let host = Rc::new(FakeHost::default());
        let controller = ThemeController::load(host.clone(), Theme::Dark);
        assert_eq!(controller.current(), Theme::Dark);
        assert_consistent(&host, Theme::Dark);
        assert_eq!(*host.broadcasts.borrow(), 0);
    }

    #[test]
    fn restores_stored_preference() {
        let host = Rc::new(FakeHost::default());
        *host.stored.borrow_mut() = Some("light".to_string());
        let controller = ThemeController::load(host.clone(), Theme::Dark);
        assert_eq!(controller.current(), Theme::Light);
        assert_consistent(&host, Theme::Light);
        assert_eq!(*host.broadcasts.borrow(), 0);
    }

    #[test]
    fn unknown_stored_value_falls_back() {
        let host = Rc::new(FakeHost::default());
        *host.stored.borrow_mut() = Some("sepia".to_string());
        let controller = ThemeController::load(host.clone(), Theme::Dark);
        assert_eq!(controller.current(), Theme::Dark);
        assert_consistent(&host, Theme::Dark);
    }

    #[test]
    fn parse_and_display_agree() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.to_string().parse::<Theme>().ok(), Some(theme));
            assert_eq!(Theme::from_checked(theme.is_checked()), theme);
        }
        assert!("".parse::<Theme>().is_err());
    }

    proptest! {
        #[test]
        fn toggles_keep_storage_root_and_switch_in_sync(
            toggles in proptest::collection::vec(any::<bool>(), 0..32),
        ) {
            let host = Rc::new(FakeHost::default());
            let mut controller = ThemeController::load(host.clone(), Theme::Dark);
            for (i, checked) in toggles.iter().enumerate() {
                controller.on_toggle(*checked);
                let theme = controller.current();
                prop_assert_eq!(theme, Theme::from_checked(*checked));
                let stored = host.stored.borrow().clone();
                prop_assert_eq!(stored.as_deref(), Some(theme.as_str()));
                prop_assert_eq!(*host.root.borrow(), Some(theme));
                prop_assert_eq!(*host.checked.borrow(), theme == Theme::Light);
                prop_assert_eq!(*host.broadcasts.borrow(), i + 1);
            }
        }
    }
}
