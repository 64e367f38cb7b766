use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{selectors, SiteConfig};
use crate::dom;
use crate::error::SiteResult;

/// Linear count-up from 0 to `target`, one display string per step.
#[derive(Debug, Clone)]
pub struct CounterRamp {
    target: f64,
    suffix: String,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterRamp {
    pub fn new(target: f64, suffix: impl Into<String>, step_divisor: f64) -> Self {
        Self {
            target,
            suffix: suffix.into(),
            increment: target / step_divisor,
            current: 0.0,
            done: false,
        }
    }

    /// Text to display after the next step, `None` once finished.
    pub fn step(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        if self.current < self.target {
            self.current = (self.current + self.increment).ceil();
            Some(format!("{}", self.current))
        } else {
            self.done = true;
            Some(format!("{}{}", self.target, self.suffix))
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// The stats section counts as reached once its top edge is less than one
/// viewport below the current scroll position.
pub fn section_reached(scroll_y: f64, section_top: f64, viewport_height: f64) -> bool {
    scroll_y > section_top - viewport_height
}

/// One-shot activation guard for the stats section.
#[derive(Debug, Default)]
pub struct CounterTrigger {
    activated: bool,
}

impl CounterTrigger {
    /// True exactly once: the first time the section is reached.
    pub fn fire(&mut self, scroll_y: f64, section_top: f64, viewport_height: f64) -> bool {
        if self.activated || !section_reached(scroll_y, section_top, viewport_height) {
            return false;
        }
        self.activated = true;
        true
    }
}

pub fn parse_target(raw: Option<&str>) -> f64 {
    match raw.map(str::trim).map(str::parse::<f64>) {
        Some(Ok(value)) if value.is_finite() => value,
        None => 0.0,
        Some(_) => {
            warn!("Counter target {:?} is not a number, using 0", raw);
            0.0
        }
    }
}

fn animate(counter: Element, config: &SiteConfig) {
    let target = parse_target(counter.get_attribute(selectors::COUNTER_TARGET).as_deref());
    let suffix = counter
        .get_attribute(selectors::COUNTER_SUFFIX)
        .unwrap_or_default();
    let mut ramp = CounterRamp::new(target, suffix, config.counter_step_divisor);
    let delay = config.counter_step_delay_ms;

    counter.set_text_content(Some("0"));
    spawn_local(async move {
        while let Some(text) = ramp.step() {
            counter.set_text_content(Some(&text));
            if ramp.is_done() {
                break;
            }
            TimeoutFuture::new(delay).await;
        }
    });
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let Some(section) = dom::query(document, selectors::STATS_SECTION)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("No stats section, counters inert");
        return Ok(());
    };

    let counters = dom::query_all(document, selectors::COUNTER);
    let mut trigger = CounterTrigger::default();
    let window = dom::window()?;
    let scroll_window = window.clone();
    let config = config.clone();
    dom::listen(&window, "scroll", move |_| {
        let fired = trigger.fire(
            dom::scroll_y(&scroll_window),
            f64::from(section.offset_top()),
            dom::viewport_height(&scroll_window),
        );
        if fired {
            debug!("Stats section reached, animating {} counters", counters.len());
            for counter in &counters {
                animate(counter.clone(), &config);
            }
        }
    })
}
