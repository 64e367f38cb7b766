//! Decorative particle background on the homepage hero.
//!
//! Rendering belongs to the particles.js library loaded by the page; this
//! module owns its configuration and the destroy-before-rebuild lifecycle so
//! that a theme switch never leaves two render loops running.

use js_sys::{Array, Function, Reflect};
use log::{debug, error, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::SiteResult;
use crate::theme::{self, Theme, THEME_CHANGED};

const LIBRARY_GLOBAL: &str = "particlesJS";
const INSTANCES_GLOBAL: &str = "pJSDom";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = particlesJS, catch)]
    fn particles_js(tag_id: &str, params: JsValue) -> Result<(), JsValue>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticlesConfig {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Particles {
    pub number: Number,
    pub color: Color,
    pub shape: Shape,
    pub opacity: Randomized,
    pub size: Randomized,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub motion: Motion,
}

#[derive(Debug, Clone, Serialize)]
pub struct Number {
    pub value: u32,
    pub density: Density,
}

#[derive(Debug, Clone, Serialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Color {
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub polygon: Polygon,
}

#[derive(Debug, Clone, Serialize)]
pub struct Polygon {
    pub nb_sides: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Randomized {
    pub value: f64,
    pub random: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: u32,
    pub color: &'static str,
    pub opacity: f64,
    pub width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Motion {
    pub enable: bool,
    pub speed: f64,
    pub direction: &'static str,
    pub random: bool,
    pub straight: bool,
    pub out_mode: &'static str,
    pub bounce: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Interactivity {
    pub detect_on: &'static str,
    pub events: Events,
    pub modes: Modes,
}

#[derive(Debug, Clone, Serialize)]
pub struct Events {
    pub onhover: Trigger,
    pub onclick: Trigger,
    pub resize: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trigger {
    pub enable: bool,
    pub mode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Modes {
    pub grab: Grab,
    pub push: Push,
}

#[derive(Debug, Clone, Serialize)]
pub struct Grab {
    pub distance: u32,
    pub line_opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Push {
    pub particles_nb: u32,
}

/// Dark particles on the light theme and the other way round.
pub fn particle_color(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "#333333",
        Theme::Dark => "#ffffff",
    }
}

impl ParticlesConfig {
    pub fn for_theme(theme: Theme) -> Self {
        let color = particle_color(theme);
        Self {
            particles: Particles {
                number: Number {
                    value: 45,
                    density: Density {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: Color { value: color },
                shape: Shape {
                    kind: "polygon",
                    polygon: Polygon { nb_sides: 5 },
                },
                opacity: Randomized {
                    value: 0.3,
                    random: true,
                },
                size: Randomized {
                    value: 10.0,
                    random: true,
                },
                line_linked: LineLinked {
                    enable: true,
                    distance: 200,
                    color,
                    opacity: 0.3,
                    width: 1,
                },
                motion: Motion {
                    enable: true,
                    speed: 1.0,
                    direction: "none",
                    random: true,
                    straight: false,
                    out_mode: "out",
                    bounce: false,
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas",
                events: Events {
                    onhover: Trigger {
                        enable: true,
                        mode: "grab",
                    },
                    onclick: Trigger {
                        enable: true,
                        mode: "push",
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: Grab {
                        distance: 140,
                        line_opacity: 1.0,
                    },
                    push: Push { particles_nb: 4 },
                },
            },
            retina_detect: true,
        }
    }
}

pub struct ParticleBackground {
    window: Window,
    document: Document,
    container_id: &'static str,
    default_theme: Theme,
}

impl ParticleBackground {
    /// Tears down the live instance, if any, and empties the library's
    /// instance list. Returns whether something was destroyed.
    fn destroy(&self) -> SiteResult<bool> {
        let key = JsValue::from_str(INSTANCES_GLOBAL);
        let Ok(instances) = Reflect::get(&self.window, &key)?.dyn_into::<Array>() else {
            return Ok(false);
        };
        if instances.length() == 0 {
            return Ok(false);
        }

        let vendors = ["pJS", "fn", "vendors"]
            .iter()
            .try_fold(instances.get(0), |obj, field| {
                Reflect::get(&obj, &JsValue::from_str(field))
            })?;
        let destroy = Reflect::get(&vendors, &JsValue::from_str("destroypJS"))?
            .dyn_into::<Function>()?;
        destroy.call0(&vendors)?;
        Reflect::set(&self.window, &key, &Array::new())?;
        Ok(true)
    }

    pub fn init(&self) -> SiteResult<()> {
        if self.destroy()? {
            debug!("Destroyed previous particle instance");
        }
        let theme = theme::current_theme(&self.document, self.default_theme);
        let params = serde_wasm_bindgen::to_value(&ParticlesConfig::for_theme(theme))
            .map_err(JsValue::from)?;
        particles_js(self.container_id, params)?;
        debug!("Particles rendered for {} theme", theme);
        Ok(())
    }
}

pub fn mount(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    if document.get_element_by_id(config.particles_container_id).is_none() {
        debug!("No particle container, background inert");
        return Ok(());
    }
    let window = dom::window()?;
    if !Reflect::has(&window, &JsValue::from_str(LIBRARY_GLOBAL))? {
        warn!("{} is not loaded, skipping particle background", LIBRARY_GLOBAL);
        return Ok(());
    }

    let background = ParticleBackground {
        window,
        document: document.clone(),
        container_id: config.particles_container_id,
        default_theme: config.default_theme,
    };
    background.init()?;

    dom::listen(document, THEME_CHANGED, move |_| {
        if let Err(err) = background.init() {
            error!("Failed to rebuild particles: {}", err);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn colors_contrast_with_theme() {
        assert_eq!(particle_color(Theme::Light), "#333333");
        assert_eq!(particle_color(Theme::Dark), "#ffffff");
    }

    #[test]
    fn config_matches_library_schema() {
        let value = serde_json::to_value(ParticlesConfig::for_theme(Theme::Light)).unwrap();
        assert_eq!(value["particles"]["number"], json!({ "value": 45, "density": { "enable": true, "value_area": 800 } }));
        assert_eq!(value["particles"]["shape"], json!({ "type": "polygon", "polygon": { "nb_sides": 5 } }));
        assert_eq!(value["particles"]["color"]["value"], "#333333");
        assert_eq!(value["particles"]["line_linked"]["color"], "#333333");
        assert_eq!(value["particles"]["line_linked"]["distance"], 200);
        assert_eq!(value["particles"]["move"]["out_mode"], "out");
        assert_eq!(value["particles"]["move"]["direction"], "none");
        assert_eq!(value["interactivity"]["events"]["onhover"]["mode"], "grab");
        assert_eq!(value["interactivity"]["modes"]["grab"]["distance"], 140);
        assert_eq!(value["interactivity"]["modes"]["push"]["particles_nb"], 4);
        assert_eq!(value["retina_detect"], true);
    }

    #[test]
    fn only_colors_depend_on_theme() {
        let mut light = serde_json::to_value(ParticlesConfig::for_theme(Theme::Light)).unwrap();
        let mut dark = serde_json::to_value(ParticlesConfig::for_theme(Theme::Dark)).unwrap();
        assert_eq!(dark["particles"]["color"]["value"], "#ffffff");
        for value in [&mut light, &mut dark] {
            value["particles"]["color"]["value"] = json!(null);
            value["particles"]["line_linked"]["color"] = json!(null);
        }
        assert_eq!(light, dark);
    }
}
