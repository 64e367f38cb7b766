use log::{error, info};
use web_sys::Document;

mod carousel;
mod config;
mod contact;
mod counter;
mod dom;
mod error;
mod header;
mod loader;
mod menu;
mod nav;
mod particles;
mod reveal;
mod theme;

use config::SiteConfig;
use error::SiteResult;

type Mount = fn(&Document, &SiteConfig) -> SiteResult<()>;

fn controllers() -> [(&'static str, Mount); 10] {
    [
        ("nav", nav::mount),
        ("loader", loader::mount),
        ("header", header::mount),
        ("menu", menu::mount),
        ("theme", theme::mount),
        ("reveal", reveal::mount),
        ("counter", counter::mount),
        ("carousel", carousel::mount),
        ("particles", particles::mount),
        ("contact", contact::mount),
    ]
}

/// Mounts every controller. A failing controller is logged and skipped so
/// the rest of the page keeps working.
fn mount_all(document: &Document, config: &SiteConfig) {
    for (name, mount) in controllers() {
        if let Err(err) = mount(document, config) {
            error!("Failed to mount {} controller: {}", name, err);
        }
    }
    info!("Page behaviours ready");
}

fn start() -> SiteResult<()> {
    let document = dom::document()?;
    let config = SiteConfig::default();

    if document.ready_state() == "loading" {
        let ready = document.clone();
        dom::listen_once(&document, "DOMContentLoaded", move || {
            mount_all(&ready, &config)
        })
    } else {
        mount_all(&document, &config);
        Ok(())
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page behaviours");
    if let Err(err) = start() {
        error!("Could not start page behaviours: {}", err);
    }
}
