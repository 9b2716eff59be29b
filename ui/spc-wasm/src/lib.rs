//! SPC Dashboard WASM Frontend
//!
//! Browser adapter for the dashboard shell: binds the markup, feeds DOM
//! events to `spc_core::Shell` and applies the effects it returns.

pub mod debug;
pub mod dom;
pub mod events;
pub mod grid;
pub mod state;
pub mod surface;
pub mod toast;

use spc_core::{DragEngine, ShellConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub(crate) type Shell = spc_core::Shell<state::LocalStore>;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let document = dom::document();
    if document.ready_state() == "loading" {
        let cb = Closure::once(move |_: web_sys::Event| {
            if let Err(err) = init() {
                gloo_console::error!("dashboard init failed:", err);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())?;
        cb.forget();
        Ok(())
    } else {
        init()
    }
}

/// Optional JSON settings from `<script id="spc-config" type="application/json">`.
fn load_config() -> ShellConfig {
    let Some(raw) = dom::by_id("spc-config").and_then(|el| el.text_content()) else {
        return ShellConfig::default();
    };
    match ShellConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::warn!(format!("{:#}, using defaults", err));
            ShellConfig::default()
        }
    }
}

/// Main initialisation sequence.
fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind();
    let config = load_config();

    // Snapshot the markup's avatar before a saved profile overwrites it
    let placeholder = els.placeholder_avatar();
    let mut shell = Shell::new(state::LocalStore, config, placeholder, els.layout());
    let startup = shell.startup();

    let app = Rc::new(state::App {
        surface: RefCell::new(surface::DomSurface::new(els.clone())),
        grid: els.grid.clone().map(|g| RefCell::new(grid::DomGrid::new(g))),
        toasts: toast::ensure_root().ok(),
        drag: RefCell::new(DragEngine::new()),
        shell: RefCell::new(shell),
        els,
    });

    events::dispatch(&app, &startup);

    // Persisted card order goes in before any drag handling
    if let Some(grid) = &app.grid {
        app.shell.borrow().restore_cards(&mut *grid.borrow_mut());
    }
    events::bind_events(&app)?;

    state::install(app);
    Ok(())
}
