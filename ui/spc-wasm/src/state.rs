//! Application state held by the browser adapter.
//!
//! The shell, drag engine and grid live in one [`App`] shared by every event
//! closure through `Rc`. WASM is single-threaded, so interior mutability is
//! plain `RefCell`. A thread-local handle is kept only for the debug export.

use crate::dom::Elements;
use crate::grid::DomGrid;
use crate::surface::DomSurface;
use spc_core::{DragEngine, Shell};
use spc_storage::{KeyValueStore, StoreError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::Element;

pub struct App {
    pub els: Elements,
    pub shell: RefCell<Shell<LocalStore>>,
    pub surface: RefCell<DomSurface>,
    pub grid: Option<RefCell<DomGrid>>,
    pub drag: RefCell<DragEngine<Element>>,
    pub toasts: Option<Element>,
}

// ── Thread-local handle ──

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

pub fn install(app: Rc<App>) {
    APP.with(|a| *a.borrow_mut() = Some(app));
}

pub fn app() -> Option<Rc<App>> {
    APP.with(|a| a.borrow().clone())
}

// ── localStorage ──

/// `window.localStorage`. Disabled storage, quota errors and privacy-mode
/// exceptions all come back as [`StoreError::Unavailable`].
#[derive(Debug, Default)]
pub struct LocalStore;

fn storage(key: &str) -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::unavailable(key, "no window"))?;
    window
        .local_storage()
        .map_err(|err| StoreError::unavailable(key, describe(&err)))?
        .ok_or_else(|| StoreError::unavailable(key, "localStorage disabled"))
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        storage(key)?
            .get_item(key)
            .map_err(|err| StoreError::unavailable(key, describe(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        storage(key)?
            .set_item(key, value)
            .map_err(|err| StoreError::unavailable(key, describe(&err)))
    }
}
