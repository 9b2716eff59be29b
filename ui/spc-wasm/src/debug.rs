//! Console access to the running shell, e.g. `new SpcDebug().read("spc_theme")`.

use crate::events;
use crate::state::{self, App};
use crate::toast;
use spc_types::Profile;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Default)]
pub struct SpcDebug;

fn running() -> Result<Rc<App>, JsValue> {
    state::app().ok_or_else(|| JsValue::from_str("dashboard not initialised"))
}

#[wasm_bindgen]
impl SpcDebug {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SpcDebug {
        SpcDebug
    }

    /// Raw stored string for `key`.
    pub fn read(&self, key: &str) -> Result<Option<String>, JsValue> {
        let app = running()?;
        let shell = app.shell.borrow();
        Ok(shell.context().adapter().read(key))
    }

    pub fn persist(&self, key: &str, value: &str) -> Result<(), JsValue> {
        let app = running()?;
        app.shell.borrow().context().adapter().write(key, value);
        Ok(())
    }

    #[wasm_bindgen(js_name = loadProfile)]
    pub fn load_profile(&self) -> Result<JsValue, JsValue> {
        let app = running()?;
        let profile = app.shell.borrow().context().profile().load();
        Ok(serde_wasm_bindgen::to_value(&profile)?)
    }

    #[wasm_bindgen(js_name = saveProfile)]
    pub fn save_profile(&self, profile: JsValue) -> Result<(), JsValue> {
        let app = running()?;
        let profile: Profile = serde_wasm_bindgen::from_value(profile)?;
        app.shell.borrow().context().profile().save(&profile);
        Ok(())
    }

    pub fn toast(&self, message: &str, duration_ms: Option<u32>) -> Result<(), JsValue> {
        let app = running()?;
        let duration_ms = duration_ms.unwrap_or(app.shell.borrow().config().toast.default_ms);
        if let Some(root) = &app.toasts {
            toast::show(root, message, duration_ms);
        }
        Ok(())
    }

    /// Persists the grid's current order and returns it.
    #[wasm_bindgen(js_name = saveCardOrder)]
    pub fn save_card_order(&self) -> Result<JsValue, JsValue> {
        let app = running()?;
        let Some(grid) = &app.grid else {
            return Ok(JsValue::NULL);
        };
        let order = app
            .shell
            .borrow()
            .finish_drag(&mut *app.drag.borrow_mut(), &mut *grid.borrow_mut());
        Ok(serde_wasm_bindgen::to_value(&order)?)
    }

    /// Re-applies the persisted order to the grid.
    #[wasm_bindgen(js_name = restoreCardOrder)]
    pub fn restore_card_order(&self) -> Result<(), JsValue> {
        let app = running()?;
        if let Some(grid) = &app.grid {
            app.shell.borrow().restore_cards(&mut *grid.borrow_mut());
        }
        Ok(())
    }

    /// Re-runs startup painting from storage.
    pub fn repaint(&self) -> Result<(), JsValue> {
        let app = running()?;
        let effects = app.shell.borrow_mut().startup();
        events::dispatch(&app, &effects);
        Ok(())
    }
}
