//! Transient notifications.
//!
//! The fade itself is CSS; this only adds `.show` on the next frame, removes
//! it after the requested duration and drops the node once faded out.

use crate::dom;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Element;

const FADE_OUT_MS: u32 = 250;

/// `#toasts`, created and appended to `<body>` when the markup lacks it.
pub fn ensure_root() -> Result<Element, JsValue> {
    if let Some(root) = dom::by_id("toasts") {
        return Ok(root);
    }
    let root = dom::create_element("div")?;
    root.set_id("toasts");
    root.set_class_name("toasts");
    if let Some(body) = dom::document().body() {
        body.append_child(&root)?;
    }
    Ok(root)
}

pub fn show(root: &Element, message: &str, duration_ms: u32) {
    let el = match dom::create_element("div") {
        Ok(el) => el,
        Err(err) => {
            gloo_console::warn!("toast dropped:", err);
            return;
        }
    };
    el.set_class_name("toast");
    dom::set_text(&el, message);
    if root.append_child(&el).is_err() {
        return;
    }

    let shown = el.clone();
    Timeout::new(0, move || dom::add_class(&shown, "show")).forget();

    Timeout::new(duration_ms, move || {
        dom::remove_class(&el, "show");
        Timeout::new(FADE_OUT_MS, move || el.remove()).forget();
    })
    .forget();
}
