//! DOM element bindings.
//!
//! All fields are resolved once at startup. Every element is optional: a
//! page missing one simply loses the behaviour attached to it.

use spc_core::Layout;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(nl) => collect_elements(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value()
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn set_display(el: &Element, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", value);
    }
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document().create_element(tag)
}

// ── Elements struct ──

/// All DOM element references used by the shell.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone, Default)]
pub struct Elements {
    // Layout
    pub app: Option<Element>,
    pub sidebar: Option<Element>,
    pub collapse_btn: Option<Element>,
    pub theme_toggle: Option<Element>,
    pub nav_items: Vec<Element>,
    pub sections: Vec<Element>,

    // Header
    pub header_name: Option<Element>,
    pub header_role: Option<Element>,
    pub header_avatar: Option<HtmlImageElement>,

    // Profile popup
    pub profile_btn: Option<Element>,
    pub profile_popup: Option<Element>,
    pub close_popup: Option<Element>,
    pub avatar_input: Option<HtmlInputElement>,
    pub popup_avatar: Option<HtmlImageElement>,
    pub remove_avatar_btn: Option<Element>,
    pub save_profile_btn: Option<Element>,
    pub cancel_profile_btn: Option<Element>,
    pub name_input: Option<HtmlInputElement>,
    pub email_input: Option<HtmlInputElement>,

    // Cards
    pub grid: Option<Element>,

    // Demo buttons
    pub add_record_btn: Option<Element>,
    pub export_csv_btn: Option<Element>,
}

impl Elements {
    /// Resolve all DOM references. Call once the document has been parsed.
    pub fn bind() -> Elements {
        Elements {
            app: by_id("app"),
            sidebar: by_id("sidebar"),
            collapse_btn: by_id("collapseBtn"),
            theme_toggle: by_id("themeToggle"),
            nav_items: query_all(".nav-item"),
            sections: query_all("main .content"),

            header_name: by_id("headerName"),
            header_role: by_id("headerRole"),
            header_avatar: query(".profile .avatar").and_then(|e| e.dyn_into().ok()),

            profile_btn: by_id("profileBtn"),
            profile_popup: by_id("profilePopup"),
            close_popup: by_id("closePopup"),
            avatar_input: by_id_typed("avatarInput"),
            popup_avatar: by_id_typed("popupAvatar"),
            remove_avatar_btn: by_id("removeAvatar"),
            save_profile_btn: by_id("saveProfile"),
            cancel_profile_btn: by_id("cancelProfile"),
            name_input: by_id_typed("inpName"),
            email_input: by_id_typed("inpEmail"),

            grid: by_id("grid"),

            add_record_btn: by_id("addScammerBtn"),
            export_csv_btn: by_id("exportCSV"),
        }
    }

    /// The markup's built-in avatar, captured before any saved profile is painted.
    pub fn placeholder_avatar(&self) -> String {
        self.header_avatar
            .as_ref()
            .map(HtmlImageElement::src)
            .unwrap_or_default()
    }

    pub fn layout(&self) -> Layout {
        Layout {
            sections: self.sections.iter().map(Element::id).collect(),
            nav_targets: self
                .nav_items
                .iter()
                .map(|item| item.get_attribute("data-target"))
                .collect(),
        }
    }
}
