//! Applies reconciler patches to the live document.

use crate::dom::{self, Elements};
use spc_core::{MissingTarget, Mutation, Patch, Surface, Target};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, HtmlInputElement};

pub struct DomSurface {
    els: Elements,
}

impl DomSurface {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }

    fn element(&self, target: &Target) -> Option<Element> {
        let els = &self.els;
        match target {
            Target::AppRoot => els.app.clone(),
            Target::Body => dom::document().body().map(Element::from),
            Target::Sidebar => els.sidebar.clone(),
            Target::ThemeToggle => els.theme_toggle.clone(),
            Target::HeaderName => els.header_name.clone(),
            Target::HeaderRole => els.header_role.clone(),
            Target::HeaderAvatar => els.header_avatar.clone().map(Element::from),
            Target::PopupAvatar => els.popup_avatar.clone().map(Element::from),
            Target::NameInput => els.name_input.clone().map(Element::from),
            Target::EmailInput => els.email_input.clone().map(Element::from),
            Target::ProfilePopup => els.profile_popup.clone(),
            Target::Section(index) => els.sections.get(*index).cloned(),
            Target::NavItem(index) => els.nav_items.get(*index).cloned(),
        }
    }
}

impl Surface for DomSurface {
    fn apply(&mut self, patch: &Patch) -> Result<(), MissingTarget> {
        let missing = || MissingTarget(patch.target.clone());
        let el = self.element(&patch.target).ok_or_else(missing)?;
        match &patch.mutation {
            Mutation::Class { name, present } => dom::toggle_class(&el, name, *present),
            Mutation::Text(text) => dom::set_text(&el, text),
            Mutation::Attribute { name, value } => {
                let _ = el.set_attribute(name, value);
            }
            Mutation::ImageSource(src) => match el.dyn_ref::<HtmlImageElement>() {
                Some(img) => img.set_src(src),
                None => {
                    let _ = el.set_attribute("src", src);
                }
            },
            Mutation::Value(value) => {
                let input = el.dyn_ref::<HtmlInputElement>().ok_or_else(missing)?;
                input.set_value(value);
            }
            Mutation::Display(display) => dom::set_display(&el, display.as_css()),
        }
        Ok(())
    }
}
