//! The `#grid` container as a [`CardGrid`].

use crate::dom;
use spc_core::CardGrid;
use spc_core::drag::DRAGGING_CLASS;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget};

const CARD_SELECTOR: &str = ".card";

pub struct DomGrid {
    container: Element,
}

impl DomGrid {
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// The card an event fired on, if it fired inside one of this grid's cards.
    pub fn card_for(&self, target: Option<EventTarget>) -> Option<Element> {
        let el = target?.dyn_into::<Element>().ok()?;
        let card = el.closest(CARD_SELECTOR).ok()??;
        self.container.contains(Some(card.as_ref())).then_some(card)
    }
}

impl CardGrid for DomGrid {
    type Card = Element;

    fn cards(&self) -> Vec<Element> {
        dom::query_all_within(&self.container, CARD_SELECTOR)
    }

    fn card_id(&self, card: &Element) -> String {
        card.id()
    }

    fn midpoint_y(&self, card: &Element) -> f64 {
        let rect = card.get_bounding_client_rect();
        rect.top() + rect.height() / 2.0
    }

    fn append(&mut self, card: &Element) {
        let _ = self.container.append_child(card);
    }

    fn insert_before(&mut self, card: &Element, anchor: &Element) {
        let _ = self.container.insert_before(card, Some(anchor.as_ref()));
    }

    fn set_dragging(&mut self, card: &Element, dragging: bool) {
        dom::toggle_class(card, DRAGGING_CLASS, dragging);
    }
}
