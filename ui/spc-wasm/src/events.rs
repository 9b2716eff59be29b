//! Event binding.
//!
//! Translates DOM events into shell commands and carries out the effects
//! they return. Elements missing from the page get no listener.

use crate::dom;
use crate::state::App;
use crate::toast;
use gloo_timers::callback::Timeout;
use spc_core::reconcile;
use spc_core::{DemoAction, Effect, Patch, ProfileForm, Target};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, EventTarget, HtmlElement, KeyboardEvent};

/// Helper: attach a listener to an event target.
macro_rules! listen {
    ($target:expr, $event:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(Event)>);
        $target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach a click handler running a shell command.
macro_rules! on_click {
    ($el:expr, $app:expr, $command:expr) => {{
        if let Some(el) = &$el {
            let app = $app.clone();
            listen!(el, "click", move |_: Event| {
                let effects = $command(&mut *app.shell.borrow_mut());
                dispatch(&app, &effects);
            });
        }
    }};
}

/// Carry out the effects returned by a shell command.
pub fn dispatch(app: &App, effects: &[Effect]) {
    let patches: Vec<Patch> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Patch(patch) => Some(patch.clone()),
            _ => None,
        })
        .collect();
    reconcile::apply_all(&mut *app.surface.borrow_mut(), &patches);

    for effect in effects {
        match effect {
            Effect::Patch(_) => {}
            Effect::Toast {
                message,
                duration_ms,
            } => {
                if let Some(root) = &app.toasts {
                    toast::show(root, message, *duration_ms);
                }
            }
            Effect::Focus { target, delay_ms } => focus(app, target, *delay_ms),
        }
    }
}

fn focus(app: &App, target: &Target, delay_ms: u32) {
    let input = match target {
        Target::NameInput => app.els.name_input.clone(),
        Target::EmailInput => app.els.email_input.clone(),
        _ => None,
    };
    let Some(input) = input else {
        return;
    };
    if delay_ms == 0 {
        let _ = input.focus();
    } else {
        Timeout::new(delay_ms, move || {
            let _ = input.focus();
        })
        .forget();
    }
}

/// Bind all UI event listeners. Call once after startup painting.
pub fn bind_events(app: &Rc<App>) -> Result<(), JsValue> {
    let els = &app.els;

    // ── Theme / sidebar ──
    on_click!(els.theme_toggle, app, |shell: &mut crate::Shell| shell.toggle_theme());
    if els.sidebar.is_some() {
        on_click!(els.collapse_btn, app, |shell: &mut crate::Shell| shell.toggle_sidebar());
    }

    // ── Profile popup ──
    on_click!(els.profile_btn, app, |shell: &mut crate::Shell| shell.open_profile_popup());
    on_click!(els.close_popup, app, |shell: &mut crate::Shell| shell.close_profile_popup());
    on_click!(els.cancel_profile_btn, app, |shell: &mut crate::Shell| {
        shell.close_profile_popup()
    });
    on_click!(els.remove_avatar_btn, app, |shell: &mut crate::Shell| shell.remove_avatar());

    {
        let app2 = app.clone();
        listen!(dom::document(), "keydown", move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let effects = app2.shell.borrow_mut().key_down(&key);
            dispatch(&app2, &effects);
        });
    }

    if let Some(popup) = &els.profile_popup {
        let app2 = app.clone();
        let backdrop: EventTarget = popup.clone().into();
        listen!(popup, "click", move |e: Event| {
            let on_backdrop = e.target().as_ref() == Some(&backdrop);
            let effects = app2.shell.borrow_mut().popup_click(on_backdrop);
            dispatch(&app2, &effects);
        });
    }

    if let Some(save) = &els.save_profile_btn {
        let app2 = app.clone();
        listen!(save, "click", move |_: Event| {
            let form = ProfileForm {
                name: app2
                    .els
                    .name_input
                    .as_ref()
                    .map(dom::get_input_value)
                    .unwrap_or_default(),
                email: app2
                    .els
                    .email_input
                    .as_ref()
                    .map(dom::get_input_value)
                    .unwrap_or_default(),
            };
            let effects = app2.shell.borrow_mut().save_profile(&form);
            dispatch(&app2, &effects);
        });
    }

    if let Some(input) = &els.avatar_input {
        let app2 = app.clone();
        let input2 = input.clone();
        listen!(input, "change", move |_: Event| {
            if let Err(err) = read_avatar(&app2, &input2) {
                gloo_console::warn!("avatar upload failed:", err);
            }
        });
    }

    // ── Sections ──
    for (index, item) in els.nav_items.iter().enumerate() {
        let app2 = app.clone();
        listen!(item, "click", move |_: Event| {
            let effects = app2.shell.borrow_mut().switch_section(index);
            dispatch(&app2, &effects);
        });
    }

    // ── Demo stubs ──
    on_click!(els.add_record_btn, app, |shell: &mut crate::Shell| {
        shell.demo(DemoAction::AddRecord)
    });
    on_click!(els.export_csv_btn, app, |shell: &mut crate::Shell| {
        shell.demo(DemoAction::ExportCsv)
    });

    bind_drag(app)?;
    Ok(())
}

/// Read the first selected file as a data URL and store it as the avatar.
fn read_avatar(app: &Rc<App>, input: &web_sys::HtmlInputElement) -> Result<(), JsValue> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };
    let reader = web_sys::FileReader::new()?;
    let reader2 = reader.clone();
    let app2 = app.clone();
    let onload = Closure::once(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = reader2.result().ok().and_then(|r| r.as_string()) else {
            return;
        };
        let effects = app2.shell.borrow_mut().set_avatar(&data_url);
        dispatch(&app2, &effects);
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    reader.read_as_data_url(&file)
}

/// Wire drag start / over / end on the card grid. No grid, no dragging.
fn bind_drag(app: &Rc<App>) -> Result<(), JsValue> {
    let Some(grid) = &app.grid else {
        return Ok(());
    };
    let container = grid.borrow().container().clone();

    {
        let app2 = app.clone();
        listen!(container, "dragstart", move |e: Event| {
            let Some(grid) = &app2.grid else {
                return;
            };
            let Some(card) = grid.borrow().card_for(e.target()) else {
                return;
            };
            app2.drag.borrow_mut().start(&mut *grid.borrow_mut(), card);
            if let Some(transfer) = e.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
                transfer.set_effect_allowed("move");
            }
        });
    }
    {
        let app2 = app.clone();
        listen!(container, "dragover", move |e: Event| {
            e.prevent_default();
            let (Some(grid), Some(drag)) = (&app2.grid, e.dyn_ref::<DragEvent>()) else {
                return;
            };
            let pointer_y = f64::from(drag.client_y());
            app2.drag
                .borrow_mut()
                .drag_over(&mut *grid.borrow_mut(), pointer_y);
        });
    }
    {
        let app2 = app.clone();
        listen!(container, "dragend", move |_: Event| {
            let Some(grid) = &app2.grid else {
                return;
            };
            app2.shell
                .borrow()
                .finish_drag(&mut *app2.drag.borrow_mut(), &mut *grid.borrow_mut());
        });
    }

    // Cards must be draggable for dragstart to fire.
    for card in dom::query_all_within(&container, ".card") {
        if let Some(html) = card.dyn_ref::<HtmlElement>() {
            html.set_draggable(true);
        }
    }
    Ok(())
}
