//! Shell controller.
//!
//! One method per user command. Each returns the [`Effect`]s the UI layer
//! must carry out; nothing here touches a rendering surface directly.

use crate::config::ShellConfig;
use crate::drag::{self, CardGrid, DragEngine};
use crate::reconcile::{self, Patch, Target};
use spc_storage::{CardOrderRepository, KeyValueStore, StateContext};
use spc_types::{CardOrder, SidebarState, ThemeState};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Patch(Patch),
    Toast { message: String, duration_ms: u32 },
    Focus { target: Target, delay_ms: u32 },
}

/// Content sections and nav items found in the markup at startup, in
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Section element ids, empty for a section without one.
    pub sections: Vec<String>,
    /// Each nav item's `data-target`.
    pub nav_targets: Vec<Option<String>>,
}

impl Layout {
    fn section_index(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        self.sections.iter().position(|section| section == id)
    }

    fn section_id(&self, index: Option<usize>) -> Option<String> {
        index.and_then(|index| self.sections.get(index).cloned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name required")]
    NameRequired,
    #[error("Email required")]
    EmailRequired,
}

impl ValidationError {
    pub fn field(self) -> Target {
        match self {
            ValidationError::NameRequired => Target::NameInput,
            ValidationError::EmailRequired => Target::EmailInput,
        }
    }
}

impl ProfileForm {
    /// Trims both fields; name is checked before email.
    pub fn validate(&self) -> Result<ProfileForm, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        Ok(ProfileForm {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    AddRecord,
    ExportCsv,
}

impl DemoAction {
    fn message(self) -> &'static str {
        match self {
            DemoAction::AddRecord => "Demo: Add Scammer (connect backend to save)",
            DemoAction::ExportCsv => "Demo: Export CSV (not implemented)",
        }
    }
}

/// What is currently painted. Toggles flip this rather than re-reading
/// storage, so they keep working when writes are being dropped.
#[derive(Debug, Clone, Copy, Default)]
struct Painted {
    theme: ThemeState,
    sidebar: SidebarState,
}

pub struct Shell<S> {
    ctx: StateContext<S>,
    config: ShellConfig,
    layout: Layout,
    painted: Painted,
    popup_open: bool,
    active_section: Option<String>,
}

impl<S: KeyValueStore> Shell<S> {
    /// `default_avatar` is the placeholder image the markup ships with; it is
    /// captured once and reused whenever the user removes their avatar.
    pub fn new(
        store: S,
        config: ShellConfig,
        default_avatar: impl Into<String>,
        layout: Layout,
    ) -> Self {
        let default_profile = config.default_profile(default_avatar);
        Self {
            ctx: StateContext::new(store, config.keys.clone(), default_profile),
            config,
            layout,
            painted: Painted::default(),
            popup_open: false,
            active_section: None,
        }
    }

    pub fn context(&self) -> &StateContext<S> {
        &self.ctx
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn card_order(&self) -> CardOrderRepository<'_, S> {
        self.ctx.card_order()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn theme(&self) -> ThemeState {
        self.painted.theme
    }

    pub fn sidebar(&self) -> SidebarState {
        self.painted.sidebar
    }

    /// Loads every piece of state and paints it, then shows the default section.
    pub fn startup(&mut self) -> Vec<Effect> {
        self.painted = Painted {
            theme: self.ctx.theme().load(),
            sidebar: self.ctx.sidebar().load(),
        };
        let profile = self.ctx.profile().load();

        let mut patches = reconcile::theme(self.painted.theme);
        patches.extend(reconcile::sidebar(self.painted.sidebar));
        patches.extend(reconcile::profile(&profile, &self.config.role_label));

        let shown = self.layout.section_index(&self.config.default_section);
        if let Some(index) = shown {
            patches.push(Patch::new(
                Target::Section(index),
                reconcile::Mutation::Display(reconcile::Display::Block),
            ));
        }
        self.active_section = self.layout.section_id(shown);
        patches_to_effects(patches)
    }

    /// Puts persisted cards in their saved order. Call before any drag.
    pub fn restore_cards<G: CardGrid>(&self, grid: &mut G) -> CardOrder {
        let order = self.ctx.card_order().load();
        drag::restore_order(grid, &order);
        order
    }

    /// Finishes a drag gesture and persists the resulting order.
    pub fn finish_drag<G: CardGrid>(
        &self,
        engine: &mut DragEngine<G::Card>,
        grid: &mut G,
    ) -> CardOrder {
        engine.end(grid, &self.ctx.card_order())
    }

    pub fn toggle_theme(&mut self) -> Vec<Effect> {
        let theme = self.painted.theme.toggled();
        self.painted.theme = theme;
        self.ctx.theme().save(&theme);

        let mut effects = patches_to_effects(reconcile::theme(theme));
        let message = if theme.is_dark() {
            "Dark mode enabled"
        } else {
            "Light mode enabled"
        };
        effects.push(self.toast(message, self.config.toast.confirmation_ms));
        effects
    }

    pub fn toggle_sidebar(&mut self) -> Vec<Effect> {
        let sidebar = self.painted.sidebar.toggled();
        self.painted.sidebar = sidebar;
        self.ctx.sidebar().save(&sidebar);
        patches_to_effects(reconcile::sidebar(sidebar))
    }

    pub fn open_profile_popup(&mut self) -> Vec<Effect> {
        self.popup_open = true;
        let mut effects = patches_to_effects(reconcile::profile_popup(true));
        effects.push(Effect::Focus {
            target: Target::NameInput,
            delay_ms: self.config.focus_delay_ms,
        });
        effects
    }

    pub fn close_profile_popup(&mut self) -> Vec<Effect> {
        self.popup_open = false;
        patches_to_effects(reconcile::profile_popup(false))
    }

    pub fn key_down(&mut self, key: &str) -> Vec<Effect> {
        if key == "Escape" {
            self.close_profile_popup()
        } else {
            Vec::new()
        }
    }

    /// Click inside the popup. Only a click on the backdrop itself closes it.
    pub fn popup_click(&mut self, on_backdrop: bool) -> Vec<Effect> {
        if on_backdrop {
            self.close_profile_popup()
        } else {
            Vec::new()
        }
    }

    /// Validates and saves the edit form. On failure the stored profile is
    /// untouched, the popup stays open and the offending field gets focus.
    pub fn save_profile(&mut self, form: &ProfileForm) -> Vec<Effect> {
        let form = match form.validate() {
            Ok(form) => form,
            Err(err) => {
                debug!("profile not saved: {}", err);
                return vec![
                    self.toast(&err.to_string(), self.config.toast.validation_ms),
                    Effect::Focus {
                        target: err.field(),
                        delay_ms: 0,
                    },
                ];
            }
        };

        let repo = self.ctx.profile();
        let mut profile = repo.load();
        profile.name = form.name;
        profile.email = form.email;
        repo.save(&profile);

        let mut effects = patches_to_effects(reconcile::profile(&profile, &self.config.role_label));
        effects.extend(self.close_profile_popup());
        effects.push(self.toast("Profile saved", self.config.toast.confirmation_ms));
        effects
    }

    /// Stores an uploaded avatar, already converted to a data URL.
    pub fn set_avatar(&mut self, data_url: &str) -> Vec<Effect> {
        self.replace_avatar(data_url.to_owned(), "Profile picture updated")
    }

    pub fn remove_avatar(&mut self) -> Vec<Effect> {
        let avatar = self.ctx.default_avatar().to_owned();
        self.replace_avatar(avatar, "Profile picture removed")
    }

    fn replace_avatar(&mut self, avatar: String, message: &str) -> Vec<Effect> {
        let mut effects = patches_to_effects(reconcile::avatar(&avatar));
        let repo = self.ctx.profile();
        let mut profile = repo.load();
        profile.avatar = avatar;
        repo.save(&profile);
        effects.push(self.toast(message, self.config.toast.confirmation_ms));
        effects
    }

    /// Click on the nav item at `nav_index`. That item alone becomes active
    /// and its target section is shown, or the default section when the item
    /// has no target or the target does not exist.
    pub fn switch_section(&mut self, nav_index: usize) -> Vec<Effect> {
        let layout = &self.layout;
        let shown = layout
            .nav_targets
            .get(nav_index)
            .and_then(|target| target.as_deref())
            .and_then(|target| layout.section_index(target))
            .or_else(|| layout.section_index(&self.config.default_section));
        let patches = reconcile::sections(
            nav_index,
            layout.nav_targets.len(),
            shown,
            layout.sections.len(),
        );
        self.active_section = layout.section_id(shown);
        patches_to_effects(patches)
    }

    pub fn demo(&self, action: DemoAction) -> Vec<Effect> {
        vec![self.toast(action.message(), self.config.toast.demo_ms)]
    }

    pub fn toast(&self, message: &str, duration_ms: u32) -> Effect {
        Effect::Toast {
            message: message.to_owned(),
            duration_ms,
        }
    }
}

fn patches_to_effects(patches: Vec<Patch>) -> Vec<Effect> {
    patches.into_iter().map(Effect::Patch).collect()
}
