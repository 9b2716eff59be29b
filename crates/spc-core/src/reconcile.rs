//! State-to-DOM reconciliation.
//!
//! Each function turns one piece of state into a list of [`Patch`]es. The
//! lists are absolute (no "toggle"), so applying one twice leaves the page as
//! applying it once. A [`Surface`] applies patches to whatever is rendering.

use spc_types::{Profile, SidebarState, ThemeState};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;

pub const THEME_DARK_CLASS: &str = "theme-dark";
pub const COLLAPSED_CLASS: &str = "collapsed";
pub const BODY_COLLAPSED_CLASS: &str = "sidebar-collapsed";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    AppRoot,
    Body,
    Sidebar,
    ThemeToggle,
    HeaderName,
    HeaderRole,
    HeaderAvatar,
    PopupAvatar,
    NameInput,
    EmailInput,
    ProfilePopup,
    /// Content section, by position among the page's sections.
    Section(usize),
    /// Navigation entry, by position among the page's nav items.
    NavItem(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Flex => "flex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Class { name: &'static str, present: bool },
    Text(String),
    Attribute { name: &'static str, value: String },
    ImageSource(String),
    Value(String),
    Display(Display),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub target: Target,
    pub mutation: Mutation,
}

impl Patch {
    pub fn new(target: Target, mutation: Mutation) -> Self {
        Self { target, mutation }
    }

    fn class(target: Target, name: &'static str, present: bool) -> Self {
        Self::new(target, Mutation::Class { name, present })
    }

    fn attribute(target: Target, name: &'static str, value: impl Into<String>) -> Self {
        Self::new(
            target,
            Mutation::Attribute {
                name,
                value: value.into(),
            },
        )
    }
}

/// The toggle names the action it will perform next, not the current theme.
pub fn theme(theme: ThemeState) -> Vec<Patch> {
    let dark = theme.is_dark();
    let label = if dark { "Light Mode" } else { "Dark Mode" };
    vec![
        Patch::class(Target::AppRoot, THEME_DARK_CLASS, dark),
        Patch::new(Target::ThemeToggle, Mutation::Text(label.to_owned())),
        Patch::attribute(Target::ThemeToggle, "aria-pressed", dark.to_string()),
    ]
}

pub fn sidebar(state: SidebarState) -> Vec<Patch> {
    vec![
        Patch::class(Target::Sidebar, COLLAPSED_CLASS, state.collapsed),
        Patch::class(Target::Body, BODY_COLLAPSED_CLASS, state.collapsed),
    ]
}

/// Empty name or avatar leaves what the markup already shows.
pub fn profile(profile: &Profile, role_label: &str) -> Vec<Patch> {
    let mut patches = Vec::with_capacity(6);
    if !profile.name.is_empty() {
        patches.push(Patch::new(
            Target::HeaderName,
            Mutation::Text(profile.name.clone()),
        ));
    }
    patches.push(Patch::new(
        Target::HeaderRole,
        Mutation::Text(role_label.to_owned()),
    ));
    if !profile.avatar.is_empty() {
        patches.extend(avatar(&profile.avatar));
    }
    patches.push(Patch::new(
        Target::NameInput,
        Mutation::Value(profile.name.clone()),
    ));
    patches.push(Patch::new(
        Target::EmailInput,
        Mutation::Value(profile.email.clone()),
    ));
    patches
}

pub fn avatar(src: &str) -> Vec<Patch> {
    vec![
        Patch::new(Target::HeaderAvatar, Mutation::ImageSource(src.to_owned())),
        Patch::new(Target::PopupAvatar, Mutation::ImageSource(src.to_owned())),
    ]
}

pub fn profile_popup(open: bool) -> Vec<Patch> {
    let display = if open { Display::Flex } else { Display::None };
    vec![
        Patch::new(Target::ProfilePopup, Mutation::Display(display)),
        Patch::attribute(Target::ProfilePopup, "aria-hidden", (!open).to_string()),
    ]
}

/// Highlights only the `clicked` nav item and hides every content section
/// except `shown`. With `shown` of `None` all sections end up hidden.
pub fn sections(
    clicked: usize,
    nav_count: usize,
    shown: Option<usize>,
    section_count: usize,
) -> Vec<Patch> {
    let mut patches = Vec::with_capacity(nav_count + section_count);
    for index in 0..nav_count {
        patches.push(Patch::class(
            Target::NavItem(index),
            ACTIVE_CLASS,
            index == clicked,
        ));
    }
    for index in 0..section_count {
        let display = if Some(index) == shown {
            Display::Block
        } else {
            Display::None
        };
        patches.push(Patch::new(Target::Section(index), Mutation::Display(display)));
    }
    patches
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no element for {0:?}")]
pub struct MissingTarget(pub Target);

pub trait Surface {
    fn apply(&mut self, patch: &Patch) -> Result<(), MissingTarget>;
}

/// Applies every patch, skipping those whose target is missing. Returns how
/// many were applied.
pub fn apply_all<S>(surface: &mut S, patches: &[Patch]) -> usize
where
    S: Surface + ?Sized,
{
    let mut applied = 0;
    for patch in patches {
        match surface.apply(patch) {
            Ok(()) => applied += 1,
            Err(err) => debug!("skipping patch: {}", err),
        }
    }
    applied
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub src: String,
    pub value: String,
    pub display: Option<Display>,
}

impl ElementState {
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Headless surface holding only the targets it was created with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    elements: HashMap<Target, ElementState>,
}

impl MemorySurface {
    pub fn with_targets<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = Target>,
    {
        Self {
            elements: targets
                .into_iter()
                .map(|target| (target, ElementState::default()))
                .collect(),
        }
    }

    /// Surface carrying every fixed target plus `count` sections and as many nav entries.
    pub fn full(count: usize) -> Self {
        let mut targets = vec![
            Target::AppRoot,
            Target::Body,
            Target::Sidebar,
            Target::ThemeToggle,
            Target::HeaderName,
            Target::HeaderRole,
            Target::HeaderAvatar,
            Target::PopupAvatar,
            Target::NameInput,
            Target::EmailInput,
            Target::ProfilePopup,
        ];
        for index in 0..count {
            targets.push(Target::Section(index));
            targets.push(Target::NavItem(index));
        }
        Self::with_targets(targets)
    }

    pub fn element(&self, target: &Target) -> Option<&ElementState> {
        self.elements.get(target)
    }
}

impl Surface for MemorySurface {
    fn apply(&mut self, patch: &Patch) -> Result<(), MissingTarget> {
        let element = self
            .elements
            .get_mut(&patch.target)
            .ok_or_else(|| MissingTarget(patch.target.clone()))?;
        match &patch.mutation {
            Mutation::Class { name, present } => {
                if *present {
                    element.classes.insert((*name).to_owned());
                } else {
                    element.classes.remove(*name);
                }
            }
            Mutation::Text(text) => element.text = text.clone(),
            Mutation::Attribute { name, value } => {
                element
                    .attributes
                    .insert((*name).to_owned(), value.clone());
            }
            Mutation::ImageSource(src) => element.src = src.clone(),
            Mutation::Value(value) => element.value = value.clone(),
            Mutation::Display(display) => element.display = Some(*display),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            avatar: "data:image/png;base64,AAAA".to_owned(),
        }
    }

    #[test]
    fn dark_theme_labels_toggle_with_next_action() {
        let mut surface = MemorySurface::full(0);
        apply_all(&mut surface, &theme(ThemeState::Dark));

        assert!(surface.element(&Target::AppRoot).unwrap().has_class(THEME_DARK_CLASS));
        let toggle = surface.element(&Target::ThemeToggle).unwrap();
        assert_eq!(toggle.text, "Light Mode");
        assert_eq!(toggle.attribute("aria-pressed"), Some("true"));

        apply_all(&mut surface, &theme(ThemeState::Light));
        assert!(!surface.element(&Target::AppRoot).unwrap().has_class(THEME_DARK_CLASS));
        let toggle = surface.element(&Target::ThemeToggle).unwrap();
        assert_eq!(toggle.text, "Dark Mode");
        assert_eq!(toggle.attribute("aria-pressed"), Some("false"));
    }

    #[test]
    fn sidebar_marks_sidebar_and_body() {
        let mut surface = MemorySurface::full(0);
        apply_all(&mut surface, &sidebar(SidebarState::new(true)));
        assert!(surface.element(&Target::Sidebar).unwrap().has_class(COLLAPSED_CLASS));
        assert!(surface.element(&Target::Body).unwrap().has_class(BODY_COLLAPSED_CLASS));
    }

    #[test]
    fn reconciling_twice_matches_reconciling_once() {
        let user = sample_profile();
        let patches: Vec<Patch> = theme(ThemeState::Dark)
            .into_iter()
            .chain(sidebar(SidebarState::new(true)))
            .chain(profile(&user, "Main Owner"))
            .chain(sections(1, 2, Some(1), 2))
            .collect();

        let mut once = MemorySurface::full(2);
        apply_all(&mut once, &patches);
        let mut twice = once.clone();
        apply_all(&mut twice, &patches);

        assert_eq!(once, twice);
    }

    #[test]
    fn profile_fills_header_images_and_form() {
        let mut surface = MemorySurface::full(0);
        apply_all(&mut surface, &profile(&sample_profile(), "Main Owner"));

        assert_eq!(surface.element(&Target::HeaderName).unwrap().text, "Ada");
        assert_eq!(surface.element(&Target::HeaderRole).unwrap().text, "Main Owner");
        assert_eq!(
            surface.element(&Target::HeaderAvatar).unwrap().src,
            "data:image/png;base64,AAAA"
        );
        assert_eq!(
            surface.element(&Target::PopupAvatar).unwrap().src,
            "data:image/png;base64,AAAA"
        );
        assert_eq!(surface.element(&Target::NameInput).unwrap().value, "Ada");
        assert_eq!(
            surface.element(&Target::EmailInput).unwrap().value,
            "ada@example.com"
        );
    }

    #[test]
    fn empty_name_and_avatar_keep_existing_markup() {
        let patches = profile(&Profile::default(), "Main Owner");
        assert!(patches.iter().all(|p| p.target != Target::HeaderName));
        assert!(patches.iter().all(|p| p.target != Target::HeaderAvatar));
        assert!(patches.contains(&Patch::new(
            Target::NameInput,
            Mutation::Value(String::new())
        )));
    }

    #[test]
    fn missing_targets_are_skipped() {
        let mut surface = MemorySurface::with_targets([Target::HeaderRole]);
        let applied = apply_all(&mut surface, &profile(&sample_profile(), "Main Owner"));

        assert_eq!(applied, 1);
        assert_eq!(surface.element(&Target::HeaderRole).unwrap().text, "Main Owner");
        assert_eq!(
            surface.apply(&Patch::new(Target::Sidebar, Mutation::Text("x".into()))),
            Err(MissingTarget(Target::Sidebar))
        );
    }

    #[test]
    fn sections_show_exactly_one() {
        let mut surface = MemorySurface::full(3);
        apply_all(&mut surface, &sections(1, 3, Some(1), 3));

        let display = |index| surface.element(&Target::Section(index)).unwrap().display;
        assert_eq!(display(0), Some(Display::None));
        assert_eq!(display(1), Some(Display::Block));
        assert_eq!(display(2), Some(Display::None));

        let active = |index| {
            surface
                .element(&Target::NavItem(index))
                .unwrap()
                .has_class(ACTIVE_CLASS)
        };
        assert!(!active(0));
        assert!(active(1));
        assert!(!active(2));
    }

    #[test]
    fn popup_visibility_sets_display_and_aria() {
        let mut surface = MemorySurface::full(0);
        apply_all(&mut surface, &profile_popup(true));
        let popup = surface.element(&Target::ProfilePopup).unwrap();
        assert_eq!(popup.display, Some(Display::Flex));
        assert_eq!(popup.attribute("aria-hidden"), Some("false"));

        apply_all(&mut surface, &profile_popup(false));
        let popup = surface.element(&Target::ProfilePopup).unwrap();
        assert_eq!(popup.display, Some(Display::None));
        assert_eq!(popup.attribute("aria-hidden"), Some("true"));
    }
}
