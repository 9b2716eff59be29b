use crate::repo::StateRepository;
use crate::{
    CardOrderRepository, KeyValueStore, ProfileRepository, SidebarRepository, StoreAdapter,
    ThemeRepository,
};
use serde::{Deserialize, Serialize};
use spc_types::{CardOrder, Profile, SidebarState, ThemeState};

/// Storage key names. Changing one orphans whatever was saved under the old name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub sidebar: String,
    pub profile: String,
    pub card_order: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "spc_theme".to_owned(),
            sidebar: "spc_sidebar_collapsed".to_owned(),
            profile: "spc_profile".to_owned(),
            card_order: "spc_cards_order".to_owned(),
        }
    }
}

/// Everything the repositories share: the store, the key names and the
/// default profile captured once at startup.
#[derive(Debug)]
pub struct StateContext<S> {
    adapter: StoreAdapter<S>,
    keys: StorageKeys,
    default_profile: Profile,
}

impl<S: KeyValueStore> StateContext<S> {
    pub fn new(store: S, keys: StorageKeys, default_profile: Profile) -> Self {
        Self {
            adapter: StoreAdapter::new(store),
            keys,
            default_profile,
        }
    }

    pub fn adapter(&self) -> &StoreAdapter<S> {
        &self.adapter
    }

    pub fn store(&self) -> &S {
        self.adapter.store()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn default_profile(&self) -> &Profile {
        &self.default_profile
    }

    /// Avatar restored when the user removes theirs.
    pub fn default_avatar(&self) -> &str {
        &self.default_profile.avatar
    }

    pub fn theme(&self) -> ThemeRepository<'_, S> {
        StateRepository::new(self, &self.keys.theme, ThemeState::default())
    }

    pub fn sidebar(&self) -> SidebarRepository<'_, S> {
        StateRepository::new(self, &self.keys.sidebar, SidebarState::default())
    }

    pub fn profile(&self) -> ProfileRepository<'_, S> {
        StateRepository::new(self, &self.keys.profile, self.default_profile.clone())
    }

    pub fn card_order(&self) -> CardOrderRepository<'_, S> {
        StateRepository::new(self, &self.keys.card_order, CardOrder::default())
    }
}
