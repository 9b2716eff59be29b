use crate::codec;
use crate::{KeyValueStore, StateContext, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use spc_types::{CardOrder, Profile, SidebarState, ThemeState};
use tracing::{debug, warn};

pub type ThemeRepository<'a, S> = StateRepository<'a, S, ThemeState>;
pub type SidebarRepository<'a, S> = StateRepository<'a, S, SidebarState>;
pub type ProfileRepository<'a, S> = StateRepository<'a, S, Profile>;
pub type CardOrderRepository<'a, S> = StateRepository<'a, S, CardOrder>;

/// Sole read/write path for one storage key.
pub struct StateRepository<'a, S, T> {
    ctx: &'a StateContext<S>,
    key: &'a str,
    default: T,
}

impl<'a, S, T> StateRepository<'a, S, T>
where
    S: KeyValueStore,
    T: Clone + Serialize + DeserializeOwned,
{
    pub(crate) fn new(ctx: &'a StateContext<S>, key: &'a str, default: T) -> Self {
        Self { ctx, key, default }
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Loads without any fallback. `Ok(None)` means nothing usable is stored.
    pub fn try_load(&self) -> Result<Option<T>, StoreError> {
        match self.ctx.adapter().try_read(self.key)? {
            Some(raw) if !raw.is_empty() => codec::try_decode(&raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Loads the stored value. An absent (or empty) entry is replaced by the
    /// default, which is written back before being returned.
    pub fn load(&self) -> T {
        match self.ctx.adapter().read(self.key) {
            Some(raw) if !raw.is_empty() => codec::try_decode(&raw).unwrap_or_else(|err| {
                warn!("ignoring stored `{}`: {}", self.key, err);
                self.default.clone()
            }),
            _ => {
                debug!("no stored `{}`, persisting default", self.key);
                let value = self.default.clone();
                self.save(&value);
                value
            }
        }
    }

    /// Overwrites the stored value unconditionally.
    pub fn save(&self, value: &T) {
        match codec::encode(value) {
            Ok(raw) => self.ctx.adapter().write(self.key, &raw),
            Err(err) => warn!("not saving `{}`: {}", self.key, err),
        }
    }
}
