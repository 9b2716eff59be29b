use spc_storage::{InMemoryStore, StateContext, StorageKeys, UnavailableStore};
use spc_types::{CardOrder, Profile, SidebarState, ThemeState};

const PLACEHOLDER: &str = "data:image/svg+xml;utf8,<svg/>";

fn default_profile() -> Profile {
    Profile {
        name: "Ali Hamza".to_owned(),
        email: "ali@example.com".to_owned(),
        avatar: PLACEHOLDER.to_owned(),
    }
}

fn context(store: InMemoryStore) -> StateContext<InMemoryStore> {
    StateContext::new(store, StorageKeys::default(), default_profile())
}

#[test]
fn empty_store_loads_and_persists_defaults() {
    let ctx = context(InMemoryStore::new());

    assert_eq!(ctx.theme().load(), ThemeState::Light);
    assert_eq!(ctx.sidebar().load(), SidebarState::new(false));
    assert_eq!(ctx.profile().load(), default_profile());
    assert_eq!(ctx.card_order().load(), CardOrder::default());

    let store = ctx.store();
    assert_eq!(store.raw("spc_theme").as_deref(), Some("light"));
    assert_eq!(store.raw("spc_sidebar_collapsed").as_deref(), Some("false"));
    assert_eq!(store.raw("spc_cards_order").as_deref(), Some("[]"));
    let stored: Profile = serde_json::from_str(&store.raw("spc_profile").unwrap()).unwrap();
    assert_eq!(stored, default_profile());
}

#[test]
fn saved_values_are_loaded_back() {
    let ctx = context(InMemoryStore::new());

    ctx.theme().save(&ThemeState::Dark);
    ctx.sidebar().save(&SidebarState::new(true));
    ctx.card_order().save(&CardOrder::new(["b", "a"]));

    assert_eq!(ctx.theme().load(), ThemeState::Dark);
    assert!(ctx.sidebar().load().collapsed);
    assert_eq!(ctx.card_order().load(), CardOrder::new(["b", "a"]));
    assert_eq!(ctx.store().raw("spc_theme").as_deref(), Some("dark"));
    assert_eq!(ctx.store().raw("spc_sidebar_collapsed").as_deref(), Some("true"));
}

#[test]
fn values_written_by_older_builds_are_read() {
    let store = InMemoryStore::with_entries([
        ("spc_theme", "dark"),
        ("spc_sidebar_collapsed", "true"),
        ("spc_cards_order", r#"["card-3","card-1"]"#),
    ]);
    let ctx = context(store);

    assert_eq!(ctx.theme().load(), ThemeState::Dark);
    assert!(ctx.sidebar().load().collapsed);
    assert_eq!(ctx.card_order().load(), CardOrder::new(["card-3", "card-1"]));
}

#[test]
fn corrupted_entries_fall_back_without_being_overwritten() {
    let store = InMemoryStore::with_entries([
        ("spc_profile", "{not json"),
        ("spc_theme", "sepia"),
        ("spc_cards_order", r#"{"a":1}"#),
    ]);
    let ctx = context(store);

    assert_eq!(ctx.profile().load(), default_profile());
    assert_eq!(ctx.theme().load(), ThemeState::Light);
    assert_eq!(ctx.card_order().load(), CardOrder::default());
    assert!(ctx.profile().try_load().is_err());
    assert_eq!(ctx.store().raw("spc_profile").as_deref(), Some("{not json"));
}

#[test]
fn empty_profile_entry_counts_as_absent() {
    let ctx = context(InMemoryStore::with_entries([("spc_profile", "")]));
    assert_eq!(ctx.profile().try_load().unwrap(), None);
    assert_eq!(ctx.profile().load(), default_profile());
    assert!(!ctx.store().raw("spc_profile").unwrap().is_empty());
}

#[test]
fn failing_writes_keep_last_saved_value() {
    let ctx = context(InMemoryStore::new());
    let mut edited = ctx.profile().load();
    edited.name = "Grace".to_owned();
    ctx.profile().save(&edited);

    ctx.store().set_fail_writes(true);
    let mut rejected = edited.clone();
    rejected.name = "Never stored".to_owned();
    ctx.profile().save(&rejected);

    assert_eq!(ctx.profile().load(), edited);
}

#[test]
fn failing_writes_on_empty_store_still_yield_defaults() {
    let store = InMemoryStore::new();
    store.set_fail_writes(true);
    let ctx = context(store);

    ctx.theme().save(&ThemeState::Dark);
    assert_eq!(ctx.theme().load(), ThemeState::Light);
    assert_eq!(ctx.profile().load(), default_profile());
    assert!(ctx.store().is_empty());
}

#[test]
fn unavailable_storage_degrades_to_defaults() {
    let ctx = StateContext::new(UnavailableStore, StorageKeys::default(), default_profile());

    ctx.card_order().save(&CardOrder::new(["a"]));
    assert_eq!(ctx.card_order().load(), CardOrder::default());
    assert_eq!(ctx.profile().load().avatar, PLACEHOLDER);
    assert!(ctx.theme().try_load().is_err());
}

#[test]
fn custom_keys_are_honoured() {
    let keys = StorageKeys {
        theme: "alt_theme".to_owned(),
        ..StorageKeys::default()
    };
    let ctx = StateContext::new(InMemoryStore::new(), keys, default_profile());
    assert_eq!(ctx.theme().key(), "alt_theme");
    assert_eq!(ctx.profile().key(), "spc_profile");
    ctx.theme().save(&ThemeState::Dark);

    assert_eq!(ctx.store().raw("alt_theme").as_deref(), Some("dark"));
    assert_eq!(ctx.store().raw("spc_theme"), None);
    assert_eq!(ctx.default_avatar(), PLACEHOLDER);
}
