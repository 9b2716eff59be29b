use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spc_storage::StorageKeys;
use spc_types::Profile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToastDurations {
    pub default_ms: u32,
    pub confirmation_ms: u32,
    pub validation_ms: u32,
    pub demo_ms: u32,
}

impl Default for ToastDurations {
    fn default() -> Self {
        Self {
            default_ms: 3000,
            confirmation_ms: 1200,
            validation_ms: 1400,
            demo_ms: 1500,
        }
    }
}

/// Shell settings. Every field has a default, so a partial JSON document is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    pub keys: StorageKeys,
    pub default_name: String,
    pub default_email: String,
    pub role_label: String,
    pub default_section: String,
    pub focus_delay_ms: u32,
    pub toast: ToastDurations,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            default_name: "Ali Hamza".to_owned(),
            default_email: "ali@example.com".to_owned(),
            role_label: "Main Owner".to_owned(),
            default_section: "dashboard".to_owned(),
            focus_delay_ms: 120,
            toast: ToastDurations::default(),
        }
    }
}

impl ShellConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid shell configuration")
    }

    /// The profile used until the user saves their own. `avatar` is whatever
    /// placeholder the markup shipped with.
    pub fn default_profile(&self, avatar: impl Into<String>) -> Profile {
        Profile {
            name: self.default_name.clone(),
            email: self.default_email.clone(),
            avatar: avatar.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = ShellConfig::from_json(
            r#"{"role_label":"Admin","keys":{"theme":"my_theme"},"toast":{"demo_ms":900}}"#,
        )
        .unwrap();
        assert_eq!(config.role_label, "Admin");
        assert_eq!(config.keys.theme, "my_theme");
        assert_eq!(config.keys.profile, "spc_profile");
        assert_eq!(config.toast.demo_ms, 900);
        assert_eq!(config.toast.validation_ms, 1400);
        assert_eq!(config.focus_delay_ms, 120);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = ShellConfig::from_json("{").unwrap_err();
        assert!(err.to_string().contains("invalid shell configuration"));
    }

    #[test]
    fn default_profile_uses_supplied_avatar() {
        let profile = ShellConfig::default().default_profile("placeholder.svg");
        assert_eq!(profile.name, "Ali Hamza");
        assert_eq!(profile.avatar, "placeholder.svg");
    }
}
