use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThemeState {
    #[default]
    Light,
    Dark,
}

impl ThemeState {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeState::Light => "light",
            ThemeState::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeState::Light => ThemeState::Dark,
            ThemeState::Dark => ThemeState::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeState::Dark
    }
}

impl fmt::Display for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeState::Light),
            "dark" => Ok(ThemeState::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Sidebar collapse flag. Stored as a bare `true` / `false`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SidebarState {
    pub collapsed: bool,
}

impl SidebarState {
    pub fn new(collapsed: bool) -> Self {
        Self { collapsed }
    }

    pub fn toggled(self) -> Self {
        Self {
            collapsed: !self.collapsed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

/// Card identifiers in visual order, first card first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CardOrder(pub Vec<String>);

impl CardOrder {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&ThemeState::Dark).unwrap(), "\"dark\"");
        assert_eq!("light".parse::<ThemeState>().unwrap(), ThemeState::Light);
        assert!("sepia".parse::<ThemeState>().is_err());
    }

    #[test]
    fn sidebar_state_is_a_bare_bool() {
        assert_eq!(serde_json::to_string(&SidebarState::new(true)).unwrap(), "true");
        let parsed: SidebarState = serde_json::from_str("false").unwrap();
        assert!(!parsed.collapsed);
    }

    #[test]
    fn profile_tolerates_missing_fields() {
        let parsed: Profile = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(parsed.name, "Ada");
        assert!(parsed.email.is_empty());
        assert!(parsed.avatar.is_empty());
    }

    #[test]
    fn card_order_is_a_bare_array() {
        let order = CardOrder::new(["b", "a"]);
        assert_eq!(serde_json::to_string(&order).unwrap(), r#"["b","a"]"#);
        assert_eq!(order.ids().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
