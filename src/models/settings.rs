use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_division() -> String {
    "dhaka".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Bn,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Bn => "bn",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Bn,
            Language::Bn => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "bn" | "bangla" | "bengali" => Ok(Language::Bn),
            _ => Err(anyhow::anyhow!("Unknown language: {} (use en or bn)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme: {} (use light or dark)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_division")]
    pub selected_division: String,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_division: default_division(),
            notifications: true,
            language: Language::En,
            theme: Theme::Dark,
        }
    }
}

/// A partial settings update. `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub selected_division: Option<String>,
    pub notifications: Option<bool>,
    pub language: Option<Language>,
    pub theme: Option<Theme>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.selected_division.is_none()
            && self.notifications.is_none()
            && self.language.is_none()
            && self.theme.is_none()
    }
}

impl Settings {
    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        Settings {
            selected_division: patch
                .selected_division
                .clone()
                .unwrap_or_else(|| self.selected_division.clone()),
            notifications: patch.notifications.unwrap_or(self.notifications),
            language: patch.language.unwrap_or(self.language),
            theme: patch.theme.unwrap_or(self.theme),
        }
    }
}
