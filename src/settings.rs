use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use libadwaita as adw;
use serde::{Deserialize, Serialize};

use crate::index::{DEFAULT_UPDATE_HISTORY_DAYS, clamp_history_days};

const APP_SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    System,
    Light,
    Dark,
}

impl Default for ThemePreference {
    fn default() -> Self {
        ThemePreference::System
    }
}

impl ThemePreference {
    pub(crate) const ALL: [ThemePreference; 3] = [
        ThemePreference::System,
        ThemePreference::Light,
        ThemePreference::Dark,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::System => "Follow system",
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
        }
    }

    pub(crate) fn position(self) -> u32 {
        match self {
            ThemePreference::System => 0,
            ThemePreference::Light => 1,
            ThemePreference::Dark => 2,
        }
    }

    pub(crate) fn from_position(position: u32) -> Self {
        match position {
            1 => ThemePreference::Light,
            2 => ThemePreference::Dark,
            _ => ThemePreference::System,
        }
    }

    pub fn apply(self, style_manager: &adw::StyleManager) {
        match self {
            ThemePreference::System => style_manager.set_color_scheme(adw::ColorScheme::Default),
            ThemePreference::Light => style_manager.set_color_scheme(adw::ColorScheme::ForceLight),
            ThemePreference::Dark => style_manager.set_color_scheme(adw::ColorScheme::ForceDark),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub window_width: Option<i32>,
    #[serde(default)]
    pub window_height: Option<i32>,
    #[serde(default)]
    pub theme_preference: ThemePreference,
    #[serde(default = "default_update_history_days")]
    pub update_history_days: u32,
    #[serde(default)]
    pub last_category: Option<String>,
    #[serde(default)]
    pub index_dir: Option<String>,
}

fn default_update_history_days() -> u32 {
    DEFAULT_UPDATE_HISTORY_DAYS
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: None,
            window_height: None,
            theme_preference: ThemePreference::System,
            update_history_days: default_update_history_days(),
            last_category: None,
            index_dir: None,
        }
    }
}

impl AppSettings {
    fn normalized(mut self) -> Self {
        self.update_history_days = clamp_history_days(self.update_history_days);
        self
    }
}

pub fn load_app_settings_from(path: &Path) -> AppSettings {
    let Ok(content) = fs::read_to_string(path) else {
        return AppSettings::default();
    };

    serde_json::from_str::<AppSettings>(&content)
        .unwrap_or_default()
        .normalized()
}

pub fn save_app_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create settings directory {}", parent.display())
        })?;
    }

    let data =
        serde_json::to_string_pretty(settings).context("failed to serialize settings")?;

    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

fn app_config_dir() -> Option<PathBuf> {
    if let Ok(custom) = env::var("DROIDSHELF_CONFIG_DIR") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        let trimmed = config_home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("droidshelf"));
        }
    }

    if let Ok(home) = env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join(".config").join("droidshelf"));
        }
    }

    None
}

pub(crate) fn app_settings_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join(APP_SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"window_width": 800}"#).unwrap();
        assert_eq!(settings.window_width, Some(800));
        assert_eq!(settings.update_history_days, DEFAULT_UPDATE_HISTORY_DAYS);
        assert_eq!(settings.theme_preference, ThemePreference::System);
        assert!(settings.last_category.is_none());
    }

    #[test]
    fn load_clamps_history_days() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(APP_SETTINGS_FILE);
        fs::write(&path, r#"{"update_history_days": 0, "theme_preference": "dark"}"#).unwrap();
        let settings = load_app_settings_from(&path);
        assert_eq!(settings.update_history_days, 1);
        assert_eq!(settings.theme_preference, ThemePreference::Dark);
    }

    #[test]
    fn unreadable_or_corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(APP_SETTINGS_FILE);
        assert_eq!(load_app_settings_from(&path), AppSettings::default());
        fs::write(&path, "[]").unwrap();
        assert_eq!(load_app_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(APP_SETTINGS_FILE);
        let settings = AppSettings {
            last_category: Some("Games".to_string()),
            ..AppSettings::default()
        };
        save_app_settings_to(&path, &settings).unwrap();
        assert_eq!(load_app_settings_from(&path), settings);
    }

    #[test]
    fn theme_positions_round_trip_through_the_combo() {
        for theme in ThemePreference::ALL {
            assert_eq!(ThemePreference::from_position(theme.position()), theme);
        }
        assert_eq!(ThemePreference::from_position(42), ThemePreference::System);
    }
}
