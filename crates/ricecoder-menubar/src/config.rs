//! Configuration for the menu bar
//!
//! Configuration is read from `<config dir>/ricecoder/menubar.yaml` when it
//! exists, otherwise built-in defaults are used.
//!
//! # Configuration File Format
//!
//! ```yaml
//! theme: default
//! bordered: true
//! mouse: true
//! log_file: /tmp/menubar.log
//! menus:
//!   - label: File
//!     items: [Open, Save, Quit]
//!   - label: Edit
//!     items: [Copy, Paste]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::components::{Menu, MenuItem};
use crate::error::{MenuError, MenuResult};
use crate::style::Palette;

/// One top-level menu as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Bar label
    pub label: String,
    /// Item labels, top to bottom
    #[serde(default)]
    pub items: Vec<String>,
}

impl MenuConfig {
    pub fn new(label: impl Into<String>, items: &[&str]) -> Self {
        Self {
            label: label.into(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Menu bar configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuBarConfig {
    /// Palette name
    pub theme: String,
    /// Draw border boxes around popups
    pub bordered: bool,
    /// Enable mouse capture
    pub mouse: bool,
    /// Where to write logs; no logging when unset
    pub log_file: Option<PathBuf>,
    /// Top-level menus, left to right
    pub menus: Vec<MenuConfig>,
}

impl Default for MenuBarConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            bordered: true,
            mouse: true,
            log_file: None,
            menus: vec![
                MenuConfig::new("File", &["Open", "Save", "Quit"]),
                MenuConfig::new("Edit", &["Copy", "Paste"]),
                MenuConfig::new("Help", &["About"]),
            ],
        }
    }
}

impl MenuBarConfig {
    /// Load from the default location, falling back to defaults
    pub fn load() -> MenuResult<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "No menu bar config, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> MenuResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        tracing::debug!(
            path = %path.display(),
            menus = config.menus.len(),
            "Loaded menu bar config"
        );
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml(contents: &str) -> MenuResult<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> MenuResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Get the config file path
    pub fn config_path() -> MenuResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MenuError::config("Could not determine config directory"))?;
        Ok(config_dir.join("ricecoder").join("menubar.yaml"))
    }

    /// Menu labels must be non-empty and unique
    pub fn validate(&self) -> MenuResult<()> {
        let mut seen = HashSet::new();
        for menu in &self.menus {
            if menu.label.trim().is_empty() {
                return Err(MenuError::config("Menu label must not be empty"));
            }
            if !seen.insert(menu.label.as_str()) {
                return Err(MenuError::DuplicateMenu {
                    label: menu.label.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::by_name(&self.theme)
    }

    /// Build menus whose items all report to `on_select(menu, item)`
    pub fn build_menus<F>(&self, on_select: F) -> Vec<Menu>
    where
        F: Fn(&str, &str) + 'static,
    {
        let on_select = Rc::new(on_select);
        self.menus
            .iter()
            .map(|menu| {
                let items = menu
                    .items
                    .iter()
                    .map(|item| {
                        let on_select = on_select.clone();
                        let menu_label = menu.label.clone();
                        let item_label = item.clone();
                        MenuItem::new(item.clone(), move || on_select(&menu_label, &item_label))
                    })
                    .collect();
                Menu::new(menu.label.clone(), items)
            })
            .collect()
    }
}
