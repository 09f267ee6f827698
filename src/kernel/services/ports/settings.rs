use super::config::EditorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    /// Shown as suggestions in the font family dialog.
    #[serde(default = "default_font_families", alias = "fontFamilies")]
    pub font_families: Vec<String>,
    #[serde(default)]
    pub theme: ThemeSettings,
}

/// `command: ""` removes the binding for `key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

pub fn default_font_families() -> Vec<String> {
    [
        "Calibri",
        "Arial",
        "Helvetica",
        "Times New Roman",
        "Georgia",
        "Courier New",
        "Consolas",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolbar_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolbar_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_active_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_active_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_active_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_active_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_inactive_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            focus_border: Some("cyan".to_string()),
            inactive_border: Some("dark_gray".to_string()),
            accent_fg: Some("yellow".to_string()),
            toolbar_bg: None,
            toolbar_fg: Some("white".to_string()),
            toggle_active_bg: Some("cyan".to_string()),
            toggle_active_fg: Some("black".to_string()),
            tab_active_bg: Some("dark_gray".to_string()),
            tab_active_fg: Some("white".to_string()),
            tab_inactive_fg: Some("dark_gray".to_string()),
            status_bg: Some("dark_gray".to_string()),
            status_fg: Some("white".to_string()),
            selection_bg: Some("blue".to_string()),
            muted_fg: Some("dark_gray".to_string()),
            error_fg: Some("red".to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            keybindings: Vec::new(),
            font_families: default_font_families(),
            theme: ThemeSettings::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
