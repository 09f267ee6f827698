use crate::models::CharFormat;
use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: u16 = 8;
pub const MAX_FONT_SIZE: u16 = 96;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Family every new workspace starts with.
    #[serde(alias = "fontFamily")]
    pub font_family: String,
    #[serde(alias = "fontSize")]
    pub font_size: u16,
    #[serde(alias = "scrollLines")]
    pub scroll_lines: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            font_size: 12,
            scroll_lines: 3,
        }
    }
}

impl EditorConfig {
    pub fn scroll_step(&self) -> usize {
        self.scroll_lines.max(1)
    }

    pub fn default_char_format(&self) -> CharFormat {
        let size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let family = self.font_family.trim();
        if family.is_empty() {
            return CharFormat::new(&EditorConfig::default().font_family, size);
        }
        CharFormat::new(family, size)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
