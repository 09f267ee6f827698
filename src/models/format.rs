//! Character and block formats.
//!
//! `CharFormat` is a complete description of how a run of characters looks. Commands never
//! replace it wholesale: they build a `CharFormatPatch` and merge it, so only the properties a
//! command touches change.

use super::color::Rgb;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharFormat {
    pub family: CompactString,
    pub point_size: u16,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strike_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
}

impl CharFormat {
    pub fn new(family: &str, point_size: u16) -> Self {
        Self {
            family: CompactString::from(family),
            point_size,
            weight: FontWeight::Normal,
            italic: false,
            underline: false,
            strike_out: false,
            foreground: None,
            background: None,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    /// Applies every property set in `patch`; returns whether anything changed.
    pub fn merge(&mut self, patch: &CharFormatPatch) -> bool {
        let before = self.clone();
        if let Some(family) = &patch.family {
            self.family = family.clone();
        }
        if let Some(size) = patch.point_size {
            self.point_size = size;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(strike_out) = patch.strike_out {
            self.strike_out = strike_out;
        }
        if let Some(fg) = patch.foreground {
            self.foreground = Some(fg);
        }
        if let Some(bg) = patch.background {
            self.background = Some(bg);
        }
        *self != before
    }
}

/// A partial character format: `None` fields are left untouched by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFormatPatch {
    pub family: Option<CompactString>,
    pub point_size: Option<u16>,
    pub weight: Option<FontWeight>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike_out: Option<bool>,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl CharFormatPatch {
    pub fn family(family: &str) -> Self {
        Self {
            family: Some(CompactString::from(family)),
            ..Self::default()
        }
    }

    pub fn point_size(size: u16) -> Self {
        Self {
            point_size: Some(size),
            ..Self::default()
        }
    }

    pub fn weight(weight: FontWeight) -> Self {
        Self {
            weight: Some(weight),
            ..Self::default()
        }
    }

    pub fn italic(on: bool) -> Self {
        Self {
            italic: Some(on),
            ..Self::default()
        }
    }

    pub fn underline(on: bool) -> Self {
        Self {
            underline: Some(on),
            ..Self::default()
        }
    }

    pub fn strike_out(on: bool) -> Self {
        Self {
            strike_out: Some(on),
            ..Self::default()
        }
    }

    pub fn foreground(color: Rgb) -> Self {
        Self {
            foreground: Some(color),
            ..Self::default()
        }
    }

    pub fn background(color: Rgb) -> Self {
        Self {
            background: Some(color),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Decimal,
    Bullet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFormat {
    pub id: u32,
    pub style: ListStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockFormat {
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListFormat>,
}

/// An inline image reference. The image itself is never decoded; only its source and the
/// requested display size travel with the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFormat {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/models/format.rs"]
mod tests;
