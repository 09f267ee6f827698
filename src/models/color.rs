use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-bit color used by character formats (text color and highlight).
///
/// Serialized as a `#rrggbb` string so documents stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const YELLOW: Rgb = Rgb::new(0xFF, 0xFF, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb`, `#rgb` or a small set of color names.
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim();
        if v.is_empty() {
            return None;
        }

        if let Some(hex) = v.strip_prefix('#') {
            if !hex.is_ascii() {
                return None;
            }
            return match hex.len() {
                6 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                    Some(Self::new(r, g, b))
                }
                3 => {
                    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                    let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
                    Some(Self::new(r * 17, g * 17, b * 17))
                }
                _ => None,
            };
        }

        let c = match v.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::new(0xFF, 0x00, 0x00),
            "green" => Self::new(0x00, 0x80, 0x00),
            "lime" => Self::new(0x00, 0xFF, 0x00),
            "blue" => Self::new(0x00, 0x00, 0xFF),
            "yellow" => Self::YELLOW,
            "cyan" => Self::new(0x00, 0xFF, 0xFF),
            "magenta" => Self::new(0xFF, 0x00, 0xFF),
            "orange" => Self::new(0xFF, 0xA5, 0x00),
            "gray" | "grey" => Self::new(0xA0, 0xA0, 0xA4),
            "dark_gray" | "darkgray" | "darkgrey" => Self::new(0x80, 0x80, 0x80),
            _ => return None,
        };
        Some(c)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Components in `0.0..=1.0`, the form PDF color operators expect.
    pub fn unit_components(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/color.rs"]
mod tests;
