//! UI theme: configurable colors in one place instead of scattered through the render code.

use crate::kernel::services::ports::ThemeSettings;
use crate::models::Rgb;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub focus_border: Color,
    pub inactive_border: Color,
    pub accent_fg: Color,
    pub toolbar_bg: Color,
    pub toolbar_fg: Color,
    pub toggle_active_bg: Color,
    pub toggle_active_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub selection_bg: Color,
    pub muted_fg: Color,
    pub error_fg: Color,
    pub color_support: TerminalColorSupport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("POWERTEXT_COLOR_SUPPORT") {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor")
        || colorterm.contains("24bit")
        || colorterm.contains("direct")
        || term.contains("truecolor")
        || term.contains("24bit")
        || term.contains("direct")
    {
        return TerminalColorSupport::TrueColor;
    }

    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }

    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            focus_border: Color::Indexed(6),    // Cyan
            inactive_border: Color::Indexed(8), // DarkGray
            accent_fg: Color::Indexed(3),
            toolbar_bg: Color::Reset,
            toolbar_fg: Color::Indexed(15),
            toggle_active_bg: Color::Indexed(6),
            toggle_active_fg: Color::Indexed(0),
            tab_active_bg: Color::Indexed(8),
            tab_active_fg: Color::Indexed(15),
            tab_inactive_fg: Color::Indexed(8),
            status_bg: Color::Indexed(8),
            status_fg: Color::Indexed(15),
            selection_bg: Color::Indexed(4), // Blue
            muted_fg: Color::Indexed(8),
            error_fg: Color::Indexed(1), // Red
            color_support: TerminalColorSupport::TrueColor,
        }
    }
}

impl UiTheme {
    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    pub fn apply_color_support(&mut self, support: TerminalColorSupport) {
        self.color_support = support;
        if support == TerminalColorSupport::TrueColor {
            return;
        }

        self.focus_border = map_color_for_support(self.focus_border, support);
        self.inactive_border = map_color_for_support(self.inactive_border, support);
        self.accent_fg = map_color_for_support(self.accent_fg, support);
        self.toolbar_bg = map_color_for_support(self.toolbar_bg, support);
        self.toolbar_fg = map_color_for_support(self.toolbar_fg, support);
        self.toggle_active_bg = map_color_for_support(self.toggle_active_bg, support);
        self.toggle_active_fg = map_color_for_support(self.toggle_active_fg, support);
        self.tab_active_bg = map_color_for_support(self.tab_active_bg, support);
        self.tab_active_fg = map_color_for_support(self.tab_active_fg, support);
        self.tab_inactive_fg = map_color_for_support(self.tab_inactive_fg, support);
        self.status_bg = map_color_for_support(self.status_bg, support);
        self.status_fg = map_color_for_support(self.status_fg, support);
        self.selection_bg = map_color_for_support(self.selection_bg, support);
        self.muted_fg = map_color_for_support(self.muted_fg, support);
        self.error_fg = map_color_for_support(self.error_fg, support);
    }

    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        if let Some(v) = &settings.focus_border {
            if let Some(c) = parse_color(v) {
                self.focus_border = c;
            }
        }
        if let Some(v) = &settings.inactive_border {
            if let Some(c) = parse_color(v) {
                self.inactive_border = c;
            }
        }
        if let Some(v) = &settings.accent_fg {
            if let Some(c) = parse_color(v) {
                self.accent_fg = c;
            }
        }
        if let Some(v) = &settings.toolbar_bg {
            if let Some(c) = parse_color(v) {
                self.toolbar_bg = c;
            }
        }
        if let Some(v) = &settings.toolbar_fg {
            if let Some(c) = parse_color(v) {
                self.toolbar_fg = c;
            }
        }
        if let Some(v) = &settings.toggle_active_bg {
            if let Some(c) = parse_color(v) {
                self.toggle_active_bg = c;
            }
        }
        if let Some(v) = &settings.toggle_active_fg {
            if let Some(c) = parse_color(v) {
                self.toggle_active_fg = c;
            }
        }
        if let Some(v) = &settings.tab_active_bg {
            if let Some(c) = parse_color(v) {
                self.tab_active_bg = c;
            }
        }
        if let Some(v) = &settings.tab_active_fg {
            if let Some(c) = parse_color(v) {
                self.tab_active_fg = c;
            }
        }
        if let Some(v) = &settings.tab_inactive_fg {
            if let Some(c) = parse_color(v) {
                self.tab_inactive_fg = c;
            }
        }
        if let Some(v) = &settings.status_bg {
            if let Some(c) = parse_color(v) {
                self.status_bg = c;
            }
        }
        if let Some(v) = &settings.status_fg {
            if let Some(c) = parse_color(v) {
                self.status_fg = c;
            }
        }
        if let Some(v) = &settings.selection_bg {
            if let Some(c) = parse_color(v) {
                self.selection_bg = c;
            }
        }
        if let Some(v) = &settings.muted_fg {
            if let Some(c) = parse_color(v) {
                self.muted_fg = c;
            }
        }
        if let Some(v) = &settings.error_fg {
            if let Some(c) = parse_color(v) {
                self.error_fg = c;
            }
        }
    }

    /// Terminal color for a document color, degraded to what the terminal can show.
    pub fn document_color(&self, rgb: Rgb) -> Color {
        map_color_for_support(Color::Rgb(rgb.r, rgb.g, rgb.b), self.color_support)
    }
}

pub fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) if i > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (_, value) => value,
    }
}

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;

    for index in 0u8..=255u8 {
        let (pr, pg, pb) = ansi256_index_to_rgb(index);
        let distance = color_distance_sq(r, g, b, pr, pg, pb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }

    best_index
}

fn rgb_to_ansi16_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;

    for (index, (pr, pg, pb)) in ANSI16_RGB.iter().copied().enumerate() {
        let distance = color_distance_sq(r, g, b, pr, pg, pb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index as u8;
        }
    }

    best_index
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }

    if (16..=231).contains(&index) {
        let level = [0u8, 95, 135, 175, 215, 255];
        let offset = index - 16;
        let r = level[(offset / 36) as usize];
        let g = level[((offset / 6) % 6) as usize];
        let b = level[(offset % 6) as usize];
        return (r, g, b);
    }

    let gray = 8u8.saturating_add((index - 232).saturating_mul(10));
    (gray, gray, gray)
}

fn color_distance_sq(r1: u8, g1: u8, b1: u8, r2: u8, g2: u8, b2: u8) -> u32 {
    let dr = i32::from(r1) - i32::from(r2);
    let dg = i32::from(g1) - i32::from(g2);
    let db = i32::from(b1) - i32::from(b2);
    (dr * dr + dg * dg + db * db) as u32
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if v.starts_with('#') {
        return Rgb::parse(v).map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b));
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "darkgrey" => Color::Indexed(8),
        "white" => Color::Indexed(15),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        _ => return None,
    };

    Some(c)
}
