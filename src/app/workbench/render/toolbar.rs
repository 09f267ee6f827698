use super::super::Workbench;
use crate::core::Command;
use crate::kernel::ToolbarState;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub(super) struct ToolbarItem {
    pub label: String,
    pub command: Command,
    pub active: bool,
}

impl ToolbarItem {
    fn new(label: impl Into<String>, command: Command) -> Self {
        Self {
            label: label.into(),
            command,
            active: false,
        }
    }

    fn toggle(label: &str, command: Command, active: bool) -> Self {
        Self {
            label: label.to_string(),
            command,
            active,
        }
    }
}

/// File and font actions on the first row, character and paragraph formatting on the second.
pub(super) fn toolbar_rows(toolbar: &ToolbarState) -> [Vec<ToolbarItem>; 2] {
    [
        vec![
            ToolbarItem::new("New Workspace", Command::NewWorkspace),
            ToolbarItem::new("New", Command::NewDocument),
            ToolbarItem::new("Open", Command::OpenDocument),
            ToolbarItem::new("Save", Command::SaveDocument),
            ToolbarItem::new("Save As", Command::SaveDocumentAs),
            ToolbarItem::new("Save As PDF", Command::ExportPdf),
            ToolbarItem::new(format!("Font: {}", toolbar.font_family), Command::FontFamily),
            ToolbarItem::new(format!("Size: {}", toolbar.font_size), Command::FontSize),
            ToolbarItem::new("-", Command::FontSizeDown),
            ToolbarItem::new("+", Command::FontSizeUp),
        ],
        vec![
            ToolbarItem::toggle("B", Command::ToggleBold, toolbar.bold),
            ToolbarItem::toggle("I", Command::ToggleItalic, toolbar.italic),
            ToolbarItem::toggle("U", Command::ToggleUnderline, toolbar.underline),
            ToolbarItem::toggle("S", Command::ToggleStrikethrough, toolbar.strikethrough),
            ToolbarItem::new("Highlight", Command::Highlight),
            ToolbarItem::new("Text Color", Command::TextColor),
            ToolbarItem::new("Left", Command::AlignLeft),
            ToolbarItem::new("Center", Command::AlignCenter),
            ToolbarItem::new("Right", Command::AlignRight),
            ToolbarItem::new("Justify", Command::AlignJustify),
            ToolbarItem::new("1.", Command::NumberedList),
            ToolbarItem::new("•", Command::BulletList),
            ToolbarItem::new("Image", Command::InsertImage),
            ToolbarItem::new("Table", Command::InsertTable),
        ],
    ]
}

impl Workbench {
    pub(super) fn render_toolbar(&mut self, frame: &mut Frame, area: Rect) {
        self.last_toolbar_hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let base = Style::default()
            .bg(self.theme.toolbar_bg)
            .fg(self.theme.toolbar_fg);
        let active = Style::default()
            .bg(self.theme.toggle_active_bg)
            .fg(self.theme.toggle_active_fg)
            .add_modifier(Modifier::BOLD);
        let separator = Style::default().fg(self.theme.muted_fg);

        let rows = toolbar_rows(&self.store.state().ui.toolbar);
        for (row_index, items) in rows.into_iter().enumerate() {
            let y = area.y + row_index as u16;
            if y >= area.y + area.height {
                break;
            }

            let right = area.x + area.width;
            let mut x = area.x;
            let mut spans = Vec::new();
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("│", separator));
                    x = x.saturating_add(1);
                }
                let text = format!(" {} ", item.label);
                let width = text.width() as u16;
                if x >= right {
                    break;
                }
                let visible = width.min(right - x);
                self.last_toolbar_hits
                    .push((Rect::new(x, y, visible, 1), item.command));
                spans.push(Span::styled(text, if item.active { active } else { base }));
                x = x.saturating_add(width);
            }

            frame.render_widget(
                Paragraph::new(Line::from(spans)).style(base),
                Rect::new(area.x, y, area.width, 1),
            );
        }
    }
}
