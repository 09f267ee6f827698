use super::super::Workbench;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

impl Workbench {
    pub(super) fn render_tabs(&mut self, frame: &mut Frame, area: Rect) {
        self.last_tab_hits.clear();
        if area.width == 0 || area.height == 0 {
            self.last_tabs_area = None;
            return;
        }
        self.last_tabs_area = Some(area);

        let state = self.store.state();
        let active_index = state.workspaces.active_index();
        let active_style = Style::default()
            .bg(self.theme.tab_active_bg)
            .fg(self.theme.tab_active_fg)
            .add_modifier(Modifier::BOLD);
        let inactive_style = Style::default().fg(self.theme.tab_inactive_fg);

        let right = area.x + area.width;
        let mut x = area.x;
        let mut spans = Vec::new();
        for (index, workspace) in state.workspaces.iter().enumerate() {
            if x >= right {
                break;
            }
            let text = format!(" {} ", workspace.label);
            let width = text.width() as u16;
            let style = if active_index == Some(index) {
                active_style
            } else {
                inactive_style
            };
            self.last_tab_hits
                .push((Rect::new(x, area.y, width.min(right - x), 1), index));
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x = x.saturating_add(width).saturating_add(1);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
