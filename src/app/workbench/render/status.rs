use super::super::Workbench;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

impl Workbench {
    /// `Workspace No. N | label | Block b[, Cell r:c], Col c | family size pt`
    pub(super) fn status_text(&self) -> String {
        let state = self.store.state();
        let Some((index, workspace)) = state
            .workspaces
            .active_index()
            .zip(state.workspaces.active())
        else {
            return "No workspace".to_string();
        };

        let position = workspace.surface.cursor().position();
        let cell = workspace
            .surface
            .table_cell()
            .map(|(row, column)| format!(", Cell {}:{}", row + 1, column + 1))
            .unwrap_or_default();
        let format = workspace.surface.char_format();
        format!(
            "Workspace No. {} | {} | Block {}{}, Col {} | {} {}pt",
            index + 1,
            workspace.label,
            position.block + 1,
            cell,
            position.offset + 1,
            format.family,
            format.point_size,
        )
    }

    pub(super) fn render_status(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);
        frame.render_widget(Paragraph::new(self.status_text()).style(style), area);
    }
}
