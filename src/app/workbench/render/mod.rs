use super::Workbench;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

mod dialogs;
mod document;
mod status;
mod tabs;
mod toolbar;

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    workbench.last_cursor = None;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(super::TOOLBAR_HEIGHT),
            Constraint::Length(super::TABS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(super::STATUS_HEIGHT),
        ])
        .split(area);

    workbench.render_toolbar(frame, chunks[0]);
    workbench.render_tabs(frame, chunks[1]);
    workbench.render_document(frame, chunks[2]);
    workbench.render_status(frame, chunks[3]);

    if workbench.store.state().ui.dialog.visible {
        dialogs::render_dialog(workbench, frame, area);
    } else if workbench.store.state().ui.message_box.visible {
        dialogs::render_message_box(workbench, frame, area);
    }

    if let Some((x, y)) = workbench.last_cursor {
        frame.set_cursor_position((x, y));
    }
}

impl Workbench {
    fn render_document(&mut self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let modal = state.ui.is_modal();
        let Some(workspace) = state.workspaces.active() else {
            self.last_document_area = None;
            return;
        };

        let border_color = if modal {
            self.theme.inactive_border
        } else {
            self.theme.focus_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            self.last_document_area = None;
            return;
        }
        self.last_document_area = Some(inner);

        let laid = document::layout_document(&workspace.surface, inner.width, &self.theme);
        let height = inner.height as usize;
        let max_scroll = laid.lines.len().saturating_sub(height);

        let mut scroll = self.active_scroll().min(max_scroll);
        if self.follow_cursor {
            if let Some((row, _)) = laid.cursor {
                if row < scroll {
                    scroll = row;
                } else if row >= scroll + height {
                    scroll = row + 1 - height;
                }
            }
        }

        let cursor = laid.cursor.and_then(|(row, col)| {
            (row >= scroll && row < scroll + height)
                .then(|| (inner.x + col.min(inner.width - 1), inner.y + (row - scroll) as u16))
        });
        let visible: Vec<_> = laid.lines.into_iter().skip(scroll).take(height).collect();
        frame.render_widget(Paragraph::new(visible), inner);

        let live: Vec<_> = state.workspaces.iter().map(|ws| ws.id()).collect();
        self.scroll_offsets.retain(|id, _| live.contains(id));
        self.set_active_scroll(scroll);
        if !modal {
            self.last_cursor = cursor;
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/app/workbench/render/mod.rs"]
mod tests;
