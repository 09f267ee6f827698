use super::super::Workbench;
use crate::kernel::MessageLevel;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PROMPT_PREFIX: &str = "> ";

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width) / 2);
    let y = area.y + (area.height.saturating_sub(height) / 2);
    Rect::new(x, y, width, height)
}

/// Byte range of `value` to show in `width` columns so that `cursor` stays visible.
fn visible_window(value: &str, cursor: usize, width: usize) -> (usize, usize) {
    let cursor = cursor.min(value.len());
    if width == 0 {
        return (cursor, cursor);
    }

    let mut start = cursor;
    let mut used = 0usize;
    for (i, ch) in value[..cursor].char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w >= width {
            break;
        }
        used += w;
        start = i;
    }

    let mut end = cursor;
    for (i, ch) in value[cursor..].char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w >= width {
            break;
        }
        used += w;
        end = cursor + i + ch.len_utf8();
    }
    (start, end)
}

pub(super) fn render_dialog(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let dialog = &workbench.store.state().ui.dialog;
    if !dialog.visible {
        return;
    }

    let popup = centered_rect(60.max(area.width / 2), 8, area);
    if popup.width < 20 || popup.height < 6 {
        return;
    }
    frame.render_widget(Clear, popup);

    let title = if dialog.title.is_empty() {
        "Input"
    } else {
        dialog.title.as_str()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(workbench.theme.focus_border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(workbench.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let muted = Style::default().fg(workbench.theme.muted_fg);
    let value_width = inner.width.saturating_sub(PROMPT_PREFIX.width() as u16) as usize;
    let cursor = dialog.cursor.min(dialog.value.len());
    let (start, end) = visible_window(&dialog.value, cursor, value_width);
    let visible_value = dialog.value.get(start..end).unwrap_or_default();

    let mut lines = vec![
        Line::from(dialog.prompt.as_str()),
        Line::from(vec![Span::raw(PROMPT_PREFIX), Span::raw(visible_value)]),
    ];
    match (&dialog.error, &dialog.hint) {
        (Some(err), _) => lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(workbench.theme.error_fg),
        ))),
        (None, Some(hint)) => lines.push(Line::from(Span::styled(hint.as_str(), muted))),
        (None, None) => lines.push(Line::raw("")),
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(workbench.theme.accent_fg)),
        Span::raw(" OK  "),
        Span::styled("[Esc]", muted),
        Span::raw(" Cancel"),
    ]));
    frame.render_widget(Paragraph::new(lines), inner);

    let before_cursor = dialog.value.get(start..cursor).unwrap_or_default();
    let x = inner
        .x
        .saturating_add(PROMPT_PREFIX.width() as u16)
        .saturating_add(before_cursor.width() as u16);
    let y = inner.y.saturating_add(1);
    if inner.height > 1 && x < inner.x + inner.width {
        workbench.last_cursor = Some((x, y));
    }
}

pub(super) fn render_message_box(workbench: &Workbench, frame: &mut Frame, area: Rect) {
    let message = &workbench.store.state().ui.message_box;
    if !message.visible {
        return;
    }

    let body_lines = message.body.lines().count().max(1) as u16;
    let popup = centered_rect(60.max(area.width / 2), body_lines + 5, area);
    if popup.width < 20 || popup.height < 5 {
        return;
    }
    frame.render_widget(Clear, popup);

    let (border, title_fg) = match message.level {
        MessageLevel::Info => (workbench.theme.focus_border, workbench.theme.accent_fg),
        MessageLevel::Warning => (workbench.theme.error_fg, workbench.theme.error_fg),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", message.title),
            Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = message.body.lines().map(Line::from).collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(workbench.theme.accent_fg)),
        Span::raw(" OK"),
    ]));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
