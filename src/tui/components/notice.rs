use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::{
    store::{NoticeKind, Store},
    tui::ui::Palette,
};

const POPUP_HEIGHT: u16 = 7;

/// Modal popup for the oldest unacknowledged notice.
pub(crate) struct NoticeComponent;

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

impl Component for NoticeComponent {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let Some(notice) = store.notice() else {
            return;
        };

        let title = match notice.kind {
            NoticeKind::Remote => " Error ",
            NoticeKind::Validation => " Cannot post ",
            NoticeKind::Integrity => " Data problem ",
        };
        let popup = centered(area, 60, POPUP_HEIGHT);

        let body = Paragraph::new(vec![
            Line::from(notice.message.as_str()),
            Line::default(),
            Line::from(Span::styled(
                "Press Enter to dismiss",
                Style::default().fg(palette.muted),
            )),
        ])
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .block(
            Block::default()
                .title(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.danger)),
        );

        f.render_widget(Clear, popup);
        f.render_widget(body, popup);
    }
}
