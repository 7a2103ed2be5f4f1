use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::{
    store::{Store, Theme},
    tui::ui::Palette,
};

const APP_TITLE: &str = "My Simple Posts";

pub(crate) struct HeaderComponent;

impl Component for HeaderComponent {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let theme = match store.theme() {
            Theme::Dark => "☾ dark",
            Theme::Light => "☀ light",
        };
        let form = if store.form().is_some() {
            "Close"
        } else {
            "Share a fact"
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {APP_TITLE} "),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(format!("[t] {theme}"), Style::default().fg(palette.muted)),
            Span::raw("   "),
            Span::styled(format!("[n] {form}"), Style::default().fg(palette.fg)),
        ]);

        let header = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.muted)),
        );
        f.render_widget(header, area);
    }
}
