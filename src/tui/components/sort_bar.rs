use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::{post::VoteColumn, store::Store, tui::ui::Palette};

pub(crate) struct SortBarComponent;

fn key(column: VoteColumn) -> char {
    match column {
        VoteColumn::Interesting => 'i',
        VoteColumn::Mindblowing => 'm',
        VoteColumn::False => 'x',
    }
}

impl Component for SortBarComponent {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let mut spans = Vec::new();
        for column in VoteColumn::ALL {
            let style = if store.sort() == Some(column) {
                Style::default()
                    .fg(Color::White)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            spans.push(Span::styled(
                format!(" Sort by {} [{}] ", column.label(), key(column)),
                style,
            ));
            spans.push(Span::raw(" "));
        }

        let bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(" Sorting Posts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );
        f.render_widget(bar, area);
    }
}
