use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use super::Component;
use crate::{
    category,
    store::{CategoryFilter, Store},
    tui::ui::{color, Palette},
};

/// The category filter.
pub(crate) struct SidebarComponent;

impl Component for SidebarComponent {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let active = store.filter();
        let marker = |selected: bool| if selected { "▶ " } else { "  " };

        let mut items = vec![ListItem::new(Line::from(format!(
            "{}All",
            marker(active == CategoryFilter::All)
        )))
        .style(Style::default().fg(palette.fg).add_modifier(Modifier::BOLD))];

        items.extend(category::all().iter().map(|c| {
            let selected = active.name() == Some(c.name);
            let mut style = Style::default().fg(Color::White).bg(color(c.color));
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(format!("{}{}", marker(selected), c.name))).style(style)
        }));

        let list = List::new(items).block(
            Block::default()
                .title(" Categories ")
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(palette.muted)),
        );
        f.render_widget(list, area);
    }
}
