use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::Component;
use crate::{
    category,
    format::time_ago,
    post::{Post, VoteColumn},
    store::Store,
    tui::ui::{color, Palette},
    vote::VoteTracker,
};

pub(crate) struct PostListComponent {
    pub now: DateTime<Utc>,
}

impl PostListComponent {
    fn item(
        &self,
        post: &Post,
        tracker: Option<&VoteTracker>,
        palette: &Palette,
    ) -> ListItem<'static> {
        let mut headline = Vec::new();
        if post.is_disputed() {
            headline.push(Span::styled(
                "⛔️ [DISPUTED] ",
                Style::default()
                    .fg(palette.danger)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        headline.push(Span::raw(post.text.clone()));
        headline.push(Span::styled(
            format!("  {}", time_ago(post.created_at, self.now)),
            Style::default().fg(palette.muted),
        ));

        // Rendering must not fail on bad rows; the store reports them.
        let tag_color = category::color_of(&post.category).unwrap_or(category::FALLBACK_COLOR);
        let mut details = vec![
            Span::styled(
                format!(" {} ", post.category),
                Style::default().fg(Color::White).bg(color(tag_color)),
            ),
            Span::raw("  "),
        ];

        let selected = tracker.and_then(VoteTracker::selected);
        let pending = tracker.is_some_and(VoteTracker::is_pending);
        for column in VoteColumn::ALL {
            let mut style = Style::default().fg(palette.fg);
            if selected == Some(column) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if pending {
                style = style.add_modifier(Modifier::DIM);
            }
            details.push(Span::styled(
                format!("{} {}", column.emoji(), post.votes(column)),
                style,
            ));
            details.push(Span::raw("  "));
        }
        details.push(Span::styled(
            format!("(Source) {}", post.source),
            Style::default().fg(palette.muted),
        ));

        ListItem::new(Text::from(vec![
            Line::from(headline),
            Line::from(details),
            Line::default(),
        ]))
    }
}

impl Component for PostListComponent {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let message = |text: &'static str| {
            Paragraph::new(Line::from(text)).style(Style::default().fg(palette.muted))
        };

        if store.is_loading() {
            f.render_widget(message("Loading..."), area);
            return;
        }
        if store.posts().is_empty() {
            f.render_widget(message("No posts to show"), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let items: Vec<ListItem> = store
            .posts()
            .iter()
            .map(|post| self.item(post, store.vote_tracker(&post.id), palette))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(palette.highlight))
            .highlight_symbol("▌ ");
        let mut state = ListState::default().with_selected(Some(store.cursor()));
        f.render_stateful_widget(list, chunks[0], &mut state);

        f.render_widget(
            total_line(store.posts().len()).style(Style::default().fg(palette.muted)),
            chunks[1],
        );
    }
}

fn total_line(count: usize) -> Paragraph<'static> {
    Paragraph::new(format!("There are {count} posts in total"))
}
