use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use super::components::{
    Component, FormComponent, HeaderComponent, NoticeComponent, PostListComponent,
    SidebarComponent, SortBarComponent,
};
use crate::{category::Rgb, store::Store, store::Theme};

pub(crate) struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub danger: Color,
}

impl Palette {
    pub fn of(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::Rgb(0xfa, 0xfa, 0xf9),
                bg: Color::Rgb(0x29, 0x25, 0x24),
                muted: Color::Rgb(0xa8, 0xa2, 0x9e),
                accent: Color::Rgb(0x3b, 0x82, 0xf6),
                highlight: Color::Rgb(0x44, 0x40, 0x3c),
                danger: Color::Rgb(0xef, 0x44, 0x44),
            },
            Theme::Light => Self {
                fg: Color::Rgb(0x1c, 0x19, 0x17),
                bg: Color::Rgb(0xfa, 0xfa, 0xf9),
                muted: Color::Rgb(0x78, 0x71, 0x6c),
                accent: Color::Rgb(0x25, 0x63, 0xeb),
                highlight: Color::Rgb(0xe7, 0xe5, 0xe4),
                danger: Color::Rgb(0xdc, 0x26, 0x26),
            },
        }
    }
}

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

const FORM_HEIGHT: u16 = 7;
const SIDEBAR_WIDTH: u16 = 20;

pub(crate) fn draw(f: &mut Frame, store: &Store, now: DateTime<Utc>) {
    let palette = Palette::of(store.theme());
    f.render_widget(
        Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
        f.area(),
    );

    let form_height = if store.form().is_some() { FORM_HEIGHT } else { 0 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(form_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    HeaderComponent.render(f, main_chunks[0], store, &palette);
    if store.form().is_some() {
        FormComponent.render(f, main_chunks[1], store, &palette);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(main_chunks[2]);
    SidebarComponent.render(f, body[0], store, &palette);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body[1]);
    SortBarComponent.render(f, content[0], store, &palette);
    PostListComponent { now }.render(f, content[1], store, &palette);

    render_footer(f, main_chunks[3], store, &palette);

    if store.notice().is_some() {
        NoticeComponent.render(f, f.area(), store, &palette);
    }
}

fn render_footer(f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
    let help = if store.form().is_some() {
        "type to edit · Tab next field · ←/→ category · Enter post · Esc close"
    } else {
        "↑/↓ select · 1/2/3 vote · i/m/x sort · a/c/C filter · n share · r refresh · t theme · q quit"
    };

    f.render_widget(
        Paragraph::new(Line::from(help)).style(Style::default().fg(palette.muted)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::{
        form::FormEdit,
        post::{sample, Post, PostId, VoteColumn},
        store::Action,
    };

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + 3_600, 0).unwrap()
    }

    fn with_posts(posts: Vec<Post>) -> Store {
        let mut store = Store::new(Theme::Dark);
        store.dispatch(Action::Refresh);
        store.dispatch(Action::FetchDone {
            seq: 1,
            result: Ok(posts),
        });
        store
    }

    fn render_buffer(store: &Store) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, store, now())).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Background of the first cell where `text` starts on screen.
    fn background_of(buffer: &Buffer, text: &str) -> Option<Color> {
        let area = buffer.area;
        let wanted: Vec<String> = text.chars().map(String::from).collect();
        for y in 0..area.height {
            let row: Vec<&str> = (0..area.width).map(|x| buffer[(x, y)].symbol()).collect();
            if let Some(x) = row.windows(wanted.len()).position(|w| w == wanted.as_slice()) {
                return Some(buffer[(x as u16, y)].bg);
            }
        }
        None
    }

    fn render(store: &Store) -> String {
        let buffer = render_buffer(store);
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_loading_while_fetching() {
        let mut store = Store::new(Theme::Dark);
        store.dispatch(Action::Refresh);

        let screen = render(&store);
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains("No posts to show"));
    }

    #[test]
    fn shows_empty_message() {
        let screen = render(&with_posts(vec![]));
        assert!(screen.contains("No posts to show"));
    }

    #[test]
    fn lists_posts_with_count_and_age() {
        let screen = render(&with_posts(vec![
            sample(1, "science", (1, 0, 0)),
            sample(2, "news", (0, 0, 0)),
        ]));

        assert!(screen.contains("post number 1"));
        assert!(screen.contains("post number 2"));
        assert!(screen.contains("There are 2 posts in total"));
        assert!(screen.contains("59m ago"));
        assert!(screen.contains(" science "));
        assert!(screen.contains("My Simple Posts"));
    }

    #[test]
    fn marks_disputed_posts() {
        let screen = render(&with_posts(vec![sample(1, "news", (2, 1, 3))]));
        assert!(screen.contains("[DISPUTED]"));

        let screen = render(&with_posts(vec![sample(1, "news", (3, 3, 3))]));
        assert!(!screen.contains("[DISPUTED]"));
    }

    #[test]
    fn unknown_category_still_renders() {
        let mut store = with_posts(vec![sample(1, "gossip", (0, 0, 0))]);
        let screen = render(&store);
        assert!(screen.contains("unknown categories: gossip"));

        store.dispatch(Action::DismissNotice);
        let screen = render(&store);
        assert!(screen.contains(" gossip "));
        assert!(screen.contains("post number 1"));
    }

    #[test]
    fn highlights_active_sort() {
        let mut store = with_posts(vec![sample(1, "news", (0, 0, 0))]);
        store.dispatch(Action::ToggleSort(VoteColumn::Mindblowing));

        let buffer = render_buffer(&store);
        let accent = Palette::of(Theme::Dark).accent;
        assert_eq!(background_of(&buffer, "Sort by Mindblowing"), Some(accent));
        assert_ne!(background_of(&buffer, "Sort by Interesting"), Some(accent));
        assert_ne!(background_of(&buffer, "Sort by False"), Some(accent));
    }

    #[test]
    fn form_shows_length_warning() {
        let mut store = with_posts(vec![]);
        store.dispatch(Action::ToggleForm);
        store.dispatch(Action::EditForm(FormEdit::SetText("z".repeat(201))));

        let screen = render(&store);
        assert!(screen.contains("Share a fact"));
        assert!(screen.contains("201/200"));
        assert!(screen.contains("The post should be 200 characters max."));
        assert!(screen.contains("http://example.com"));
    }

    #[test]
    fn failed_fetch_keeps_list_behind_notice() {
        let mut store = with_posts(vec![sample(7, "news", (0, 0, 0))]);
        store.dispatch(Action::Refresh);
        store.dispatch(Action::FetchDone {
            seq: 2,
            result: Err(crate::error::GatewayError::NotFound(PostId::Number(7))),
        });

        let screen = render(&store);
        assert!(screen.contains("There was a problem getting data"));
        assert!(screen.contains("There are 1 posts in total"));
    }
}
