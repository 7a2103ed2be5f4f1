use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::{
    form::{FormField, PostForm, MAX_TEXT_LEN},
    store::Store,
    tui::ui::Palette,
};

pub(crate) struct FormComponent;

fn field(
    form: &PostForm,
    which: FormField,
    label: &str,
    value: String,
    palette: &Palette,
) -> Line<'static> {
    let focused = form.focus == which && !form.uploading;
    let label_style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };
    let cursor = if focused && which != FormField::Category {
        "▏"
    } else {
        ""
    };

    Line::from(vec![
        Span::styled(format!("{} {label:<9}", if focused { "›" } else { " " }), label_style),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(palette.accent)),
    ])
}

impl Component for FormComponent {
    fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        let Some(form) = store.form() else {
            return;
        };

        let category = match form.category {
            Some(c) => format!("◀ {} ▶", c.name),
            None => "◀ Choose category: ▶".to_owned(),
        };

        let mut counter = vec![Span::styled(
            format!("{:11}{}/{}", "", form.text_len(), MAX_TEXT_LEN),
            Style::default().fg(palette.muted),
        )];
        if form.is_too_long() {
            counter.push(Span::styled(
                format!("  The post should be {MAX_TEXT_LEN} characters max."),
                Style::default().fg(palette.danger),
            ));
        }

        let status = if form.uploading {
            Span::styled("Uploading...", Style::default().fg(palette.accent))
        } else {
            Span::styled("Press Enter to post", Style::default().fg(palette.muted))
        };

        let lines = vec![
            field(form, FormField::Text, "Text", form.text.clone(), palette),
            Line::from(counter),
            field(form, FormField::Source, "Source", form.source.clone(), palette),
            field(form, FormField::Category, "Category", category, palette),
            Line::from(status),
        ];

        let panel = Paragraph::new(lines).block(
            Block::default()
                .title(" Share a fact ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
        f.render_widget(panel, area);
    }
}
