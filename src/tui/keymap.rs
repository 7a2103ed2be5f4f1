use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    form::{FormEdit, FormField},
    post::VoteColumn,
    store::{Action, CategoryFilter, Store},
};

/// Translates a key press into an action for the current screen state.
///
/// A pending notice is modal: only dismissing it (or Ctrl-C) gets through.
pub fn action_for(key: KeyEvent, store: &Store) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    if store.notice().is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Action::DismissNotice),
            _ => None,
        };
    }

    if let Some(form) = store.form() {
        let edit = match key.code {
            KeyCode::Esc => return Some(Action::ToggleForm),
            KeyCode::Enter => return Some(Action::SubmitForm),
            KeyCode::Tab => FormEdit::NextField,
            KeyCode::BackTab => FormEdit::PreviousField,
            KeyCode::Backspace => FormEdit::Backspace,
            KeyCode::Right if form.focus == FormField::Category => FormEdit::NextCategory,
            KeyCode::Left if form.focus == FormField::Category => FormEdit::PreviousCategory,
            KeyCode::Char(c) => FormEdit::Insert(c),
            _ => return None,
        };
        return Some(Action::EditForm(edit));
    }

    // The list is hidden behind the loading indicator, so there is nothing to
    // vote on.
    let vote = |column| {
        if store.is_loading() {
            return None;
        }
        store.selected_post().map(|post| Action::Vote {
            id: post.id.clone(),
            column,
        })
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Char('1') => vote(VoteColumn::Interesting),
        KeyCode::Char('2') => vote(VoteColumn::Mindblowing),
        KeyCode::Char('3') => vote(VoteColumn::False),
        KeyCode::Char('i') => Some(Action::ToggleSort(VoteColumn::Interesting)),
        KeyCode::Char('m') => Some(Action::ToggleSort(VoteColumn::Mindblowing)),
        KeyCode::Char('x') => Some(Action::ToggleSort(VoteColumn::False)),
        KeyCode::Char('a') => Some(Action::SelectFilter(CategoryFilter::All)),
        KeyCode::Char('c') => Some(Action::SelectFilter(store.filter().cycle(true))),
        KeyCode::Char('C') => Some(Action::SelectFilter(store.filter().cycle(false))),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('n') => Some(Action::ToggleForm),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        _ => None,
    }
}
