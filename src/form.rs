use url::Url;

use crate::{
    category::{self, Category},
    error::ValidationError,
    post::NewPost,
};

pub const MAX_TEXT_LEN: usize = 200;
pub const DEFAULT_SOURCE: &str = "http://example.com";

/// True iff `input` parses as an absolute `http` or `https` URL.
pub fn is_valid_http_url(input: &str) -> bool {
    Url::parse(input)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Source,
    Category,
}

/// Draft edits coming from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    Insert(char),
    Backspace,
    NextField,
    PreviousField,
    NextCategory,
    PreviousCategory,
    SetText(String),
    SetSource(String),
    SetCategory(Option<&'static Category>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub text: String,
    pub source: String,
    pub category: Option<&'static Category>,
    pub focus: FormField,
    pub uploading: bool,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            source: DEFAULT_SOURCE.to_owned(),
            category: None,
            focus: FormField::Text,
            uploading: false,
        }
    }
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Text => Self::Source,
            Self::Source => Self::Category,
            Self::Category => Self::Text,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Text => Self::Category,
            Self::Source => Self::Text,
            Self::Category => Self::Source,
        }
    }
}

impl PostForm {
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_too_long(&self) -> bool {
        self.text_len() > MAX_TEXT_LEN
    }

    /// Applies an edit. Ignored while an upload is in flight.
    pub fn edit(&mut self, edit: FormEdit) {
        if self.uploading {
            return;
        }

        match edit {
            FormEdit::Insert(c) => match self.focus {
                FormField::Text => self.text.push(c),
                FormField::Source => self.source.push(c),
                FormField::Category => {}
            },
            FormEdit::Backspace => match self.focus {
                FormField::Text => {
                    self.text.pop();
                }
                FormField::Source => {
                    self.source.pop();
                }
                FormField::Category => self.category = None,
            },
            FormEdit::NextField => self.focus = self.focus.next(),
            FormEdit::PreviousField => self.focus = self.focus.previous(),
            FormEdit::NextCategory => self.cycle_category(1),
            FormEdit::PreviousCategory => self.cycle_category(category::all().len() - 1),
            FormEdit::SetText(text) => self.text = text,
            FormEdit::SetSource(source) => self.source = source,
            FormEdit::SetCategory(category) => self.category = category,
        }
    }

    fn cycle_category(&mut self, step: usize) {
        let all = category::all();
        let next = match self.category {
            Some(current) => (category::index_of(current) + step) % all.len(),
            None if step == 1 => 0,
            None => all.len() - 1,
        };
        self.category = Some(&all[next]);
    }

    /// The submission gate. Collects every failed rule.
    pub fn validate(&self) -> Result<NewPost, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.text.is_empty() {
            errors.push(ValidationError::EmptyText);
        }
        if !is_valid_http_url(&self.source) {
            errors.push(ValidationError::InvalidSource);
        }
        if self.category.is_none() {
            errors.push(ValidationError::MissingCategory);
        }
        let len = self.text_len();
        if len > MAX_TEXT_LEN {
            errors.push(ValidationError::TextTooLong {
                len,
                max: MAX_TEXT_LEN,
            });
        }

        match (errors.is_empty(), self.category) {
            (true, Some(category)) => Ok(NewPost {
                text: self.text.clone(),
                source: self.source.clone(),
                category: category.name.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(text: &str, source: &str, category: &str) -> PostForm {
        PostForm {
            text: text.to_owned(),
            source: source.to_owned(),
            category: category::find(category),
            ..Default::default()
        }
    }

    #[test]
    fn url_validator() {
        assert!(is_valid_http_url("https://example.com"));
        assert!(is_valid_http_url("http://example.com/a?b=c#d"));
        assert!(!is_valid_http_url("ftp://example.com"));
        assert!(!is_valid_http_url("mailto:someone@example.com"));
        assert!(!is_valid_http_url("example.com"));
        assert!(!is_valid_http_url(""));
    }

    #[test]
    fn defaults() {
        let form = PostForm::default();
        assert_eq!(form.text, "");
        assert_eq!(form.source, "http://example.com");
        assert_eq!(form.category, None);
        assert!(!form.uploading);
    }

    #[test]
    fn accepts_exactly_max_length() {
        let text = "a".repeat(200);
        let post = filled(&text, "https://example.com", "news")
            .validate()
            .unwrap();

        assert_eq!(post.text.len(), 200);
        assert_eq!(post.category, "news");
    }

    #[test]
    fn rejects_over_max_length() {
        let text = "a".repeat(201);
        let errors = filled(&text, "https://example.com", "news")
            .validate()
            .unwrap_err();

        assert_eq!(
            errors,
            vec![ValidationError::TextTooLong { len: 201, max: 200 }]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let text = "é".repeat(200);
        assert!(filled(&text, "https://example.com", "news")
            .validate()
            .is_ok());
    }

    #[test]
    fn reports_every_failed_rule() {
        let form = PostForm {
            source: "not a url".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            form.validate().unwrap_err(),
            vec![
                ValidationError::EmptyText,
                ValidationError::InvalidSource,
                ValidationError::MissingCategory,
            ]
        );
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = PostForm {
            source: String::new(),
            ..Default::default()
        };
        form.edit(FormEdit::Insert('h'));
        form.edit(FormEdit::Insert('i'));
        form.edit(FormEdit::NextField);
        form.edit(FormEdit::Insert('x'));
        form.edit(FormEdit::PreviousField);
        form.edit(FormEdit::Backspace);

        assert_eq!(form.text, "h");
        assert_eq!(form.source, "x");
    }

    #[test]
    fn category_cycles_through_registry() {
        let mut form = PostForm::default();
        form.edit(FormEdit::NextCategory);
        assert_eq!(form.category.map(|c| c.name), Some("technology"));

        form.edit(FormEdit::PreviousCategory);
        assert_eq!(form.category.map(|c| c.name), Some("news"));

        form.edit(FormEdit::NextCategory);
        assert_eq!(form.category.map(|c| c.name), Some("technology"));

        let mut form = PostForm::default();
        form.edit(FormEdit::PreviousCategory);
        assert_eq!(form.category.map(|c| c.name), Some("news"));
    }

    #[test]
    fn locked_while_uploading() {
        let mut form = PostForm {
            uploading: true,
            ..Default::default()
        };
        form.edit(FormEdit::Insert('z'));
        form.edit(FormEdit::NextField);

        assert_eq!(form.text, "");
        assert_eq!(form.focus, FormField::Text);
    }
}
