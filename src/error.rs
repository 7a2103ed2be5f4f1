use std::io;

use thiserror::Error;

use crate::post::PostId;

/// Startup and terminal failures. Printed by `main` before exiting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open config: {0}")]
    ConfigOpen(#[source] io::Error),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[source] serde_yaml::Error),
    #[error("Config is missing `{0}`")]
    ConfigMissing(&'static str),
    #[error("Failed to open log file: {0}")]
    LogFile(#[source] io::Error),
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Any failed call against the remote store.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Scheme(#[from] serde_json::Error),
    #[error("API returned error {code}: {message}")]
    Server { code: String, message: String },
    #[error("no post with id {0}")]
    NotFound(PostId),
}

/// Reasons the submission gate rejects a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the post text is empty")]
    EmptyText,
    #[error("the post should be {max} characters max (got {len})")]
    TextTooLong { len: usize, max: usize },
    #[error("the source must be an http(s) URL")]
    InvalidSource,
    #[error("choose a category")]
    MissingCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
}
