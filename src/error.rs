use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Shown to the end user for every failure, whatever its kind.
pub const USER_FACING_ERROR: &str =
    "Hubo un error al generar la descripción. Por favor, intenta de nuevo.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transport error{}: {message}", status_suffix(.status))]
    Transport { status: Option<u16>, message: String },

    #[error("rate limited by the generation service{}", retry_suffix(.retry_after))]
    RateLimit { retry_after: Option<Duration> },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("schema mismatch on field `{field}`: {reason}")]
    SchemaMismatch { field: &'static str, reason: String },

    #[error("field `{field}` is empty")]
    EmptyField { field: &'static str },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

fn retry_suffix(retry_after: &Option<Duration>) -> String {
    retry_after
        .map(|d| format!(", retry after {}s", d.as_secs()))
        .unwrap_or_default()
}

/// Fieldless mirror of [`GenerationError`], carried by the published state.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidInput,
    Transport,
    RateLimit,
    MalformedResponse,
    SchemaMismatch,
    EmptyField,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            Self::EmptyField { .. } => ErrorKind::EmptyField,
        }
    }

    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport { status: None, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
