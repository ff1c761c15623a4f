use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Message shown when a supplied identifier cannot be used for a lookup
pub const ID_NOT_FOUND_MESSAGE: &str = "Product ID not found";
/// Fallback message for every error that carries no status of its own
pub const FALLBACK_MESSAGE: &str = "something went wrong";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field violations collected while validating one record, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation failed: {}",
            self.errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .join(", ")
        )
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Cast to Id failed for value \"{value}\"")]
    Cast { value: String },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// An error that already knows how it should be shown
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Text(text) => f.write_str(text),
            ErrorMessage::List(items) => f.write_str(&items.iter().join(", ")),
        }
    }
}

/// The uniform shape every failure is reduced to before it reaches a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub status: StatusCode,
    pub message: ErrorMessage,
}

impl NormalizedError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: ErrorMessage::Text(message.into()),
        }
    }
}

pub fn normalize(err: &CatalogError) -> NormalizedError {
    match err {
        CatalogError::Validation(errors) => {
            log::debug!("{}", errors);
            NormalizedError {
                status: StatusCode::BAD_REQUEST,
                message: ErrorMessage::List(errors.messages()),
            }
        }
        CatalogError::Cast { value } => {
            log::debug!("Rejected malformed id {:?}", value);
            NormalizedError::new(StatusCode::BAD_REQUEST, ID_NOT_FOUND_MESSAGE)
        }
        CatalogError::NotFound { .. } => NormalizedError::new(StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::Http { status, message } => NormalizedError::new(*status, message.clone()),
        CatalogError::Store(e) => {
            log::error!("Unhandled error: {:#}", e);
            NormalizedError::new(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_MESSAGE)
        }
    }
}

impl From<CatalogError> for NormalizedError {
    fn from(err: CatalogError) -> Self {
        normalize(&err)
    }
}

impl IntoResponse for NormalizedError {
    fn into_response(self) -> Response {
        (self.status, self.message.to_string()).into_response()
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        normalize(&self).into_response()
    }
}
