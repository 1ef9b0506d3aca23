//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for every failure the resource tree, the repository
//! adapter and the bootstrap layer can report, and implements Axum's
//! `IntoResponse` so handlers can return them directly.
//!
//! Error mappings:
//! - `NotFound` → 404
//! - `Encoding`, `ObjectMissing`, `Git`, `Internal` → 500
//! - `Configuration`, `RepoNotFound` → startup only, 500 if ever served

use std::str::Utf8Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{path} is not valid UTF-8 text")]
    Encoding {
        path: String,
        #[source]
        source: Utf8Error,
    },

    #[error("Object {0} is missing from the object store")]
    ObjectMissing(git2::Oid),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
