//! Browsing endpoint.
//!
//! GET / and GET /{*path}
//!
//! The path is split into segments and traversed from the head tree:
//! - folders render their index document and a listing
//! - documents render through their markup renderer
//! - other files are sent as raw bytes
//! - anything unresolvable renders the not-found page with status 404

use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::models::{FilePayload, Page};
use crate::resource::Context;
use crate::routes::AppState;
use crate::views;

const FALLBACK_CONTENT_TYPE: &str = "application/download";

pub async fn browse_root(State(state): State<AppState>) -> Result<Response> {
    serve_path(state, String::new()).await
}

pub async fn browse(State(state): State<AppState>, Path(path): Path<String>) -> Result<Response> {
    serve_path(state, path).await
}

async fn serve_path(state: AppState, path: String) -> Result<Response> {
    let page = tokio::task::spawn_blocking(move || {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        state.repo.with_repo(|repo| {
            let ctx = Context::new(repo, &state.markup).with_history_limit(state.history_limit);
            Page::resolve(ctx, &segments)
        })
    })
    .await
    .map_err(|e| AppError::Internal(format!("browse task failed: {}", e)))??;

    Ok(page_response(page))
}

pub fn page_response(page: Page) -> Response {
    match page {
        Page::Folder(folder) => Html(views::folder_page(&folder).into_string()).into_response(),
        Page::Document(document) => Html(views::document_page(&document).into_string()).into_response(),
        Page::NotFound(not_found) => (
            StatusCode::NOT_FOUND,
            Html(views::not_found_page(&not_found).into_string()),
        )
            .into_response(),
        Page::File(file) => file_response(file),
    }
}

fn file_response(file: FilePayload) -> Response {
    let content_type = mime_guess::from_path(&file.name)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

    ([(header::CONTENT_TYPE, content_type)], Body::from(file.data)).into_response()
}
