//! HTTP routes - maps request paths onto the resource tree.
//!
//! - `browse`: every path below `/`, resolved against the head commit
//! - `assets`: the embedded stylesheet under `/static/`

pub mod assets;
pub mod browse;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::Config;
use crate::git::SharedRepo;
use crate::markup::MarkupRegistry;

/// Shared by every request; nodes themselves are never shared.
#[derive(Clone)]
pub struct AppState {
    pub repo: SharedRepo,
    pub markup: Arc<MarkupRegistry>,
    pub history_limit: Option<usize>,
}

impl AppState {
    pub fn new(repo: SharedRepo, config: &Config) -> Self {
        Self {
            repo,
            markup: Arc::new(config.markup()),
            history_limit: config.max_history_commits,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/static/{*file}", get(assets::serve_asset))
        .route("/", get(browse::browse_root))
        .route("/{*path}", get(browse::browse))
        .with_state(state)
}
