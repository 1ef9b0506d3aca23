//! End-to-end tests for the browse and asset handlers.
//!
//! Handlers are called directly with extracted arguments and their responses
//! are read back with `axum::body::to_bytes`.

mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use git_docs::routes::{AppState, assets, browse};
use git_docs::{GitRepository, MarkupRegistry};

use common::{DocsRepo, docs_repo};

struct Server {
    _docs: DocsRepo,
    state: AppState,
}

fn server() -> Result<Server> {
    let docs = docs_repo()?;
    let repo = GitRepository::open(docs.fixture.dir.path())?;
    let state = AppState {
        repo: Arc::new(repo),
        markup: Arc::new(MarkupRegistry::default()),
        history_limit: None,
    };
    Ok(Server { _docs: docs, state })
}

impl Server {
    async fn get(&self, path: &str) -> Response {
        let state = State(self.state.clone());
        let result = if path.is_empty() {
            browse::browse_root(state).await
        } else {
            browse::browse(state, Path(path.to_string())).await
        };
        result.into_response()
    }
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn header_value(response: &Response, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Asserts each needle occurs in `haystack`, in the given order.
fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match haystack[from..].find(needle) {
            Some(position) => from += position + needle.len(),
            None => panic!("{} missing or out of order in:\n{}", needle, haystack),
        }
    }
}

/// Tests the root renders its index and lists folders before documents.
#[tokio::test]
async fn test_root_page() -> Result<()> {
    let server = server()?;
    let response = server.get("").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("<h1>Git Docs Test Repository</h1>"));
    assert!(!html.contains("<base href="));
    assert_in_order(
        &html,
        &[
            r#"<li class="current"><a href="/">"#,
            r#"href="/down/""#,
            r#"href="/garbled/""#,
            r#"href="/sorting/""#,
            r#"href="/other.md/""#,
            r#"href="/phoenix.md/""#,
        ],
    );
    assert!(!html.contains(r#"href="/index.md/""#));
    assert!(!html.contains("kitten.jpg"));
    assert!(!html.contains(".hidden"));
    assert!(html.contains("Last changed by Carol"));
    Ok(())
}

/// Tests a folder with an index renders it with a parent link.
#[tokio::test]
async fn test_folder_with_index() -> Result<()> {
    let server = server()?;
    let response = server.get("down/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("are a thing</h1>"));
    assert_in_order(
        &html,
        &[
            r#"href="/down/""#,
            r#"href="/""#,
            r#"href="/down/under/""#,
            r#"href="/down/text-rendering.txt/""#,
            r#"href="/down/traversing.md/""#,
        ],
    );
    Ok(())
}

/// Tests a folder without an index explains where one could go.
#[tokio::test]
async fn test_folder_without_index() -> Result<()> {
    let server = server()?;
    let html = body_text(server.get("down/under").await).await?;

    assert!(html.contains("Crivens"));
    assert!(html.contains("If a markdown document is added at this path:"));
    assert!(html.contains("~/down/under/index.md"));
    assert!(html.contains(r#"href="/down/under/missing-index.md/""#));
    Ok(())
}

/// Tests a Markdown document renders with a base href of its folder.
#[tokio::test]
async fn test_markdown_document() -> Result<()> {
    let server = server()?;
    let response = server.get("down/traversing.md").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains(r#"<base href="/down/">"#));
    assert!(html.contains("<h1>Traversing</h1>"));
    assert!(html.contains(r#"<li class="current"><a href="/down/traversing.md/">"#));
    assert!(html.contains("Last changed by Carol"));
    Ok(())
}

/// Tests a text document is rendered line by line.
#[tokio::test]
async fn test_text_document() -> Result<()> {
    let server = server()?;
    let html = body_text(server.get("down/text-rendering.txt").await).await?;

    assert!(html.contains(r#"<base href="/down/">"#));
    assert!(html.contains("Text<br>should be<br>also<br>rendered"));
    assert!(!html.contains("<h1>"));
    Ok(())
}

/// Tests files without a renderer are sent raw.
#[tokio::test]
async fn test_download() -> Result<()> {
    let server = server()?;
    let response = server.get("stream/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/download");
    assert!(response.headers().get(header::ACCEPT_RANGES).is_none());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(body.as_ref(), common::STREAM_DATA);
    Ok(())
}

/// Tests known extensions get a guessed content type.
#[tokio::test]
async fn test_download_with_known_type() -> Result<()> {
    let server = server()?;
    let response = server.get("kitten.jpg").await;

    assert_eq!(header_value(&response, header::CONTENT_TYPE), "image/jpeg");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(body.len(), common::KITTEN_DATA.len());
    Ok(())
}

/// Tests missing and hidden paths render the not-found page.
#[tokio::test]
async fn test_not_found() -> Result<()> {
    let server = server()?;

    for path in ["unknown/", ".hidden", "down/under/missing.md", "down/nope/missing.md", "vendored"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);

        let html = body_text(response).await?;
        assert!(html.contains("been looking for is not here."));
        assert_in_order(&html, &[r#"href="/""#, r#"href="/down/""#, r#"href="/other.md/""#]);
    }
    Ok(())
}

/// Tests a document that is not UTF-8 is a server error.
#[tokio::test]
async fn test_broken_document() -> Result<()> {
    let server = server()?;
    let response = server.get("garbled/broken.md").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

/// Tests the stylesheet is served from the embedded assets.
#[tokio::test]
async fn test_static_assets() -> Result<()> {
    let response = assets::serve_asset(Path("style.css".to_string())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "text/css");

    let missing = assets::serve_asset(Path("missing.css".to_string())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}
