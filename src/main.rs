//! Git Docs - browse a repository's latest commit as rendered documents
//!
//! # Usage
//! ```bash
//! git-docs /path/to/repository.git                 # Start server
//! git-docs /path/to/repository.git --open          # Start and open browser
//! git-docs repo.git --markdown-extension .markdown # Render .markdown too
//! ```

use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_docs::routes::{self, AppState};
use git_docs::{Cli, Config, GitRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_cli(cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ {}", e);
            eprintln!("Usage: git-docs <REPO_PATH> [--open]");
            std::process::exit(2);
        }
    };

    // Open the git repository
    let repo = match GitRepository::open(&config.repository_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", config.repository_path.display());
            std::process::exit(1);
        }
    };

    let state = AppState::new(Arc::new(repo), &config);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://{}", addr);
    println!();
    println!("  Repository: {}", config.repository_path.display());
    println!("  Server:     {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if config.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
