//! Command line and validated runtime configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{AppError, Result};
use crate::markup::MarkupRegistry;

/// Git Docs - Browse the latest commit of a repository as rendered documents
#[derive(Parser, Debug)]
#[command(name = "git-docs")]
#[command(about = "Serves a git repository's head commit as browsable documents", long_about = None)]
pub struct Cli {
    /// Path to the git repository to serve (bare or not)
    #[arg(value_name = "REPO_PATH")]
    pub repo_path: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    pub port: u16,

    /// Open browser automatically after starting
    #[arg(short, long)]
    pub open: bool,

    /// Extra file extension rendered as Markdown, e.g. `.markdown`
    #[arg(long = "markdown-extension", value_name = "EXT")]
    pub markdown_extensions: Vec<String>,

    /// Stop last-change lookups after scanning this many commits
    #[arg(long, value_name = "N")]
    pub max_history_commits: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub repository_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub open: bool,
    pub markdown_extensions: Vec<String>,
    pub max_history_commits: Option<usize>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let repository_path = cli
            .repo_path
            .ok_or_else(|| AppError::Configuration("repository path not set".to_string()))?;

        for extension in &cli.markdown_extensions {
            if !extension.starts_with('.') || extension.len() < 2 {
                return Err(AppError::Configuration(format!(
                    "markdown extension must look like `.ext`, got `{}`",
                    extension
                )));
            }
        }

        if cli.max_history_commits == Some(0) {
            return Err(AppError::Configuration(
                "max history commits must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            repository_path,
            host: cli.host,
            port: cli.port,
            open: cli.open,
            markdown_extensions: cli.markdown_extensions,
            max_history_commits: cli.max_history_commits,
        })
    }

    pub fn markup(&self) -> MarkupRegistry {
        MarkupRegistry::with_markdown_extensions(&self.markdown_extensions)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
