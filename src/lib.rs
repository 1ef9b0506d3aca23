//! Git Docs - serve the head commit of a git repository as documents
//!
//! Folders become listings, Markdown and text files are rendered to HTML,
//! and every other file is streamed as a download.
//!
//! - `git`: read-only repository access (`ObjectStore`, `GitRepository`)
//! - `resource`: path resolution, listings and last-change lookup
//! - `markup`: extension to renderer dispatch
//! - `models`, `views`, `routes`: the HTTP surface

pub mod config;
pub mod error;
pub mod git;
pub mod markup;
pub mod models;
pub mod resource;
pub mod routes;
pub mod views;

pub use config::{Cli, Config};
pub use error::{AppError, Result};
pub use git::{GitRepository, ObjectStore};
pub use markup::{MarkupRegistry, Renderer};
pub use resource::{Context, Document, Folder, OpaqueFile, Resource, traverse};
