//! Repository access: owned git values, the `ObjectStore` trait and its git2
//! implementation.

pub mod objects;
pub mod repository;

pub use objects::{Commit, CommitWalk, EntryKind, GitObject, ObjectStore, TreeEntry, is_hidden};
pub use repository::{GitRepository, SharedRepo, format_relative_time};
