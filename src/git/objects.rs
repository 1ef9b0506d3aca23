//! Owned git values and the `ObjectStore` seam.
//!
//! The resource tree only ever talks to an `ObjectStore`; the git2 backed
//! implementation lives in `repository.rs`. Keeping the values owned means a
//! node can cache them without borrowing from libgit2 handles.

use git2::Oid;

use crate::error::Result;

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Tree,
    Blob,
    /// Gitlinks and anything else that is neither a tree nor a blob.
    Other,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Tree => "tree",
            EntryKind::Blob => "blob",
            EntryKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub id: Oid,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn is_hidden(&self) -> bool {
        is_hidden(&self.name)
    }
}

/// Names starting with a dot are never resolvable and never listed.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitObject {
    /// Entries in the order the tree stores them.
    Tree(Vec<TreeEntry>),
    Blob(Vec<u8>),
    Other,
}

impl GitObject {
    pub fn entries(&self) -> &[TreeEntry] {
        match self {
            GitObject::Tree(entries) => entries,
            _ => &[],
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            GitObject::Blob(data) => data,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: Oid,
    pub tree_id: Oid,
    pub summary: String,
    pub author_name: String,
    /// Seconds since the epoch.
    pub author_time: i64,
    /// Author's UTC offset in minutes.
    pub author_offset: i32,
    pub parents: Vec<Oid>,
}

pub type CommitWalk<'a> = Box<dyn Iterator<Item = Result<Commit>> + 'a>;

/// Read-only access to a git object database.
pub trait ObjectStore {
    /// Look up an object. An unknown id is `AppError::ObjectMissing`.
    fn object(&self, id: Oid) -> Result<GitObject>;

    fn head_commit(&self) -> Result<Commit>;

    /// Every commit reachable from head, newest first.
    fn walk_commits(&self) -> Result<CommitWalk<'_>>;

    /// Entry at a slash separated `path` below the tree `tree_id`.
    fn entry_at(&self, tree_id: Oid, path: &str) -> Result<Option<TreeEntry>> {
        let mut current = tree_id;
        let mut found: Option<TreeEntry> = None;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if found.as_ref().is_some_and(|e| e.kind != EntryKind::Tree) {
                return Ok(None);
            }
            let tree = self.object(current)?;
            let Some(entry) = tree.entries().iter().find(|e| e.name == segment) else {
                return Ok(None);
            };
            current = entry.id;
            found = Some(entry.clone());
        }
        Ok(found)
    }
}
