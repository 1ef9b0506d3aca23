use std::cell::OnceCell;

use chrono::{DateTime, FixedOffset};

use crate::error::{AppError, Result};
use crate::git::{Commit, EntryKind, GitObject, TreeEntry};
use crate::resource::history;
use crate::resource::{Context, NodePath};

/// Where a node's object comes from.
#[derive(Debug, Clone)]
pub enum Origin {
    /// The head commit's tree.
    Head,
    /// An entry of the parent folder's tree.
    Entry(TreeEntry),
}

/// State shared by every resource variant.
///
/// `object` and `last_commit` are computed on first access and kept for the
/// lifetime of the node; nothing is shared between node instances.
pub struct Node<'r> {
    ctx: Context<'r>,
    path: NodePath,
    origin: Origin,
    object: OnceCell<GitObject>,
    last_commit: OnceCell<Commit>,
}

impl<'r> Node<'r> {
    pub fn head(ctx: Context<'r>) -> Self {
        Self::new(ctx, NodePath::root(), Origin::Head)
    }

    pub fn from_entry(ctx: Context<'r>, parent: &NodePath, entry: TreeEntry) -> Self {
        let path = parent.join(&entry.name);
        Self::new(ctx, path, Origin::Entry(entry))
    }

    fn new(ctx: Context<'r>, path: NodePath, origin: Origin) -> Self {
        Self {
            ctx,
            path,
            origin,
            object: OnceCell::new(),
            last_commit: OnceCell::new(),
        }
    }

    pub fn context(&self) -> Context<'r> {
        self.ctx
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        match &self.origin {
            Origin::Head => None,
            Origin::Entry(entry) => Some(&entry.name),
        }
    }

    pub fn entry(&self) -> Option<&TreeEntry> {
        match &self.origin {
            Origin::Head => None,
            Origin::Entry(entry) => Some(entry),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match &self.origin {
            Origin::Head => EntryKind::Tree,
            Origin::Entry(entry) => entry.kind,
        }
    }

    pub fn object(&self) -> Result<&GitObject> {
        cached(&self.object, || match &self.origin {
            Origin::Head => {
                let tree_id = self.last_commit()?.tree_id;
                self.ctx.store.object(tree_id)
            }
            Origin::Entry(entry) => self.ctx.store.object(entry.id),
        })
    }

    /// The commit that introduced this node's current content.
    pub fn last_commit(&self) -> Result<&Commit> {
        cached(&self.last_commit, || match &self.origin {
            Origin::Head => self.ctx.store.head_commit(),
            Origin::Entry(entry) => history::last_change(&self.ctx, &self.path.git_path(), entry.id),
        })
    }

    pub fn author(&self) -> Result<&str> {
        Ok(&self.last_commit()?.author_name)
    }

    /// Author date of the last change, in the author's own offset.
    pub fn date(&self) -> Result<DateTime<FixedOffset>> {
        let commit = self.last_commit()?;
        let offset = FixedOffset::east_opt(commit.author_offset * 60)
            .ok_or_else(|| AppError::Internal(format!("invalid offset in commit {}", commit.id)))?;
        let utc = DateTime::from_timestamp(commit.author_time, 0)
            .ok_or_else(|| AppError::Internal(format!("invalid timestamp in commit {}", commit.id)))?;
        Ok(utc.with_timezone(&offset))
    }
}

/// Returns the cached value, computing it first if the cell is empty.
pub(crate) fn cached<T>(cell: &OnceCell<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}
