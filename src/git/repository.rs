use git2::{ErrorCode, ObjectType, Oid, Repository, Sort};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{AppError, Result};
use crate::git::objects::{Commit, CommitWalk, EntryKind, GitObject, ObjectStore, TreeEntry};

/// The repository served by this process.
///
/// libgit2 handles are not `Sync`, so the handle sits behind a mutex and every
/// request checks it out exclusively through `with_repo`.
pub struct GitRepository {
    pub repo: Mutex<Repository>,
    pub path: String,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::open(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;

        tracing::info!(path = %path_str, bare = repo.is_bare(), "opened repository");

        Ok(Self {
            repo: Mutex::new(repo),
            path: path_str,
        })
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }
}

pub type SharedRepo = Arc<GitRepository>;

impl ObjectStore for Repository {
    fn object(&self, id: Oid) -> Result<GitObject> {
        let object = self.find_object(id, None).map_err(|e| missing_or_git(e, id))?;

        let converted = match object.kind() {
            Some(ObjectType::Tree) => match object.as_tree() {
                Some(tree) => GitObject::Tree(tree.iter().map(|entry| to_entry(&entry)).collect()),
                None => GitObject::Other,
            },
            Some(ObjectType::Blob) => match object.as_blob() {
                Some(blob) => GitObject::Blob(blob.content().to_vec()),
                None => GitObject::Other,
            },
            _ => GitObject::Other,
        };
        Ok(converted)
    }

    fn head_commit(&self) -> Result<Commit> {
        let commit = self.head()?.peel_to_commit()?;
        Ok(to_commit(&commit))
    }

    fn walk_commits(&self) -> Result<CommitWalk<'_>> {
        let mut revwalk = self.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        Ok(Box::new(revwalk.map(move |oid| -> Result<Commit> {
            let oid = oid?;
            let commit = self.find_commit(oid).map_err(|e| missing_or_git(e, oid))?;
            Ok(to_commit(&commit))
        })))
    }

    fn entry_at(&self, tree_id: Oid, path: &str) -> Result<Option<TreeEntry>> {
        if path.is_empty() {
            return Ok(None);
        }
        let tree = self.find_tree(tree_id).map_err(|e| missing_or_git(e, tree_id))?;
        match tree.get_path(Path::new(path)) {
            Ok(entry) => Ok(Some(to_entry(&entry))),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn missing_or_git(error: git2::Error, id: Oid) -> AppError {
    if error.code() == ErrorCode::NotFound {
        AppError::ObjectMissing(id)
    } else {
        AppError::Git(error)
    }
}

fn to_entry(entry: &git2::TreeEntry) -> TreeEntry {
    let kind = match entry.kind() {
        Some(ObjectType::Tree) => EntryKind::Tree,
        Some(ObjectType::Blob) => EntryKind::Blob,
        _ => EntryKind::Other,
    };
    TreeEntry {
        name: String::from_utf8_lossy(entry.name_bytes()).to_string(),
        id: entry.id(),
        kind,
    }
}

pub fn to_commit(commit: &git2::Commit) -> Commit {
    let author = commit.author();
    Commit {
        id: commit.id(),
        tree_id: commit.tree_id(),
        summary: commit.summary().unwrap_or("").trim().to_string(),
        author_name: author.name().unwrap_or("Unknown").to_string(),
        author_time: author.when().seconds(),
        author_offset: author.when().offset_minutes(),
        parents: commit.parent_ids().collect(),
    }
}

pub fn format_relative_time(timestamp: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}
