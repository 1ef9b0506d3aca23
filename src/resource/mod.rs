//! The resource tree: a request path resolved against the head commit.
//!
//! - `Folder`: a git tree (`Resource::Root` for the head tree itself)
//! - `Document`: a blob with a markup renderer
//! - `OpaqueFile`: any other blob, served raw
//!
//! Nodes are built on demand while a path is traversed or a folder is
//! listed, live for one request and cache their git object and last-change
//! commit per instance. A node knows its position through its `NodePath`
//! rather than holding its parent.

mod document;
mod folder;
pub mod history;
mod node;

pub use document::{Document, OpaqueFile};
pub use folder::Folder;
pub use node::{Node, Origin};

use crate::error::{AppError, Result};
use crate::git::{EntryKind, ObjectStore};
use crate::markup::MarkupRegistry;

/// Collaborators every node needs.
#[derive(Clone, Copy)]
pub struct Context<'r> {
    pub store: &'r dyn ObjectStore,
    pub markup: &'r MarkupRegistry,
    /// Upper bound on commits scanned per last-change lookup.
    pub history_limit: Option<usize>,
}

impl<'r> Context<'r> {
    pub fn new(store: &'r dyn ObjectStore, markup: &'r MarkupRegistry) -> Self {
        Self {
            store,
            markup,
            history_limit: None,
        }
    }

    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}

/// Names from the root down to a node; empty for the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, ancestors) = self.0.split_last()?;
        Some(Self(ancestors.to_vec()))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// `a/b`, as used for lookups inside a commit's tree.
    pub fn git_path(&self) -> String {
        self.0.join("/")
    }

    /// `/a/b/`; `/` for the root.
    pub fn url(&self) -> String {
        if self.is_root() {
            "/".to_string()
        } else {
            format!("/{}/", self.git_path())
        }
    }
}

pub enum Resource<'r> {
    Root(Folder<'r>),
    Folder(Folder<'r>),
    Document(Document<'r>),
    File(OpaqueFile<'r>),
}

impl<'r> Resource<'r> {
    pub fn node(&self) -> &Node<'r> {
        match self {
            Resource::Root(folder) | Resource::Folder(folder) => folder.node(),
            Resource::Document(document) => document.node(),
            Resource::File(file) => file.node(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.node().name()
    }

    pub fn kind(&self) -> EntryKind {
        self.node().kind()
    }

    pub fn path(&self) -> &NodePath {
        self.node().path()
    }
}

/// Outcome of resolving a path: the resource and the folder it came from.
pub struct Traversal<'r> {
    pub resource: Resource<'r>,
    pub parent: Option<Folder<'r>>,
}

/// Resolves `segments` one at a time, starting at the head tree.
pub fn traverse<'r, S: AsRef<str>>(ctx: Context<'r>, segments: &[S]) -> Result<Traversal<'r>> {
    let mut resource = Resource::Root(Folder::root(ctx));
    let mut parent = None;

    for segment in segments {
        let segment = segment.as_ref();
        let folder = match resource {
            Resource::Root(folder) | Resource::Folder(folder) => folder,
            other => return Err(AppError::NotFound(other.path().join(segment).git_path())),
        };
        resource = folder.resolve_child(segment)?;
        parent = Some(folder);
    }

    tracing::debug!(path = %resource.path().git_path(), kind = resource.kind().as_str(), "resolved");
    Ok(Traversal { resource, parent })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_path_root() {
        let root = NodePath::root();

        assert!(root.is_root());
        assert_eq!(root.git_path(), "");
        assert_eq!(root.url(), "/");
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_node_path_join_and_parent() {
        let path = NodePath::root().join("down").join("under");

        assert_eq!(path.git_path(), "down/under");
        assert_eq!(path.url(), "/down/under/");
        assert_eq!(path.parent(), Some(NodePath::root().join("down")));
        assert_eq!(path.segments(), ["down".to_string(), "under".to_string()]);
    }
}
