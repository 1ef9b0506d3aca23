use std::cell::OnceCell;

use crate::error::{AppError, Result};
use crate::git::{EntryKind, TreeEntry, is_hidden};
use crate::resource::node::{Node, cached};
use crate::resource::{Context, Document, OpaqueFile, Resource};

/// A git tree: the repository root or one of its sub-directories.
pub struct Folder<'r> {
    node: Node<'r>,
    index: OnceCell<Option<Document<'r>>>,
}

impl<'r> Folder<'r> {
    /// The folder backed by the head commit's tree.
    pub fn root(ctx: Context<'r>) -> Self {
        Self::new(Node::head(ctx))
    }

    pub(crate) fn new(node: Node<'r>) -> Self {
        Self {
            node,
            index: OnceCell::new(),
        }
    }

    pub fn node(&self) -> &Node<'r> {
        &self.node
    }

    pub fn is_root(&self) -> bool {
        self.node.entry().is_none()
    }

    /// Looks up a direct child by its literal name.
    pub fn resolve_child(&self, name: &str) -> Result<Resource<'r>> {
        let not_found = || AppError::NotFound(self.node.path().join(name).git_path());

        if is_hidden(name) {
            tracing::debug!(name, "refusing hidden entry");
            return Err(not_found());
        }

        let entry = self
            .node
            .object()?
            .entries()
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(not_found)?;

        match entry.kind {
            EntryKind::Tree => Ok(Resource::Folder(self.folder_child(entry))),
            EntryKind::Blob => match self.document_child(entry) {
                Some(document) => Ok(Resource::Document(document)),
                None => Ok(Resource::File(OpaqueFile::new(self.child_node(entry)))),
            },
            EntryKind::Other => Err(not_found()),
        }
    }

    /// The first `index.*` blob with a renderer, in tree order.
    pub fn index(&self) -> Result<Option<&Document<'r>>> {
        let index = cached(&self.index, || {
            let tree = self.node.object()?;
            Ok(tree
                .entries()
                .iter()
                .filter(|entry| entry.kind == EntryKind::Blob && !entry.is_hidden())
                .filter(|entry| entry.name.to_lowercase().starts_with("index."))
                .find_map(|entry| self.document_child(entry)))
        })?;
        Ok(index.as_ref())
    }

    /// Listed children: folders first, then renderable documents, each sorted
    /// case-insensitively. Hidden entries, blobs without a renderer and the
    /// index document are left out.
    pub fn children(&self) -> Result<impl Iterator<Item = Resource<'r>> + '_> {
        let index_name = self
            .index()?
            .and_then(|document| document.node().name())
            .map(str::to_owned);

        let mut visible: Vec<&TreeEntry> = self
            .node
            .object()?
            .entries()
            .iter()
            .filter(|entry| !entry.is_hidden())
            .collect();
        visible.sort_by_cached_key(|entry| entry.name.to_lowercase());

        let (trees, blobs): (Vec<&TreeEntry>, Vec<&TreeEntry>) = visible
            .into_iter()
            .filter(|entry| entry.kind != EntryKind::Other)
            .partition(|entry| entry.kind == EntryKind::Tree);

        let folders = trees
            .into_iter()
            .map(move |entry| Resource::Folder(self.folder_child(entry)));
        let documents = blobs
            .into_iter()
            .filter(move |entry| index_name.as_deref() != Some(entry.name.as_str()))
            .filter_map(move |entry| self.document_child(entry).map(Resource::Document));

        Ok(folders.chain(documents))
    }

    fn child_node(&self, entry: &TreeEntry) -> Node<'r> {
        Node::from_entry(self.node.context(), self.node.path(), entry.clone())
    }

    fn folder_child(&self, entry: &TreeEntry) -> Folder<'r> {
        Folder::new(self.child_node(entry))
    }

    fn document_child(&self, entry: &TreeEntry) -> Option<Document<'r>> {
        let renderer = self.node.context().markup.renderer_for(&entry.name)?;
        Some(Document::new(self.child_node(entry), renderer))
    }
}
