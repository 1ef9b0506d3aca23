use crate::error::{AppError, Result};
use crate::git::format_relative_time;
use crate::models::explore::{ExploreLink, Focus, explore_links};
use crate::resource::{Context, Folder, Node, Resource, traverse};

/// Last change of a page's resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub oid: String,
    pub summary: String,
    pub author: String,
    pub timestamp: i64,
    /// Author date in the author's offset, `YYYY-MM-DD HH:MM`.
    pub date: String,
    pub relative_time: String,
}

impl CommitInfo {
    pub fn from_node(node: &Node<'_>) -> Result<Self> {
        let commit = node.last_commit()?;
        Ok(Self {
            oid: commit.id.to_string(),
            summary: commit.summary.clone(),
            author: commit.author_name.clone(),
            timestamp: commit.author_time,
            date: node.date()?.format("%Y-%m-%d %H:%M").to_string(),
            relative_time: format_relative_time(commit.author_time),
        })
    }
}

#[derive(Debug, Clone)]
pub struct FolderPage {
    /// `~/down/` style display path.
    pub title: String,
    pub url: String,
    pub index: Option<RenderedIndex>,
    pub last_commit: CommitInfo,
    pub explore: Vec<ExploreLink>,
}

#[derive(Debug, Clone)]
pub struct RenderedIndex {
    pub name: String,
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub title: String,
    /// URL of the containing folder, so relative links resolve next to the file.
    pub base_href: String,
    pub html: String,
    pub last_commit: CommitInfo,
    pub explore: Vec<ExploreLink>,
}

#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct NotFoundPage {
    pub path: String,
    pub explore: Vec<ExploreLink>,
}

#[derive(Debug, Clone)]
pub enum Page {
    Folder(FolderPage),
    Document(DocumentPage),
    File(FilePayload),
    NotFound(NotFoundPage),
}

impl Page {
    /// Resolves `segments` and collects everything the views need.
    ///
    /// A failed lookup becomes a `NotFound` page listing the root; any other
    /// error is returned.
    pub fn resolve<S: AsRef<str>>(ctx: Context<'_>, segments: &[S]) -> Result<Page> {
        match traverse(ctx, segments) {
            Ok(traversal) => Self::from_resource(traversal.resource, traversal.parent),
            Err(AppError::NotFound(path)) => {
                tracing::debug!(%path, "not found");
                let root = Folder::root(ctx);
                Ok(Page::NotFound(NotFoundPage {
                    path,
                    explore: explore_links(&root, Focus::None)?,
                }))
            }
            Err(e) => Err(e),
        }
    }

    fn from_resource(resource: Resource<'_>, parent: Option<Folder<'_>>) -> Result<Page> {
        match resource {
            Resource::Root(folder) | Resource::Folder(folder) => {
                let index = match folder.index()? {
                    Some(document) => Some(RenderedIndex {
                        name: document.node().name().unwrap_or_default().to_string(),
                        html: document.render()?,
                    }),
                    None => None,
                };
                let path = folder.node().path();
                Ok(Page::Folder(FolderPage {
                    title: display_path(&path.url()),
                    url: path.url(),
                    index,
                    last_commit: CommitInfo::from_node(folder.node())?,
                    explore: explore_links(&folder, Focus::Folder)?,
                }))
            }
            Resource::Document(document) => {
                let name = document.node().name().unwrap_or_default();
                let explore = match &parent {
                    Some(folder) => explore_links(folder, Focus::Document(name))?,
                    None => Vec::new(),
                };
                let base_href = document
                    .node()
                    .path()
                    .parent()
                    .map(|p| p.url())
                    .unwrap_or_else(|| "/".to_string());
                Ok(Page::Document(DocumentPage {
                    title: name.to_string(),
                    base_href,
                    html: document.render()?,
                    last_commit: CommitInfo::from_node(document.node())?,
                    explore,
                }))
            }
            Resource::File(file) => Ok(Page::File(FilePayload {
                name: file.node().name().unwrap_or_default().to_string(),
                data: file.data()?.to_vec(),
            })),
        }
    }
}

fn display_path(url: &str) -> String {
    format!("~{}", url)
}
