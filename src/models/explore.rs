use crate::error::Result;
use crate::resource::{Folder, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The page being shown.
    Current,
    Folder,
    Document,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Current => ">",
            Marker::Folder => "d",
            Marker::Document => "f",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreLink {
    pub href: String,
    pub label: String,
    pub marker: Marker,
}

impl ExploreLink {
    fn new(href: String, label: impl Into<String>, marker: Marker) -> Self {
        Self {
            href,
            label: label.into(),
            marker,
        }
    }
}

/// What the explore list is shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus<'a> {
    /// The folder's own page.
    Folder,
    /// A document inside the folder.
    Document(&'a str),
    /// Nothing in the folder, e.g. on the not-found page.
    None,
}

/// `.`, `..` (below the root) and the folder's listed children.
pub fn explore_links(folder: &Folder<'_>, focus: Focus<'_>) -> Result<Vec<ExploreLink>> {
    let path = folder.node().path();
    let self_marker = if focus == Focus::Folder {
        Marker::Current
    } else {
        Marker::Folder
    };

    let mut links = vec![ExploreLink::new(path.url(), ".", self_marker)];
    if let Some(parent) = path.parent() {
        links.push(ExploreLink::new(parent.url(), "..", Marker::Folder));
    }

    for child in folder.children()? {
        let name = child.name().unwrap_or_default().to_string();
        let href = child.path().url();
        let link = match child {
            Resource::Document(_) if focus == Focus::Document(&name) => {
                ExploreLink::new(href, name, Marker::Current)
            }
            Resource::Document(_) | Resource::File(_) => ExploreLink::new(href, name, Marker::Document),
            Resource::Root(_) | Resource::Folder(_) => ExploreLink::new(href, format!("{}/", name), Marker::Folder),
        };
        links.push(link);
    }

    Ok(links)
}
