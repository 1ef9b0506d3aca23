use maud::{Markup, PreEscaped, html};

use super::layout::{commit_meta, page_wrapper};
use crate::models::{DocumentPage, FolderPage, NotFoundPage};

pub fn folder_page(page: &FolderPage) -> Markup {
    let body = html! {
        @match &page.index {
            Some(index) => {
                article class="git-docs-document" data-source=(index.name) {
                    (PreEscaped(&index.html))
                }
            }
            None => {
                h1 { "Crivens! There is nothing to render here." }
                p { "If a markdown document is added at this path:" }
                pre { (page.title) "index.md" }
                p { "it will be shown on this page." }
            }
        }
        (commit_meta(&page.last_commit))
    };
    page_wrapper(&page.title, None, &page.explore, body)
}

pub fn document_page(page: &DocumentPage) -> Markup {
    let body = html! {
        article class="git-docs-document" {
            (PreEscaped(&page.html))
        }
        (commit_meta(&page.last_commit))
    };
    page_wrapper(&page.title, Some(&page.base_href), &page.explore, body)
}

pub fn not_found_page(page: &NotFoundPage) -> Markup {
    let body = html! {
        h1 { "Not found" }
        p { "The thing you've been looking for is not here." }
        p class="git-docs-missing" { code { "~/" (page.path) } }
    };
    page_wrapper("Not found", None, &page.explore, body)
}
