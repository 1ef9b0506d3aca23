//! Page skeleton shared by every HTML view

use maud::{DOCTYPE, Markup, html};

use crate::models::{CommitInfo, ExploreLink, Marker};

/// Wraps page content with the document skeleton and explore sidebar.
///
/// `base_href` is emitted as `<base>` so relative links inside a rendered
/// document resolve against the folder that contains it.
pub fn page_wrapper(title: &str, base_href: Option<&str>, explore: &[ExploreLink], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(href) = base_href {
                    base href=(href);
                }
                title { (title) " - Git Docs" }
                link rel="stylesheet" href="/static/style.css";
            }
            body {
                div class="git-docs" {
                    nav class="git-docs-explore" {
                        (explore_list(explore))
                    }
                    main class="git-docs-content" {
                        (body)
                    }
                }
            }
        }
    }
}

pub fn explore_list(links: &[ExploreLink]) -> Markup {
    html! {
        ul {
            @for link in links {
                li.current[link.marker == Marker::Current] {
                    a href=(link.href) {
                        span class="marker" { (link.marker.symbol()) }
                        " "
                        (link.label)
                    }
                }
            }
        }
    }
}

pub fn commit_meta(commit: &CommitInfo) -> Markup {
    html! {
        footer class="git-docs-meta" title=(commit.oid) {
            "Last changed by " (commit.author) " on " (commit.date)
            " (" (commit.relative_time) ")"
        }
    }
}
