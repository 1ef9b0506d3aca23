//! HTML views for the page models.
//!
//! - `layout`: document skeleton and the explore sidebar
//! - `pages`: folder, document and not-found pages

mod layout;
mod pages;

pub use pages::{document_page, folder_page, not_found_page};
