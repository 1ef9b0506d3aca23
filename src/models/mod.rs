//! Page models handed from the resource tree to the HTML views.
//!
//! Everything here is owned, so pages can be built while the repository is
//! checked out and rendered after it has been released.
//! - `page`: `Page` and its folder, document, file and not-found variants
//! - `explore`: `ExploreLink` entries of the folder listing sidebar

pub mod explore;
pub mod page;

pub use explore::*;
pub use page::*;
