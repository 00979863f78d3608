//! Pagination module
//!
//! # Overview
//!
//! Transifex follows JSON:API hypermedia pagination: every list response
//! carries `links.next`, an absolute URL whose query string is the cursor for
//! the following page. A chain of pages ends the first time the paginator
//! finds no next link.

mod strategies;
mod types;

pub use strategies::HateoasPaginator;
pub use types::{PageToken, Paginator};
