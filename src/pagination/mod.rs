//! Pagination module
//!
//! Resolves the page cursor for JSON:API list endpoints.
//!
//! # Overview
//!
//! The API paginates by page number. The next page is advertised in the
//! body as a `links.next` URL carrying a `page[number]` query parameter,
//! with an `X-Next-Page` header as a fallback. A paginator turns each
//! response into either the next [`PageToken`] or [`NextPage::Done`].

mod strategies;
mod types;

pub use strategies::{
    JsonApiPaginator, DEFAULT_NEXT_LINK_PATH, DEFAULT_PAGE_PARAM, NEXT_PAGE_HEADER,
};
pub use types::{NextPage, PageToken, PaginationState, Paginator};

#[cfg(test)]
mod tests;
