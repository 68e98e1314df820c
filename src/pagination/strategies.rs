//! Pagination strategy implementations

use super::types::{NextPage, PageToken, PaginationState, Paginator};
use crate::decode::extract_string;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Body location of the next page link
pub const DEFAULT_NEXT_LINK_PATH: &str = "$.links.next";

/// Query parameter carrying the page number
pub const DEFAULT_PAGE_PARAM: &str = "page[number]";

/// Header fallback for the next page number
pub const NEXT_PAGE_HEADER: &str = "x-next-page";

// ============================================================================
// JSON:API Page Number Pagination
// ============================================================================

/// Follows `links.next`, falling back to the `X-Next-Page` header
#[derive(Debug, Clone)]
pub struct JsonApiPaginator {
    link_path: String,
    page_param: String,
    header_name: String,
}

impl Default for JsonApiPaginator {
    fn default() -> Self {
        Self {
            link_path: DEFAULT_NEXT_LINK_PATH.to_string(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            header_name: NEXT_PAGE_HEADER.to_string(),
        }
    }
}

impl JsonApiPaginator {
    /// Create a paginator with the default link path, parameter and header
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the page number out of the body's next link
    pub fn token_from_link(&self, body: &Value) -> Option<PageToken> {
        let link = extract_string(body, &self.link_path)?;
        if link.is_empty() {
            return None;
        }

        let url = match parse_link(&link) {
            Some(url) => url,
            None => {
                warn!("Ignoring unparsable next link: {}", link);
                return None;
            }
        };

        url.query_pairs()
            .find(|(key, _)| key == self.page_param.as_str())
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .map(PageToken::from)
    }

    /// Read the page number out of the fallback header
    pub fn token_from_header(&self, headers: &HeaderMap) -> Option<PageToken> {
        headers
            .get(self.header_name.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(PageToken::from)
    }
}

impl Paginator for JsonApiPaginator {
    fn next_page(
        &self,
        body: &Value,
        headers: &HeaderMap,
        state: &mut PaginationState,
    ) -> NextPage {
        let token = self
            .token_from_link(body)
            .or_else(|| self.token_from_header(headers));

        let Some(token) = token else {
            debug!("No next page advertised");
            state.mark_done();
            return NextPage::Done;
        };

        if state.has_requested(&token) {
            warn!("Page {token} was already requested, stopping to avoid a cycle");
            state.mark_done();
            return NextPage::Done;
        }

        NextPage::Continue(token)
    }
}

/// Parse an absolute link, or a relative one against a placeholder origin
fn parse_link(link: &str) -> Option<Url> {
    match Url::parse(link) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .ok()
            .and_then(|base| base.join(link).ok()),
        Err(_) => None,
    }
}
