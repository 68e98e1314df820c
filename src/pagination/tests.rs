//! Tests for pagination module

use super::*;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;
use test_case::test_case;

fn headers_with_next(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("X-Next-Page", HeaderValue::from_str(value).unwrap());
    headers
}

// ============================================================================
// Token Extraction
// ============================================================================

#[test_case("https://api.teamtailor.com/v1/job-applications?page[number]=3&page[size]=30", Some("3") ; "plain brackets")]
#[test_case("https://api.teamtailor.com/v1/jobs?page%5Bnumber%5D=7&page%5Bsize%5D=30", Some("7") ; "encoded brackets")]
#[test_case("/v1/candidates?include=job&page[number]=12", Some("12") ; "relative link")]
#[test_case("https://api.teamtailor.com/v1/jobs?page[size]=30", None ; "no page number")]
#[test_case("https://api.teamtailor.com/v1/jobs?page[number]=", None ; "empty page number")]
fn test_token_from_link(link: &str, expected: Option<&str>) {
    let paginator = JsonApiPaginator::new();
    let body = json!({"data": [], "links": {"next": link}});

    assert_eq!(
        paginator.token_from_link(&body),
        expected.map(PageToken::from)
    );
}

#[test]
fn test_token_from_link_null() {
    let paginator = JsonApiPaginator::new();
    let body = json!({"data": [], "links": {"next": null}});
    assert!(paginator.token_from_link(&body).is_none());

    let body = json!({"data": []});
    assert!(paginator.token_from_link(&body).is_none());
}

#[test]
fn test_token_from_header() {
    let paginator = JsonApiPaginator::new();
    assert_eq!(
        paginator.token_from_header(&headers_with_next("4")),
        Some(PageToken::from("4"))
    );
    assert!(paginator.token_from_header(&HeaderMap::new()).is_none());
    assert!(paginator.token_from_header(&headers_with_next("")).is_none());
}

// ============================================================================
// Next Page Resolution
// ============================================================================

#[test]
fn test_next_page_from_link() {
    let paginator = JsonApiPaginator::new();
    let mut state = PaginationState::new();
    let body = json!({
        "data": [{"id": "1"}],
        "links": {"next": "https://api.teamtailor.com/v1/job-applications?page[number]=3&page[size]=30"}
    });

    let next = paginator.next_page(&body, &HeaderMap::new(), &mut state);
    assert_eq!(next, NextPage::Continue(PageToken::from("3")));
    assert!(!state.done);
}

#[test]
fn test_link_wins_over_header() {
    let paginator = JsonApiPaginator::new();
    let mut state = PaginationState::new();
    let body = json!({"data": [], "links": {"next": "/v1/jobs?page[number]=2"}});

    let next = paginator.next_page(&body, &headers_with_next("9"), &mut state);
    assert_eq!(next, NextPage::Continue(PageToken::from("2")));
}

#[test]
fn test_header_fallback() {
    let paginator = JsonApiPaginator::new();
    let mut state = PaginationState::new();
    let body = json!({"data": [{"id": "1"}]});

    let next = paginator.next_page(&body, &headers_with_next("4"), &mut state);
    assert_eq!(next, NextPage::Continue(PageToken::from("4")));
}

#[test]
fn test_done_without_link_or_header() {
    let paginator = JsonApiPaginator::new();
    let mut state = PaginationState::new();
    let body = json!({"data": [{"id": "1"}], "links": {}});

    let next = paginator.next_page(&body, &HeaderMap::new(), &mut state);
    assert_eq!(next, NextPage::Done);
    assert!(state.done);
}

#[test]
fn test_repeated_token_stops() {
    let paginator = JsonApiPaginator::new();
    let mut state = PaginationState::new();
    state.advance(PageToken::from("5"));
    let body = json!({"data": [{"id": "1"}], "links": {"next": "/v1/jobs?page[number]=5"}});

    let next = paginator.next_page(&body, &HeaderMap::new(), &mut state);
    assert_eq!(next, NextPage::Done);
    assert!(state.done);
}

#[test]
fn test_cycling_tokens_stop() {
    let paginator = JsonApiPaginator::new();
    let mut state = PaginationState::new();
    let page = |n: u32| json!({"data": [{"id": "1"}], "links": {"next": format!("/v1/jobs?page[number]={n}")}});

    // 1 -> 2 -> 3 -> 2
    let mut requested = Vec::new();
    for n in [2, 3, 2] {
        match paginator.next_page(&page(n), &HeaderMap::new(), &mut state) {
            NextPage::Continue(token) => {
                requested.push(token.to_string());
                state.advance(token);
            }
            NextPage::Done => break,
        }
    }

    assert_eq!(requested, vec!["2", "3"]);
    assert!(state.done);
    assert!(state.has_requested(&PageToken::from("2")));
}

// ============================================================================
// PaginationState
// ============================================================================

#[test]
fn test_pagination_state_tracks_pages() {
    let mut state = PaginationState::new();
    assert!(state.current.is_none());

    state.add_page(30);
    state.advance(PageToken::from("2"));
    state.add_page(12);

    assert_eq!(state.pages_fetched, 2);
    assert_eq!(state.total_fetched, 42);
    assert_eq!(state.current, Some(PageToken::from("2")));
}

#[test]
fn test_page_token_display() {
    let token = PageToken::new("17");
    assert_eq!(token.to_string(), "17");
    assert_eq!(token.as_str(), "17");
}
