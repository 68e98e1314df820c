//! Tests for the decode module

use super::*;
use crate::error::Error;
use serde_json::json;

#[test]
fn test_default_record_path() {
    let decoder = JsonApiDecoder::new();
    assert_eq!(decoder.record_path(), "$.data[*]");
}

#[test]
fn test_decode_jsonapi_page_preserves_order() {
    let decoder = JsonApiDecoder::new();
    let body = r#"{
        "data": [
            {"id": "3", "type": "jobs", "attributes": {"title": "Chef"}},
            {"id": "1", "type": "jobs", "attributes": {"title": "Baker"}},
            {"id": "2", "type": "jobs", "attributes": {"title": "Waiter"}}
        ],
        "links": {"next": null}
    }"#;

    let ids: Vec<String> = decoder
        .decode(body)
        .unwrap()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn test_records_are_lazy_per_page() {
    let decoder = JsonApiDecoder::new();
    let page = json!({"data": [{"id": "1"}, {"id": "2"}]});

    let mut records = decoder.records(&page).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records.next().unwrap()["id"], "1");
    assert_eq!(records.len(), 1);

    // A fresh iterator starts over
    let again = decoder.records(&page).unwrap();
    assert_eq!(again.len(), 2);
}

#[test]
fn test_empty_data() {
    let decoder = JsonApiDecoder::new();
    let records = decoder.decode(r#"{"data": []}"#).unwrap();
    assert_eq!(records.len(), 0);
}

#[test]
fn test_missing_data_yields_nothing() {
    let decoder = JsonApiDecoder::new();
    let records = decoder
        .decode(r#"{"errors": [{"status": "500"}]}"#)
        .unwrap();
    assert_eq!(records.len(), 0);
}

#[test]
fn test_simple_record_path() {
    let decoder = JsonApiDecoder::with_path("included");
    let page = json!({"data": [], "included": [{"id": "c1", "type": "candidates"}]});

    let records: Vec<_> = decoder.records(&page).unwrap().collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["type"], "candidates");
}

#[test]
fn test_invalid_json_is_decode_error() {
    let decoder = JsonApiDecoder::new();
    let err = decoder.decode("<html>Bad gateway</html>").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_extract_path() {
    let body = json!({"links": {"next": "https://api.teamtailor.com/v1/jobs?page[number]=2"}});

    assert_eq!(
        extract_string(&body, "$.links.next").as_deref(),
        Some("https://api.teamtailor.com/v1/jobs?page[number]=2")
    );
    assert_eq!(
        extract_string(&body, "links.next").as_deref(),
        Some("https://api.teamtailor.com/v1/jobs?page[number]=2")
    );
    assert!(extract_path(&body, "$.links.prev").is_none());
    assert!(extract_path(&body, "$.meta.page-count").is_none());
}

#[test]
fn test_extract_string_scalars() {
    let body = json!({"meta": {"page-count": 4, "final": true, "nothing": null}});

    assert_eq!(extract_string(&body, "meta.page-count").as_deref(), Some("4"));
    assert_eq!(extract_string(&body, "meta.final").as_deref(), Some("true"));
    assert!(extract_string(&body, "meta.nothing").is_none());
    assert!(extract_string(&body, "meta").is_none());
}

#[test]
fn test_extract_path_indexes_arrays() {
    let body = json!({"data": [{"id": "7"}, {"id": "8"}]});
    assert_eq!(extract_string(&body, "data.1.id").as_deref(), Some("8"));
    assert!(extract_path(&body, "data.5").is_none());
}
