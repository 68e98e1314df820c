//! Tests for the stream definitions

use super::*;
use crate::error::Error;
use crate::pagination::PageToken;
use crate::types::SyncMode;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_stream_table_order() {
    assert_eq!(
        names(),
        vec![
            "job-offers",
            "jobs",
            "job-applications",
            "stages",
            "requisitions",
            "candidates"
        ]
    );
    assert!(all().iter().all(|s| s.primary_keys == ["id"]));
}

#[test]
fn test_find_unknown_stream() {
    let err = find("interviews").unwrap_err();
    assert!(matches!(err, Error::StreamNotFound { ref stream } if stream == "interviews"));
}

#[test]
fn test_select_keeps_table_order() {
    let selected = select(&["candidates", "jobs"]).unwrap();
    let names: Vec<_> = selected.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["jobs", "candidates"]);

    assert_eq!(select::<&str>(&[]).unwrap().len(), 6);
    assert!(select(&["jobs", "nope"]).is_err());
}

#[test]
fn test_first_request_has_no_page_params() {
    let stream = find("stages").unwrap();
    let params = stream.url_params(None, 30);

    assert!(!params.contains_key("page[number]"));
    assert!(!params.contains_key("page[size]"));
    assert_eq!(params.get("sort").map(String::as_str), Some("-updated-at"));
    assert!(!params.contains_key("include"));
}

#[test]
fn test_url_params_with_cursor() {
    let stream = find("job-applications").unwrap();
    let params = stream.url_params(Some(&PageToken::from("2")), 30);

    assert_eq!(params.get("page[number]").map(String::as_str), Some("2"));
    assert_eq!(params.get("page[size]").map(String::as_str), Some("30"));
    assert_eq!(params.get("sort").map(String::as_str), Some("-updated-at"));
    assert_eq!(
        params.get("include").map(String::as_str),
        Some("candidate,stage,job")
    );
}

#[test]
fn test_url_params_extra_filters() {
    let jobs = find("jobs").unwrap();
    let params = jobs.url_params(None, 30);
    assert_eq!(params.get("filter[status]").map(String::as_str), Some("all"));
    assert_eq!(params.get("include").map(String::as_str), Some("requisition"));
}

#[test]
fn test_full_refresh_stream_has_no_sort() {
    let offers = find("job-offers").unwrap();
    let params = offers.url_params(Some(&PageToken::from("3")), 50);

    assert!(!params.contains_key("sort"));
    assert_eq!(params.get("page[size]").map(String::as_str), Some("50"));
    assert_eq!(offers.sync_mode(), SyncMode::FullRefresh);
    assert_eq!(find("jobs").unwrap().sync_mode(), SyncMode::Incremental);
}

#[test]
fn test_post_process_lifts_updated_at() {
    let stream = find("candidates").unwrap();
    let record = json!({
        "id": "42",
        "type": "candidates",
        "attributes": {"first-name": "Ada", "updated-at": "2024-03-01T10:00:00.000+01:00"}
    });

    let processed = stream.post_process(record).unwrap();
    assert_eq!(processed["updated-at"], "2024-03-01T10:00:00.000+01:00");
    assert_eq!(processed["updated-at"], processed["attributes"]["updated-at"]);
    assert_eq!(
        stream.replication_value(&processed),
        Some("2024-03-01T10:00:00.000+01:00")
    );
}

#[test]
fn test_post_process_missing_updated_at_is_null() {
    let stream = find("stages").unwrap();
    let processed = stream
        .post_process(json!({"id": "1", "attributes": {"name": "Inbox"}}))
        .unwrap();

    assert!(processed["updated-at"].is_null());
    assert!(stream.replication_value(&processed).is_none());
}

#[test]
fn test_post_process_leaves_full_refresh_records() {
    let stream = find("requisitions").unwrap();
    let record = json!({"id": "7", "attributes": {"updated-at": "2024-01-01T00:00:00Z"}});

    let processed = stream.post_process(record.clone()).unwrap();
    assert_eq!(processed, record);
}

#[test]
fn test_post_process_skips_records_without_id() {
    let stream = find("jobs").unwrap();
    assert!(stream.post_process(json!({"attributes": {}})).is_none());
    assert!(stream.post_process(json!({"id": null})).is_none());
}

#[test]
fn test_job_applications_relationships() {
    let stream = find("job-applications").unwrap();
    let rel = stream.schema.get_property("relationships").unwrap();
    let mut keys: Vec<&str> = rel
        .properties
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["candidate", "job", "stage"]);

    let data = rel
        .get_property("candidate")
        .and_then(|c| c.get_property("data"))
        .unwrap();
    let mut fields: Vec<&str> = data
        .properties
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["id", "type"]);
}

#[test]
fn test_schema_top_level_updated_at() {
    for stream in all() {
        let has_updated_at = stream.schema.get_property("updated-at").is_some();
        assert_eq!(has_updated_at, stream.name != "job-offers", "{}", stream.name);
        assert!(stream.schema.get_property("id").is_some());
        assert!(stream.schema.get_property("attributes").is_some());
    }
}

#[test]
fn test_schema_formats() {
    let candidates = find("candidates").unwrap();
    let attrs = candidates.schema.get_property("attributes").unwrap();
    assert_eq!(
        attrs.get_property("email").unwrap().format.as_deref(),
        Some("email")
    );

    let offers = find("job-offers").unwrap();
    let start = offers
        .schema
        .get_property("attributes")
        .and_then(|a| a.get_property("details"))
        .and_then(|d| d.get_property("start-date"))
        .unwrap();
    assert_eq!(start.format.as_deref(), Some("date"));

    let jobs = find("jobs").unwrap();
    let tags = jobs
        .schema
        .get_property("attributes")
        .and_then(|a| a.get_property("tags"))
        .unwrap();
    assert!(tags.items.is_some());
}
