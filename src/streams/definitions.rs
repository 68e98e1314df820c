//! The six Teamtailor streams

use super::definition::StreamDefinition;
use crate::error::{Error, Result};
use crate::schema::{attributes, relationships_schema, JsonSchema, SchemaProperty as P};
use std::sync::LazyLock;

const ID: &[&str] = &["id"];
const UPDATED_AT: &str = "updated-at";

/// All streams, in sync order
static STREAMS: LazyLock<Vec<StreamDefinition>> = LazyLock::new(|| {
    vec![
        job_offers(),
        jobs(),
        job_applications(),
        stages(),
        requisitions(),
        candidates(),
    ]
});

/// Every stream the connector knows about
pub fn all() -> &'static [StreamDefinition] {
    &STREAMS
}

/// Stream names, in sync order
pub fn names() -> Vec<&'static str> {
    STREAMS.iter().map(|s| s.name).collect()
}

/// Look up a stream by name
pub fn find(name: &str) -> Result<&'static StreamDefinition> {
    STREAMS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| Error::StreamNotFound {
            stream: name.to_string(),
        })
}

/// Resolve a selection of stream names; an empty selection means all streams.
///
/// Selected streams keep the table order regardless of how they were listed.
pub fn select<S: AsRef<str>>(selected: &[S]) -> Result<Vec<&'static StreamDefinition>> {
    if selected.is_empty() {
        return Ok(STREAMS.iter().collect());
    }

    for name in selected {
        find(name.as_ref())?;
    }

    Ok(STREAMS
        .iter()
        .filter(|s| selected.iter().any(|n| n.as_ref() == s.name))
        .collect())
}

fn base_schema(id_description: &str, includes: &[&str]) -> JsonSchema {
    JsonSchema::new()
        .property("id", P::string().with_description(id_description))
        .property("relationships", relationships_schema(includes))
}

fn job_offers() -> StreamDefinition {
    const INCLUDES: &[&str] = &["job-application"];
    let schema = base_schema("The job-offer system ID", INCLUDES)
        .property("name", P::string())
        .property(
            "attributes",
            attributes(
                [
                    ("created-at", P::date_time()),
                    ("sent-at", P::date_time()),
                    ("answered-at", P::date_time()),
                    ("response", P::string()),
                    ("status", P::string()),
                    (
                        "details",
                        P::object([
                            ("acceptance-message", P::string()),
                            ("rejection-message", P::string()),
                            ("salary", P::string()),
                            ("start-date", P::date()),
                        ]),
                    ),
                ],
                "attributes of the job offer",
            ),
        );

    StreamDefinition {
        name: "job-offers",
        path: "/v1/job-offers",
        primary_keys: ID,
        replication_key: None,
        includes: INCLUDES,
        extra_filters: &[],
        schema,
    }
}

fn jobs() -> StreamDefinition {
    const INCLUDES: &[&str] = &["requisition"];
    let schema = base_schema("The job system ID", INCLUDES)
        .property(UPDATED_AT, P::date_time())
        .property(
            "attributes",
            attributes(
                [
                    ("apply-button-text", P::string()),
                    ("body", P::string()),
                    ("end-date", P::date()),
                    ("human-status", P::string()),
                    ("internal", P::boolean()),
                    ("picture", P::string()),
                    ("pinned", P::boolean()),
                    ("start-date", P::date()),
                    ("status", P::string()),
                    ("tags", P::array(P::string())),
                    ("title", P::string()),
                    ("internal-name", P::string()),
                    ("pitch", P::string()),
                    ("external-application-url", P::string()),
                    ("name-requirement", P::string()),
                    ("resume-requirement", P::string()),
                    ("cover-letter-requirement", P::string()),
                    ("phone-requirement", P::string()),
                    ("created-at", P::date_time()),
                    ("updated-at", P::date_time()),
                    ("sharing-image-layout", P::string()),
                    ("mailbox", P::string()),
                    ("remote-status", P::string()),
                ],
                "attributes of the job",
            ),
        );

    StreamDefinition {
        name: "jobs",
        path: "/v1/jobs",
        primary_keys: ID,
        replication_key: Some(UPDATED_AT),
        includes: INCLUDES,
        extra_filters: &[("filter[status]", "all")],
        schema,
    }
}

fn job_applications() -> StreamDefinition {
    const INCLUDES: &[&str] = &["candidate", "stage", "job"];
    let schema = base_schema("The job-application system ID", INCLUDES)
        .property("name", P::string())
        .property(UPDATED_AT, P::date_time())
        .property(
            "attributes",
            attributes(
                [
                    ("cover-letter", P::string()),
                    ("created-at", P::date_time()),
                    ("referring-site", P::string()),
                    ("referring-url", P::string()),
                    ("rejected-at", P::date_time()),
                    ("sourced", P::boolean()),
                    ("updated-at", P::date_time()),
                    ("row-order", P::integer()),
                    ("changed-stage-at", P::string()),
                ],
                "attributes of the job application",
            ),
        );

    StreamDefinition {
        name: "job-applications",
        path: "/v1/job-applications",
        primary_keys: ID,
        replication_key: Some(UPDATED_AT),
        includes: INCLUDES,
        extra_filters: &[],
        schema,
    }
}

fn stages() -> StreamDefinition {
    let schema = base_schema("The stage system ID", &[])
        .property(UPDATED_AT, P::date_time())
        .property(
            "attributes",
            attributes(
                [
                    ("created-at", P::date_time()),
                    ("updated-at", P::date_time()),
                    ("name", P::string()),
                    ("stage-type", P::string()),
                    ("row-order", P::integer()),
                    ("active-job-applications-count", P::integer()),
                    ("rejected-job-applications-count", P::integer()),
                ],
                "attributes of the stage",
            ),
        );

    StreamDefinition {
        name: "stages",
        path: "/v1/stages",
        primary_keys: ID,
        replication_key: Some(UPDATED_AT),
        includes: &[],
        extra_filters: &[],
        schema,
    }
}

fn requisitions() -> StreamDefinition {
    let schema = base_schema("The requisition system ID", &[])
        .property(UPDATED_AT, P::date_time())
        .property(
            "attributes",
            attributes(
                [
                    ("created-at", P::date_time()),
                    ("updated-at", P::date_time()),
                    ("job-title", P::string()),
                    ("job-description", P::string()),
                    ("country", P::string()),
                    ("currency", P::string()),
                    ("salary-time-unit", P::string()),
                    ("min-salary", P::string()),
                    ("max-salary", P::string()),
                    ("status", P::string()),
                    ("number-of-openings", P::integer()),
                    ("hired-count", P::integer()),
                ],
                "attributes of the requisition",
            ),
        );

    StreamDefinition {
        name: "requisitions",
        path: "/v1/requisitions",
        primary_keys: ID,
        replication_key: None,
        includes: &[],
        extra_filters: &[],
        schema,
    }
}

fn candidates() -> StreamDefinition {
    let schema = base_schema("The candidate system ID", &[])
        .property(UPDATED_AT, P::date_time())
        .property(
            "attributes",
            attributes(
                [
                    ("connected", P::boolean()),
                    ("created-at", P::date_time()),
                    ("email", P::email()),
                    ("facebook-id", P::string()),
                    ("first-name", P::string()),
                    ("internal", P::boolean()),
                    ("last-name", P::string()),
                    ("linkedin-uid", P::string()),
                    ("linkedin-url", P::string()),
                    ("original-resume", P::string()),
                    ("phone", P::string()),
                    ("picture", P::string()),
                    ("pitch", P::string()),
                    ("referring-site", P::string()),
                    ("referring-url", P::string()),
                    ("referred", P::boolean()),
                    ("resume", P::string()),
                    ("sourced", P::boolean()),
                    ("unsubscribed", P::boolean()),
                    ("updated-at", P::date_time()),
                    ("facebook-profile", P::string()),
                    ("linkedin-profile", P::string()),
                    ("tags", P::array(P::string())),
                ],
                "attributes of the candidate",
            ),
        );

    StreamDefinition {
        name: "candidates",
        path: "/v1/candidates",
        primary_keys: ID,
        replication_key: Some(UPDATED_AT),
        includes: &[],
        extra_filters: &[],
        schema,
    }
}
