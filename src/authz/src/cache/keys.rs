//! Cache key construction
//!
//! Collection reads are keyed by a stable prefix plus every query parameter,
//! single-resource reads by `<singular>:<id>`. A write drops the collection
//! prefix wholesale and the exact key of the resource it touched.

use intervue_core::{InterviewFilter, InterviewId, Page};

/// Prefix shared by every cached interview list page
pub const INTERVIEWS_PREFIX: &str = "interviews:";

const INTERVIEW_SINGULAR: &str = "interview";
const MESSAGES: &str = "messages";

fn or_none<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// Key for one page of the interview collection
///
/// `interviews:<limit>:<offset>:<status>:<type>`, with `None` for an unset
/// filter.
pub fn interviews_list(page: Page, filter: &InterviewFilter) -> String {
    format!(
        "{}{}:{}:{}:{}",
        INTERVIEWS_PREFIX,
        page.limit,
        page.offset,
        or_none(filter.status),
        or_none(filter.interview_type.as_deref()),
    )
}

/// Key for a single interview
pub fn interview(id: &InterviewId) -> String {
    format!("{}:{}", INTERVIEW_SINGULAR, id)
}

/// Prefix shared by every cached page of one interview's messages
///
/// Ends with a separator so that interview `1` does not match interview `12`.
pub fn messages_prefix(id: &InterviewId) -> String {
    format!("{}:{}:", MESSAGES, id)
}

/// Key for one page of an interview's messages
pub fn messages_list(id: &InterviewId, page: Page) -> String {
    format!("{}{}:{}", messages_prefix(id), page.limit, page.offset)
}
