//! Source adapters translating each upstream site's request/response
//! contract into the common `Listing` model.
//!
//! Both adapters share one failure surface: `SourceError` enumerates the
//! upstream failure kinds, and `FetchPolicy` decides what a failure does.
//! The combined search degrades a failing source to zero results, while a
//! standalone single-source invocation fails loudly. The policy is an
//! explicit parameter so the two behaviors share one code path.

pub mod ninety_nine;
pub mod property_guru;

use crate::model::{Listing, Source};
use thiserror::Error;

/// What a source fetch does on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Log the failure and yield zero results, so the other source still
    /// reports. Used by the combined search.
    Degrade,
    /// Propagate the error to the caller. Used by standalone single-source
    /// invocations.
    Strict,
}

/// Failure modes of a source fetch.
///
/// An absent nested payload path is deliberately NOT here: typed
/// deserialization defaults every optional level, so missing nesting
/// yields an empty list rather than an error.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Non-2xx response status.
    #[error("HTTP status {status}")]
    Http { status: u16 },
    /// Transport-level failure (DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The embedded-data script tag was absent from the HTML page.
    /// Distinct from HTTP failure: the fetch succeeded, the markup did not
    /// carry the payload.
    #[error("embedded data payload not found in page")]
    MissingEmbeddedData,
    /// The response body (or extracted blob) was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Apply the fetch policy to an adapter result.
///
/// Under `Degrade`, the failure is logged at warn level against the source
/// tag and resolves to an empty list; `Strict` passes everything through.
pub(crate) fn apply_policy(
    result: Result<Vec<Listing>, SourceError>,
    source: Source,
    policy: FetchPolicy,
) -> Result<Vec<Listing>, SourceError> {
    match (result, policy) {
        (Err(e), FetchPolicy::Degrade) => {
            tracing::warn!(%source, error = %e, "source fetch failed, continuing without it");
            Ok(Vec::new())
        }
        (other, _) => other,
    }
}
