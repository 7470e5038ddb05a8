//! Client side of the two backend calls: the one-shot visit ping and the
//! application submission.

mod http;

pub use http::HttpEndpoint;

use crate::error::SubmissionError;
use crate::form::data::FormData;

pub const TRACK_VISIT_PATH: &str = "/api/track-visit";
pub const APPLICATION_PATH: &str = "/api/application";

/// Anything that can carry the form to the backend. Implemented over HTTP by
/// [`HttpEndpoint`] and by recording fakes in tests.
pub trait Endpoint: Send + Sync {
    /// POST `{}` to the tracking route. Callers ignore the outcome apart
    /// from logging it.
    fn track_visit(&self) -> Result<(), SubmissionError>;

    /// POST the form verbatim as JSON. `Ok` only for a success status.
    fn submit_application(&self, data: &FormData) -> Result<(), SubmissionError>;
}

/// Absolute URLs for both routes, derived from one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    base: String,
}

impl Routes {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn track_visit(&self) -> String {
        format!("{}{}", self.base, TRACK_VISIT_PATH)
    }

    pub fn application(&self) -> String {
        format!("{}{}", self.base, APPLICATION_PATH)
    }
}
