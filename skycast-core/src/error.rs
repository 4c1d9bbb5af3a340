use std::time::Duration;

use crate::provider::Feed;

/// Failure of a single upstream request.
///
/// These never leave [`crate::WeatherAggregator::fetch`]; they decide between
/// degraded data and the fallback snapshot and are logged.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{feed} request could not be sent: {error}")]
    Transport {
        feed: Feed,
        #[source]
        error: reqwest::Error,
    },

    #[error("{feed} request failed with status {status}: {body}")]
    Status {
        feed: Feed,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{feed} response could not be parsed: {error}")]
    Malformed {
        feed: Feed,
        #[source]
        error: serde_json::Error,
    },

    #[error("{feed} request timed out after {after:?}")]
    Timeout { feed: Feed, after: Duration },
}

impl UpstreamError {
    pub fn feed(&self) -> Feed {
        match self {
            UpstreamError::Transport { feed, .. }
            | UpstreamError::Status { feed, .. }
            | UpstreamError::Malformed { feed, .. }
            | UpstreamError::Timeout { feed, .. } => *feed,
        }
    }
}
