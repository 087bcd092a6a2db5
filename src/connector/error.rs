//! Error type shared by every connector operation.

use thiserror::Error;

use crate::ports::TransportError;

/// Failure of a connector operation.
///
/// All operations report failure through this one shape: either the request
/// never produced a response, or upstream answered with a status other than
/// the expected one, or a body that should have been JSON was not.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Upstream answered with a status other than the expected one.
    ///
    /// No further classification is applied: a 401, a 404, and a 500 all
    /// land here, carrying the raw status and body as the diagnostic.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// The status code upstream actually returned.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// Upstream answered successfully but the body did not parse as the
    /// expected JSON document.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl ConnectorError {
    /// Returns the upstream status code, when the failure carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(_) | Self::MalformedBody(_) => None,
        }
    }
}
