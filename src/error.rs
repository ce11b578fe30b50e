use reqwest::StatusCode;
use thiserror::Error;

use crate::management::StoreError;

/// Errors returned by the Spotify proxy client.
///
/// Only [`ClientError::AuthorizationRejected`] is ever recovered from, and
/// only once per call, by [`crate::spotify::SpotifyClient::execute`]. Every
/// other variant reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A token required for the request is not present in the credential store.
    #[error("no stored credential for `{0}`, run `sporldeck auth login` first")]
    MissingCredential(&'static str),

    /// The server answered with 401 Unauthorized.
    #[error("authorization rejected by server")]
    AuthorizationRejected,

    /// The refresh endpoint could not produce a new access token.
    ///
    /// Covers an unreachable endpoint, a non-2xx answer (401 included),
    /// `success: false`, a missing or empty `access_token` and a failure to
    /// persist the new token. Stored tokens are left untouched in every case.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// Network failure, unexpected status or an undecodable body.
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<StatusCode>,
        message: String,
    },

    /// A playback action name or value was rejected before any request was
    /// sent, e.g. `seek` without a numeric position.
    #[error("invalid playback action: {0}")]
    InvalidAction(String),

    /// Reading or writing the credential store failed outside of a refresh.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Transport error without an HTTP status, e.g. a connection failure.
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Transport error for a response that arrived with an unexpected status.
    ///
    /// # Arguments
    ///
    /// * `status` - Status code of the response
    /// * `message` - Response body or a description of what went wrong
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::StatusCode;
    /// use sporldeck::ClientError;
    ///
    /// let err = ClientError::status(StatusCode::FORBIDDEN, "premium required");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "request failed with status 403 Forbidden: premium required"
    /// );
    /// ```
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        ClientError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// True for the one variant the executor recovers from.
    pub fn is_authorization_rejected(&self) -> bool {
        matches!(self, ClientError::AuthorizationRejected)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

fn transport_message(status: &Option<StatusCode>, message: &str) -> String {
    match status {
        Some(status) => format!("request failed with status {}: {}", status, message),
        None => format!("request failed: {}", message),
    }
}
