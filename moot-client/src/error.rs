//! Failure taxonomy for everything the client does.
//!
//! Facades never swallow errors: every operation either returns its decoded
//! payload or one of these variants, and the caller decides what the user
//! sees. Server-supplied messages are carried verbatim where they exist.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Fallback when the server rejects a request without saying why.
pub(crate) const GENERIC_FAILURE: &str = "something went wrong, please try again";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network unreachable, connection refused, timeout. Retrying may help.
    #[error("network error: {0}")]
    Transport(String),

    /// Missing or expired credential. The session must be invalidated and the
    /// user routed back to login.
    #[error("authentication required: {0}")]
    Auth(String),

    /// The server rejected the payload (duplicate follow, bad field, ...).
    /// The message is the server's own wording.
    #[error("{0}")]
    Validation(String),

    /// The requested event or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A client-side precondition failed before any request was sent.
    #[error("{0}")]
    Rejected(String),

    /// Credential persistence failed.
    #[error("credential storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Maps an HTTP status plus the server's optional `message` field onto
    /// the taxonomy above.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
        match status {
            401 | 403 => Self::Auth(message),
            404 => Self::NotFound(message),
            400 | 409 | 422 => Self::Validation(message),
            _ => Self::Server { status, message },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_timeout() {
            Self::Transport("request timed out, try again".to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth() {
        let err = ClientError::from_status(401, None);
        assert!(err.is_auth());
        let err = ClientError::from_status(403, Some("token expired".into()));
        assert!(matches!(err, ClientError::Auth(m) if m == "token expired"));
    }

    #[test]
    fn validation_keeps_server_message_verbatim() {
        let err = ClientError::from_status(409, Some("already following this user".into()));
        assert!(matches!(err, ClientError::Validation(ref m) if m == "already following this user"));
        assert_eq!(err.to_string(), "already following this user");
    }

    #[test]
    fn missing_message_falls_back_to_generic() {
        match ClientError::from_status(500, None) {
            ClientError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, GENERIC_FAILURE);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn not_found_is_its_own_state() {
        assert!(matches!(
            ClientError::from_status(404, Some("no such event".into())),
            ClientError::NotFound(_)
        ));
    }
}
