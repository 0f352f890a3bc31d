//! Errors surfaced by the API client
//! and the client-side validators.

use thiserror::Error;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ClientError {
  /// The request never produced a
  /// response (offline, DNS, CORS).
  #[error("network failure: {0}")]
  Network(String),

  /// Non-2xx response. Holds the
  /// server's `error` string or the
  /// operation's default message.
  #[error("{0}")]
  RequestFailed(String),

  /// Rejected before any request was
  /// made.
  #[error("{0}")]
  Validation(String),

  /// The body could not be read.
  /// `fallback` is the operation's
  /// default message, shown instead of
  /// the parser output.
  #[error(
    "failed to decode {what}: {detail}"
  )]
  Decode {
    what:     &'static str,
    detail:   String,
    fallback: &'static str
  }
}

impl ClientError {
  /// Text for the fixed error slot in
  /// the auth forms.
  pub fn user_message(&self) -> String {
    match self {
      | Self::RequestFailed(message)
      | Self::Validation(message) => {
        message.clone()
      }
      | Self::Decode {
        fallback, ..
      } => fallback.to_string(),
      | Self::Network(_) => self.to_string()
    }
  }

  pub fn is_network(&self) -> bool {
    matches!(self, Self::Network(_))
  }
}

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError>
  for ClientError
{
  fn from(
    err: TransportError
  ) -> Self {
    Self::Network(err.0)
  }
}
