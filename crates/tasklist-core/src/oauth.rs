//! Google sign-in bookkeeping on the
//! client: the redirect start marker
//! and the error codes the server puts
//! in the URL fragment on the way back.

use chrono::{
  DateTime,
  Utc
};
use tracing::debug;

/// Local storage key holding the epoch
/// milliseconds at which the redirect
/// started.
pub const GOOGLE_AUTH_STARTED_KEY: &str =
  "google_auth_started";

const FRAGMENT_ERROR_KEY: &str =
  "/login?error";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum OAuthErrorCode {
  InvalidState,
  TokenError,
  MissingUserInfo,
  OAuthError,
  Unknown
}

impl OAuthErrorCode {
  pub fn parse(code: &str) -> Self {
    match code {
      | "invalid_state" => {
        Self::InvalidState
      }
      | "token_error" => Self::TokenError,
      | "missing_user_info" => {
        Self::MissingUserInfo
      }
      | "oauth_error" => Self::OAuthError,
      | _ => Self::Unknown
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      | Self::InvalidState => {
        "Authentication error: Session \
         validation failed"
      }
      | Self::TokenError => {
        "Authentication error: Failed to \
         exchange authorization code"
      }
      | Self::MissingUserInfo => {
        "Authentication error: Could not \
         get user information"
      }
      | Self::OAuthError => {
        "Authentication error: OAuth \
         process failed"
      }
      | Self::Unknown => {
        "Authentication failed"
      }
    }
  }
}

/// Value stored under
/// [`GOOGLE_AUTH_STARTED_KEY`].
pub fn start_marker(
  now: DateTime<Utc>
) -> String {
  now.timestamp_millis().to_string()
}

/// Reads the error code out of a
/// fragment such as
/// `#/login?error=token_error`.
pub fn error_code_from_fragment(
  fragment: &str
) -> Option<String> {
  let pairs = fragment
    .strip_prefix('#')
    .unwrap_or(fragment);

  pairs
    .split('&')
    .filter(|pair| !pair.is_empty())
    .filter_map(|pair| {
      let (key, value) = pair
        .split_once('=')
        .unwrap_or((pair, ""));
      let key = decode_component(key);
      (key == FRAGMENT_ERROR_KEY)
        .then(|| decode_component(value))
    })
    .find(|code| !code.is_empty())
}

/// Message to show for the fragment, or
/// `None` when it carries no error.
pub fn error_message_from_fragment(
  fragment: &str
) -> Option<&'static str> {
  let code =
    error_code_from_fragment(fragment)?;
  debug!(code = %code, "oauth return carried an error");
  Some(
    OAuthErrorCode::parse(&code)
      .message()
  )
}

/// Form-urlencoded decoding: `+` is a
/// space, `%XX` is a byte. Bad escapes
/// are kept verbatim.
fn decode_component(raw: &str) -> String {
  let bytes = raw.as_bytes();
  let mut out =
    Vec::with_capacity(bytes.len());
  let mut idx = 0;

  while idx < bytes.len() {
    match bytes[idx] {
      | b'+' => {
        out.push(b' ');
        idx += 1;
      }
      | b'%' if idx + 2 < bytes.len() => {
        match (
          hex_value(bytes[idx + 1]),
          hex_value(bytes[idx + 2])
        ) {
          | (Some(high), Some(low)) => {
            out.push((high << 4) | low);
            idx += 3;
          }
          | _ => {
            out.push(b'%');
            idx += 1;
          }
        }
      }
      | byte => {
        out.push(byte);
        idx += 1;
      }
    }
  }

  String::from_utf8_lossy(&out)
    .into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
  (byte as char)
    .to_digit(16)
    .map(|digit| digit as u8)
}
