use serde::Deserialize;
use tracing::debug;

use crate::error::ClientError;

/// Where the REST API lives. An empty
/// base means same origin, which is
/// what the browser build uses.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
pub struct ClientConfig {
  #[serde(default)]
  pub api_base: String
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
  #[serde(default)]
  api: ClientConfig
}

impl ClientConfig {
  pub fn with_base(
    base: impl Into<String>
  ) -> Self {
    Self {
      api_base: base.into()
    }
  }

  /// Parses the `[api]` table of a
  /// TOML document.
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, ClientError> {
    let file =
      toml::from_str::<ConfigFile>(raw)
        .map_err(|err| {
          ClientError::Decode {
            what:     "client config",
            detail:   err.to_string(),
            fallback: "Invalid client config"
          }
        })?;
    debug!(api_base = %file.api.api_base, "parsed client config");
    Ok(file.api)
  }

  pub fn endpoint(
    &self,
    path: &str
  ) -> String {
    let base =
      self.api_base.trim_end_matches('/');
    if path.starts_with('/') {
      format!("{base}{path}")
    } else {
      format!("{base}/{path}")
    }
  }
}
