use chrono::Utc;
use tasklist_core::ClientConfig;
use tasklist_core::oauth::{
  GOOGLE_AUTH_STARTED_KEY,
  start_marker
};

const CLIENT_CONFIG_TOML: &str =
  include_str!("../../assets/config.toml");

pub fn load_client_config() -> ClientConfig
{
  match ClientConfig::from_toml_str(
    CLIENT_CONFIG_TOML
  ) {
    | Ok(config) => {
      tracing::info!(
        api_base = %config.api_base,
        "loaded client config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed to parse client config; using same origin");
      ClientConfig::default()
    }
  }
}

/// Marks the start of the Google
/// redirect so the return leg can be
/// checked against it.
pub fn save_google_auth_started() {
  if let Some(storage) =
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
  {
    let marker = start_marker(Utc::now());
    if let Err(error) = storage.set_item(
      GOOGLE_AUTH_STARTED_KEY,
      &marker
    ) {
      tracing::warn!(?error, "failed to record google auth start");
    }
  }
}
