use wasm_bindgen::JsValue;

pub fn current_fragment() -> String {
  web_sys::window()
    .and_then(|window| {
      window.location().hash().ok()
    })
    .unwrap_or_default()
}

/// Drops the fragment and query from
/// the address bar without reloading.
pub fn reset_to_root() {
  let Some(window) = web_sys::window()
  else {
    return;
  };
  let title = window
    .document()
    .map(|document| document.title())
    .unwrap_or_default();
  let result = window
    .history()
    .and_then(|history| {
      history.replace_state_with_url(
        &JsValue::NULL,
        &title,
        Some("/")
      )
    });
  if let Err(error) = result {
    tracing::warn!(?error, "failed to clean url");
  }
}

pub fn navigate_to(url: &str) {
  let result = web_sys::window()
    .ok_or_else(|| {
      JsValue::from_str("no window")
    })
    .and_then(|window| {
      window.location().set_href(url)
    });
  if let Err(error) = result {
    tracing::error!(?error, "failed to navigate");
  }
}
