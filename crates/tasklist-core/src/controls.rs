//! UI state that is not part of the
//! session or the task list: which auth
//! tab is showing, the profile menu and
//! modal, and the fixed error slots.
//! Also the input checks and click
//! classification the event handlers
//! run before calling into the models.

use tasklist_shared::TaskId;
use tracing::debug;

use crate::error::ClientError;
use crate::oauth;

pub const DELETE_BUTTON_CLASS: &str =
  "delete-btn";

pub const PASSWORD_MISMATCH: &str =
  "Passwords do not match";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum AuthTab {
  #[default]
  Login,
  Register
}

impl AuthTab {
  pub const ALL: [Self; 2] =
    [Self::Login, Self::Register];

  /// Value of the tab's `data-tab`
  /// attribute.
  pub fn id(self) -> &'static str {
    match self {
      | Self::Login => "login",
      | Self::Register => "register"
    }
  }

  pub fn form_id(self) -> &'static str {
    match self {
      | Self::Login => "login-form",
      | Self::Register => "register-form"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Login => "Login",
      | Self::Register => "Register"
    }
  }

  pub fn from_id(
    id: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|tab| tab.id() == id)
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Controls {
  pub auth_tab:           AuthTab,
  pub profile_menu_open:  bool,
  pub profile_modal_open: bool,
  pub login_error:        String,
  pub register_error:     String
}

impl Controls {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn select_tab(
    &mut self,
    tab: AuthTab
  ) {
    self.auth_tab = tab;
  }

  pub fn is_active(
    &self,
    tab: AuthTab
  ) -> bool {
    self.auth_tab == tab
  }

  pub fn toggle_profile_menu(&mut self) {
    self.profile_menu_open =
      !self.profile_menu_open;
  }

  pub fn close_profile_menu(&mut self) {
    self.profile_menu_open = false;
  }

  /// Document-wide click. Anything
  /// outside the trigger and the menu
  /// closes the menu.
  pub fn document_click(
    &mut self,
    inside_trigger: bool,
    inside_menu: bool
  ) {
    if !inside_trigger && !inside_menu {
      self.profile_menu_open = false;
    }
  }

  pub fn open_profile_modal(&mut self) {
    self.profile_modal_open = true;
    self.profile_menu_open = false;
  }

  pub fn close_profile_modal(&mut self) {
    self.profile_modal_open = false;
  }

  pub fn set_login_error(
    &mut self,
    message: impl Into<String>
  ) {
    self.login_error = message.into();
  }

  pub fn set_register_error(
    &mut self,
    message: impl Into<String>
  ) {
    self.register_error = message.into();
  }

  /// Handles the fragment of the URL
  /// the provider sent the user back
  /// to. Returns true when it carried an
  /// error; the caller then cleans the
  /// URL and shows the signed-out view.
  pub fn apply_oauth_return(
    &mut self,
    fragment: &str
  ) -> bool {
    let Some(message) =
      oauth::error_message_from_fragment(
        fragment
      )
    else {
      return false;
    };
    debug!(error_text = message, "showing oauth return error");
    self.login_error = message.to_string();
    self.auth_tab = AuthTab::Login;
    true
  }
}

/// Trimmed title, or `None` when there
/// is nothing to submit.
pub fn task_title_input(
  raw: &str
) -> Option<String> {
  let title = raw.trim();
  if title.is_empty() {
    None
  } else {
    Some(title.to_string())
  }
}

pub fn validate_registration(
  password: &str,
  confirm: &str
) -> Result<(), ClientError> {
  if password == confirm {
    Ok(())
  } else {
    Err(ClientError::Validation(
      PASSWORD_MISMATCH.to_string()
    ))
  }
}

/// The parts of a clicked element the
/// task list delegation looks at.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ClickTarget {
  pub tag_name:   String,
  pub input_type: Option<String>,
  pub classes:    Vec<String>,
  pub data_id:    Option<String>,
  pub checked:    bool
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskClick {
  Toggle {
    id:        TaskId,
    completed: bool
  },
  Delete {
    id: TaskId
  }
}

pub fn classify_task_click(
  target: &ClickTarget
) -> Option<TaskClick> {
  let is_checkbox = target
    .tag_name
    .eq_ignore_ascii_case("input")
    && target
      .input_type
      .as_deref()
      .is_some_and(|kind| {
        kind.eq_ignore_ascii_case(
          "checkbox"
        )
      });

  let is_delete = target
    .classes
    .iter()
    .any(|class| class == DELETE_BUTTON_CLASS);

  if !is_checkbox && !is_delete {
    return None;
  }

  let Some(id) = target
    .data_id
    .as_deref()
    .and_then(|raw| {
      raw.trim().parse::<TaskId>().ok()
    })
  else {
    debug!(data_id = ?target.data_id, "task click without a usable id");
    return None;
  };

  if is_checkbox {
    Some(TaskClick::Toggle {
      id,
      completed: target.checked
    })
  } else {
    Some(TaskClick::Delete { id })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn checkbox(
    id: Option<&str>,
    checked: bool
  ) -> ClickTarget {
    ClickTarget {
      tag_name: "INPUT".to_string(),
      input_type: Some(
        "checkbox".to_string()
      ),
      classes: vec![],
      data_id: id.map(str::to_string),
      checked
    }
  }

  fn delete_button(
    id: &str
  ) -> ClickTarget {
    ClickTarget {
      tag_name: "BUTTON".to_string(),
      input_type: None,
      classes: vec![
        DELETE_BUTTON_CLASS.to_string(),
      ],
      data_id: Some(id.to_string()),
      checked: false
    }
  }

  #[test]
  fn tabs_are_mutually_exclusive() {
    let mut controls = Controls::new();
    assert!(controls.is_active(AuthTab::Login));

    controls.select_tab(
      AuthTab::from_id("register")
        .expect("known tab")
    );
    assert!(controls.is_active(AuthTab::Register));
    assert!(!controls.is_active(AuthTab::Login));
    assert_eq!(
      controls.auth_tab.form_id(),
      "register-form"
    );
    assert_eq!(AuthTab::from_id("nope"), None);
  }

  #[test]
  fn menu_closes_on_outside_click_only() {
    let mut controls = Controls::new();
    controls.toggle_profile_menu();
    assert!(controls.profile_menu_open);

    controls.document_click(true, false);
    assert!(controls.profile_menu_open);
    controls.document_click(false, true);
    assert!(controls.profile_menu_open);

    controls.document_click(false, false);
    assert!(!controls.profile_menu_open);
  }

  #[test]
  fn opening_modal_hides_menu() {
    let mut controls = Controls::new();
    controls.toggle_profile_menu();
    controls.open_profile_modal();
    assert!(controls.profile_modal_open);
    assert!(!controls.profile_menu_open);

    controls.close_profile_modal();
    assert!(!controls.profile_modal_open);
  }

  #[test]
  fn oauth_error_lands_in_login_slot() {
    let mut controls = Controls::new();
    controls.select_tab(AuthTab::Register);

    assert!(controls.apply_oauth_return(
      "#/login?error=oauth_error"
    ));
    assert_eq!(
      controls.login_error,
      "Authentication error: OAuth process failed"
    );
    assert!(controls.is_active(AuthTab::Login));

    let mut untouched = Controls::new();
    assert!(!untouched.apply_oauth_return("#/"));
    assert!(untouched.login_error.is_empty());
  }

  #[test]
  fn title_input_is_trimmed() {
    assert_eq!(
      task_title_input("  Buy milk \n"),
      Some("Buy milk".to_string())
    );
    assert_eq!(task_title_input("   "), None);
    assert_eq!(task_title_input(""), None);
  }

  #[test]
  fn registration_needs_matching_passwords(
  ) {
    assert!(
      validate_registration("pw", "pw")
        .is_ok()
    );
    let err = validate_registration(
      "pw", "pW"
    )
    .expect_err("mismatch");
    assert_eq!(
      err,
      ClientError::Validation(
        PASSWORD_MISMATCH.to_string()
      )
    );
    assert_eq!(
      err.user_message(),
      "Passwords do not match"
    );
  }

  #[test]
  fn classifies_checkbox_and_delete() {
    assert_eq!(
      classify_task_click(&checkbox(
        Some("7"),
        true
      )),
      Some(TaskClick::Toggle {
        id:        7,
        completed: true
      })
    );
    assert_eq!(
      classify_task_click(&delete_button(
        "12"
      )),
      Some(TaskClick::Delete { id: 12 })
    );
  }

  #[test]
  fn ignores_other_targets_and_bad_ids() {
    let span = ClickTarget {
      tag_name: "SPAN".to_string(),
      data_id: Some("3".to_string()),
      ..ClickTarget::default()
    };
    assert_eq!(classify_task_click(&span), None);

    let text_input = ClickTarget {
      tag_name: "INPUT".to_string(),
      input_type: Some("text".to_string()),
      data_id: Some("3".to_string()),
      ..ClickTarget::default()
    };
    assert_eq!(
      classify_task_click(&text_input),
      None
    );

    assert_eq!(
      classify_task_click(&checkbox(None, true)),
      None
    );
    assert_eq!(
      classify_task_click(&delete_button("x1")),
      None
    );
  }
}
