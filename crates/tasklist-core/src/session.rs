//! The signed-in user and the auth
//! operations that replace it.
//!
//! [`Session`] is a plain value owned by
//! whichever front end is running. The
//! async operations below only talk to
//! the API and hand back what should be
//! stored; the caller applies it with
//! [`Session::set_user`] and reacts to
//! the returned [`SessionChange`].

use tasklist_shared::{
  Credentials,
  ProfileUpdate,
  User
};
use tracing::{
  error,
  info,
  instrument,
  warn
};

use crate::api::{
  ApiClient,
  Transport
};
use crate::controls::validate_registration;
use crate::error::ClientError;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AuthView {
  Unauthenticated,
  Authenticated
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum SessionChange {
  SignedIn,
  Refreshed,
  SignedOut,
  StillSignedOut
}

impl SessionChange {
  pub fn should_fetch_tasks(
    self
  ) -> bool {
    self == Self::SignedIn
  }

  /// The previous user's tasks must not
  /// outlive their session.
  pub fn clears_tasks(self) -> bool {
    self == Self::SignedOut
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Session {
  user: Option<User>
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn user(&self) -> Option<&User> {
    self.user.as_ref()
  }

  pub fn is_authenticated(
    &self
  ) -> bool {
    self.user.is_some()
  }

  pub fn view(&self) -> AuthView {
    if self.user.is_some() {
      AuthView::Authenticated
    } else {
      AuthView::Unauthenticated
    }
  }

  pub fn set_user(
    &mut self,
    user: Option<User>
  ) -> SessionChange {
    let change =
      match (self.user.is_some(), user.is_some()) {
        | (false, true) => {
          SessionChange::SignedIn
        }
        | (true, true) => {
          SessionChange::Refreshed
        }
        | (true, false) => {
          SessionChange::SignedOut
        }
        | (false, false) => {
          SessionChange::StillSignedOut
        }
      };
    self.user = user;
    change
  }

  pub fn clear(
    &mut self
  ) -> SessionChange {
    self.set_user(None)
  }
}

/// Asks the server who is signed in.
/// Every failure counts as "nobody".
#[instrument(skip(api))]
pub async fn check_auth_status<T>(
  api: &ApiClient<T>
) -> Option<User>
where
  T: Transport
{
  match api.current_user().await {
    | Ok(user) => {
      info!(user_id = user.id, "session is authenticated");
      Some(user)
    }
    | Err(err) if err.is_network() => {
      error!(error = %err, "auth status check failed");
      None
    }
    | Err(err) => {
      warn!(error = %err, "no authenticated session");
      None
    }
  }
}

#[instrument(skip(api, password))]
pub async fn login<T>(
  api: &ApiClient<T>,
  email: &str,
  password: &str
) -> Result<User, ClientError>
where
  T: Transport
{
  let credentials = Credentials {
    email:    email.to_string(),
    password: password.to_string()
  };
  api.login(&credentials).await
}

#[instrument(skip(api, password))]
pub async fn register<T>(
  api: &ApiClient<T>,
  email: &str,
  password: &str
) -> Result<User, ClientError>
where
  T: Transport
{
  let credentials = Credentials {
    email:    email.to_string(),
    password: password.to_string()
  };
  api.register(&credentials).await
}

/// Register form submit: the confirm
/// field must match before anything is
/// sent.
pub async fn register_with_confirmation<
  T
>(
  api: &ApiClient<T>,
  email: &str,
  password: &str,
  confirm: &str
) -> Result<User, ClientError>
where
  T: Transport
{
  validate_registration(
    password, confirm
  )?;
  register(api, email, password).await
}

/// Ends the server session.
///
/// Any response from the server,
/// success or not, means the session is
/// over and the caller should clear its
/// [`Session`]. Only a network failure
/// is returned as an error; the user
/// stays signed in locally.
#[instrument(skip(api))]
pub async fn logout<T>(
  api: &ApiClient<T>
) -> Result<(), ClientError>
where
  T: Transport
{
  match api.logout().await {
    | Ok(()) => {
      info!("logged out");
      Ok(())
    }
    | Err(err) if err.is_network() => {
      error!(error = %err, "logout request failed");
      Err(err)
    }
    | Err(err) => {
      warn!(error = %err, "logout rejected by server");
      Ok(())
    }
  }
}

#[instrument(skip(api))]
pub async fn update_profile<T>(
  api: &ApiClient<T>,
  first_name: &str,
  last_name: &str
) -> Result<User, ClientError>
where
  T: Transport
{
  let update = ProfileUpdate {
    first_name: first_name.to_string(),
    last_name:  last_name.to_string()
  };
  api.update_profile(&update).await
}

/// Returns the provider URL to navigate
/// to. Recording the start marker and
/// navigating is up to the caller.
#[instrument(skip(api))]
pub async fn initiate_google_login<T>(
  api: &ApiClient<T>
) -> Result<String, ClientError>
where
  T: Transport
{
  let url =
    api.google_auth_url().await.map_err(
      |err| {
        error!(error = %err, "google login error");
        err
      }
    )?;
  info!("redirecting to google authentication");
  Ok(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(first: Option<&str>) -> User {
    User {
      id:            1,
      email:         "a@b.com".to_string(),
      first_name:    first
        .map(str::to_string),
      last_name:     None,
      auth_provider: "local".to_string()
    }
  }

  #[test]
  fn transitions_follow_presence() {
    let mut session = Session::new();
    assert_eq!(
      session.view(),
      AuthView::Unauthenticated
    );
    assert_eq!(
      session.set_user(None),
      SessionChange::StillSignedOut
    );
    assert_eq!(
      session.set_user(Some(user(None))),
      SessionChange::SignedIn
    );
    assert_eq!(
      session.view(),
      AuthView::Authenticated
    );
    assert_eq!(
      session
        .set_user(Some(user(Some("Ada")))),
      SessionChange::Refreshed
    );
    assert_eq!(
      session
        .user()
        .and_then(|u| u.first_name.as_deref()),
      Some("Ada")
    );
    assert_eq!(
      session.clear(),
      SessionChange::SignedOut
    );
    assert!(!session.is_authenticated());
  }

  #[test]
  fn only_sign_in_triggers_fetch() {
    assert!(
      SessionChange::SignedIn
        .should_fetch_tasks()
    );
    for change in [
      SessionChange::Refreshed,
      SessionChange::SignedOut,
      SessionChange::StillSignedOut
    ] {
      assert!(!change.should_fetch_tasks());
    }
  }

  #[test]
  fn only_sign_out_clears_tasks() {
    assert!(
      SessionChange::SignedOut
        .clears_tasks()
    );
    for change in [
      SessionChange::SignedIn,
      SessionChange::Refreshed,
      SessionChange::StillSignedOut
    ] {
      assert!(!change.clears_tasks());
    }
  }
}
