//! Typed wrappers over the REST API.
//!
//! The client never talks to the
//! network directly; each call builds an
//! [`ApiRequest`] and hands it to a
//! [`Transport`]. The browser build
//! plugs in `fetch`, the terminal client
//! plugs in `reqwest`, tests plug in a
//! scripted fake.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tasklist_shared::{
  ApiErrorBody,
  Credentials,
  GoogleAuthStart,
  ProfileUpdate,
  Task,
  TaskCreate,
  TaskId,
  TaskPatch,
  User
};
use tracing::{
  debug,
  instrument,
  warn
};

use crate::config::ClientConfig;
use crate::error::{
  ClientError,
  TransportError
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Patch,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Get => "GET",
      | Self::Post => "POST",
      | Self::Patch => "PATCH",
      | Self::Delete => "DELETE"
    }
  }
}

impl fmt::Display for Method {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ApiRequest {
  pub method: Method,
  pub url:    String,
  /// Serialized JSON body. Sent with
  /// `Content-Type: application/json`.
  pub body:   Option<String>
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ApiResponse {
  pub status: u16,
  pub body:   String
}

impl ApiResponse {
  pub fn new(
    status: u16,
    body: impl Into<String>
  ) -> Self {
    Self {
      status,
      body: body.into()
    }
  }

  pub fn is_success(&self) -> bool {
    (200..=299).contains(&self.status)
  }

  /// Message for a failed response:
  /// the body's `error` field if it
  /// has one, otherwise `fallback`.
  pub fn error_message(
    &self,
    fallback: &str
  ) -> String {
    serde_json::from_str::<ApiErrorBody>(
      &self.body
    )
    .ok()
    .and_then(|body| body.error)
    .filter(|message| {
      !message.trim().is_empty()
    })
    .unwrap_or_else(|| {
      fallback.to_string()
    })
  }
}

#[async_trait(?Send)]
pub trait Transport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, TransportError>;
}

/// Default messages used when a failed
/// response carries no `error` field.
pub mod defaults {
  pub const AUTH_CHECK: &str =
    "Not authenticated";
  pub const LOGIN: &str = "Login failed";
  pub const REGISTER: &str =
    "Registration failed";
  pub const LOGOUT: &str =
    "Logout failed";
  pub const PROFILE: &str =
    "Profile update failed";
  pub const GOOGLE_START: &str =
    "Failed to start Google \
     authentication";
  pub const GOOGLE_MISSING_URL: &str =
    "No authentication URL received";
  pub const FETCH_TASKS: &str =
    "Failed to fetch tasks";
  pub const ADD_TASK: &str =
    "Failed to add task";
  pub const UPDATE_TASK: &str =
    "Failed to update task";
  pub const DELETE_TASK: &str =
    "Failed to delete task";
}

pub struct ApiClient<T> {
  transport: T,
  config:    ClientConfig
}

impl<T: Transport> ApiClient<T> {
  pub fn new(
    transport: T,
    config: ClientConfig
  ) -> Self {
    Self { transport, config }
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  #[instrument(skip(self))]
  pub async fn current_user(
    &self
  ) -> Result<User, ClientError> {
    self
      .call(
        Method::Get,
        "/api/auth/user",
        None::<&()>,
        "user",
        defaults::AUTH_CHECK
      )
      .await
  }

  #[instrument(skip(self, credentials), fields(email = %credentials.email))]
  pub async fn login(
    &self,
    credentials: &Credentials
  ) -> Result<User, ClientError> {
    self
      .call(
        Method::Post,
        "/api/auth/login",
        Some(credentials),
        "user",
        defaults::LOGIN
      )
      .await
  }

  #[instrument(skip(self, credentials), fields(email = %credentials.email))]
  pub async fn register(
    &self,
    credentials: &Credentials
  ) -> Result<User, ClientError> {
    self
      .call(
        Method::Post,
        "/api/auth/register",
        Some(credentials),
        "user",
        defaults::REGISTER
      )
      .await
  }

  #[instrument(skip(self))]
  pub async fn logout(
    &self
  ) -> Result<(), ClientError> {
    self
      .call_ignoring_body(
        Method::Post,
        "/api/auth/logout",
        None::<&()>,
        defaults::LOGOUT
      )
      .await
  }

  #[instrument(skip(self, update))]
  pub async fn update_profile(
    &self,
    update: &ProfileUpdate
  ) -> Result<User, ClientError> {
    self
      .call(
        Method::Patch,
        "/api/auth/profile",
        Some(update),
        "user",
        defaults::PROFILE
      )
      .await
  }

  /// Fetches the provider's hosted
  /// login URL. Any failure maps to the
  /// same fixed message.
  #[instrument(skip(self))]
  pub async fn google_auth_url(
    &self
  ) -> Result<String, ClientError> {
    let start = self
      .call::<GoogleAuthStart, ()>(
        Method::Get,
        "/api/auth/google",
        None,
        "google auth start",
        defaults::GOOGLE_START
      )
      .await
      .map_err(|err| match err {
        | ClientError::RequestFailed(
          _
        ) => ClientError::RequestFailed(
          defaults::GOOGLE_START
            .to_string()
        ),
        | other => other
      })?;

    start
      .auth_url
      .filter(|url| !url.trim().is_empty())
      .ok_or_else(|| {
        ClientError::RequestFailed(
          defaults::GOOGLE_MISSING_URL
            .to_string()
        )
      })
  }

  #[instrument(skip(self))]
  pub async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, ClientError> {
    self
      .call(
        Method::Get,
        "/api/tasks",
        None::<&()>,
        "task list",
        defaults::FETCH_TASKS
      )
      .await
  }

  #[instrument(skip(self))]
  pub async fn create_task(
    &self,
    title: &str
  ) -> Result<Task, ClientError> {
    let body = TaskCreate {
      title: title.to_string()
    };
    self
      .call(
        Method::Post,
        "/api/tasks",
        Some(&body),
        "task",
        defaults::ADD_TASK
      )
      .await
  }

  #[instrument(skip(self))]
  pub async fn update_task(
    &self,
    id: TaskId,
    patch: &TaskPatch
  ) -> Result<Task, ClientError> {
    self
      .call(
        Method::Patch,
        &format!("/api/tasks/{id}"),
        Some(patch),
        "task",
        defaults::UPDATE_TASK
      )
      .await
  }

  #[instrument(skip(self))]
  pub async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), ClientError> {
    self
      .call_ignoring_body(
        Method::Delete,
        &format!("/api/tasks/{id}"),
        None::<&()>,
        defaults::DELETE_TASK
      )
      .await
  }

  /// `what` names the payload in decode
  /// errors. A 2xx body that does not
  /// parse is reported with `fallback`
  /// as its user-facing message.
  async fn call<R, B>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
    what: &'static str,
    fallback: &'static str
  ) -> Result<R, ClientError>
  where
    R: DeserializeOwned,
    B: Serialize + ?Sized
  {
    let response = self
      .exchange(method, path, body, fallback)
      .await?;

    serde_json::from_str::<R>(
      &response.body
    )
    .map_err(|err| {
      warn!(what, error = %err, "unreadable response body");
      ClientError::Decode {
        what,
        detail: err.to_string(),
        fallback
      }
    })
  }

  async fn call_ignoring_body<B>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
    fallback: &'static str
  ) -> Result<(), ClientError>
  where
    B: Serialize + ?Sized
  {
    self
      .exchange(method, path, body, fallback)
      .await
      .map(|_| ())
  }

  async fn exchange<B>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
    fallback: &'static str
  ) -> Result<ApiResponse, ClientError>
  where
    B: Serialize + ?Sized
  {
    let body = body
      .map(serde_json::to_string)
      .transpose()
      .map_err(|err| {
        ClientError::Decode {
          what: "request body",
          detail: err.to_string(),
          fallback
        }
      })?;

    let request = ApiRequest {
      method,
      url: self.config.endpoint(path),
      body
    };
    debug!(%method, url = %request.url, "sending request");

    let response =
      self.transport.send(request).await?;
    debug!(
      %method,
      path,
      status = response.status,
      "received response"
    );

    if response.is_success() {
      Ok(response)
    } else {
      Err(ClientError::RequestFailed(
        response.error_message(fallback)
      ))
    }
  }
}
