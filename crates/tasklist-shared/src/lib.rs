use serde::{
  Deserialize,
  Serialize
};

pub type TaskId = i64;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:        TaskId,
  pub title:     String,
  #[serde(default)]
  pub completed: bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct User {
  pub id:            i64,
  pub email:         String,
  #[serde(default)]
  pub first_name:    Option<String>,
  #[serde(default)]
  pub last_name:     Option<String>,
  #[serde(default)]
  pub auth_provider: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct Credentials {
  pub email:    String,
  pub password: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct ProfileUpdate {
  pub first_name: String,
  pub last_name:  String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskCreate {
  pub title: String
}

/// Partial task update. Absent fields
/// are left out of the request body.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskPatch {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub title:     Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub completed: Option<bool>
}

impl TaskPatch {
  pub fn completed(
    completed: bool
  ) -> Self {
    Self {
      title:     None,
      completed: Some(completed)
    }
  }

  pub fn title(
    title: impl Into<String>
  ) -> Self {
    Self {
      title:     Some(title.into()),
      completed: None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
)]
pub struct GoogleAuthStart {
  #[serde(default)]
  pub auth_url: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
)]
pub struct ApiErrorBody {
  #[serde(default)]
  pub error: Option<String>
}
