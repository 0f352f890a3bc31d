pub mod api;
pub mod config;
pub mod controls;
pub mod error;
pub mod oauth;
pub mod session;
pub mod tasks;
pub mod view;

pub use api::{
  ApiClient,
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};
pub use config::ClientConfig;
pub use error::{
  ClientError,
  TransportError
};
pub use session::{
  AuthView,
  Session,
  SessionChange
};
pub use tasks::{
  Render,
  TaskAction,
  TaskList
};
pub use tasklist_shared::{
  Task,
  TaskId,
  User
};
