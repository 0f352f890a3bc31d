use std::rc::Rc;

use tasklist_core::controls::{
  AuthTab,
  Controls
};
use tasklist_core::{
  Render,
  Session,
  SessionChange,
  TaskAction,
  TaskList,
  User
};
use yew::Reducible;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
  pub session:     Session,
  pub last_change: Option<SessionChange>,
  /// Bumped on every dispatch so effects
  /// keyed on it see repeated changes.
  pub generation:  u64
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskFollowUp {
  Fetch,
  Clear
}

impl SessionState {
  /// What the task list should do after
  /// the most recent session change.
  pub fn task_follow_up(
    &self
  ) -> Option<TaskFollowUp> {
    let change = self.last_change?;
    if change.should_fetch_tasks() {
      Some(TaskFollowUp::Fetch)
    } else if change.clears_tasks() {
      Some(TaskFollowUp::Clear)
    } else {
      None
    }
  }
}

impl Reducible for SessionState {
  type Action = Option<User>;

  fn reduce(
    self: Rc<Self>,
    user: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    let change =
      next.session.set_user(user);
    tracing::debug!(?change, "session updated");
    next.last_change = Some(change);
    next.generation += 1;
    Rc::new(next)
  }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskState {
  pub list: TaskList
}

impl Reducible for TaskState {
  type Action = TaskAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    if action == TaskAction::Keep {
      // Same Rc: no re-render.
      return self;
    }
    let mut next = (*self).clone();
    match next.list.apply(action) {
      | Render::Full => Rc::new(next),
      | Render::Skip => self
    }
  }
}

pub enum ControlsAction {
  SelectTab(AuthTab),
  ToggleProfileMenu,
  DocumentClick {
    inside_trigger: bool,
    inside_menu:    bool
  },
  OpenProfileModal,
  CloseProfileModal,
  CloseProfileMenu,
  LoginError(String),
  RegisterError(String),
  OAuthReturn(String)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlsState {
  pub controls: Controls
}

impl Reducible for ControlsState {
  type Action = ControlsAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = self.controls.clone();
    match action {
      | ControlsAction::SelectTab(tab) => {
        next.select_tab(tab)
      }
      | ControlsAction::ToggleProfileMenu => {
        next.toggle_profile_menu()
      }
      | ControlsAction::DocumentClick {
        inside_trigger,
        inside_menu
      } => next.document_click(
        inside_trigger,
        inside_menu
      ),
      | ControlsAction::OpenProfileModal => {
        next.open_profile_modal()
      }
      | ControlsAction::CloseProfileModal => {
        next.close_profile_modal()
      }
      | ControlsAction::CloseProfileMenu => {
        next.close_profile_menu()
      }
      | ControlsAction::LoginError(message) => {
        next.set_login_error(message)
      }
      | ControlsAction::RegisterError(
        message
      ) => next.set_register_error(message),
      | ControlsAction::OAuthReturn(
        fragment
      ) => {
        next.apply_oauth_return(&fragment);
      }
    }

    if next == self.controls {
      self
    } else {
      Rc::new(Self { controls: next })
    }
  }
}

#[cfg(test)]
mod tests {
  use tasklist_core::{
    AuthView,
    Task
  };

  use super::*;

  fn tasks() -> Rc<TaskState> {
    TaskState::default().into()
  }

  #[test]
  fn keep_returns_same_state() {
    let state = tasks();
    let next = state
      .clone()
      .reduce(TaskAction::Keep);
    assert!(Rc::ptr_eq(&state, &next));
  }

  #[test]
  fn resync_produces_new_state() {
    let state = tasks();
    let next = state
      .clone()
      .reduce(TaskAction::Resync);
    assert!(!Rc::ptr_eq(&state, &next));
    assert_eq!(
      next.list.revision(),
      state.list.revision() + 1
    );
  }

  #[test]
  fn append_lands_in_new_state() {
    let next =
      tasks().reduce(TaskAction::Append(
        Task {
          id:        3,
          title:     "Pay rent"
            .to_string(),
          completed: false
        }
      ));
    assert_eq!(next.list.len(), 1);
  }

  #[test]
  fn unchanged_controls_skip_render() {
    let state: Rc<ControlsState> =
      ControlsState::default().into();
    let next = state.clone().reduce(
      ControlsAction::DocumentClick {
        inside_trigger: false,
        inside_menu:    false
      }
    );
    assert!(Rc::ptr_eq(&state, &next));

    let opened = next.reduce(
      ControlsAction::ToggleProfileMenu
    );
    assert!(
      opened.controls.profile_menu_open
    );
  }

  fn ada() -> User {
    User {
      id:            1,
      email:         "a@b.com".to_string(),
      first_name:    None,
      last_name:     None,
      auth_provider: "local".to_string()
    }
  }

  #[test]
  fn sign_in_is_recorded() {
    let state: Rc<SessionState> =
      SessionState::default().into();
    let next = state.reduce(Some(ada()));
    assert_eq!(
      next.last_change,
      Some(SessionChange::SignedIn)
    );
    assert_eq!(
      next.session.view(),
      AuthView::Authenticated
    );
    assert_eq!(
      next.task_follow_up(),
      Some(TaskFollowUp::Fetch)
    );
  }

  #[test]
  fn follow_up_tracks_each_transition() {
    let state: Rc<SessionState> =
      SessionState::default().into();
    assert_eq!(state.task_follow_up(), None);

    let still = state.reduce(None);
    assert_eq!(still.task_follow_up(), None);

    let signed_in =
      still.reduce(Some(ada()));
    let refreshed =
      signed_in.clone().reduce(Some(ada()));
    assert_eq!(
      refreshed.last_change,
      Some(SessionChange::Refreshed)
    );
    assert_eq!(
      refreshed.task_follow_up(),
      None
    );

    let signed_out = refreshed.reduce(None);
    assert_eq!(
      signed_out.task_follow_up(),
      Some(TaskFollowUp::Clear)
    );
    assert_eq!(
      signed_out.session.view(),
      AuthView::Unauthenticated
    );

    let again = signed_out.reduce(Some(ada()));
    assert_eq!(
      again.task_follow_up(),
      Some(TaskFollowUp::Fetch)
    );
    assert!(
      again.generation
        > signed_in.generation
    );
  }

  #[test]
  fn clearing_replaces_list_with_nothing() {
    let loaded =
      tasks().reduce(TaskAction::Replace(
        vec![Task {
          id:        7,
          title:     "Old user's task"
            .to_string(),
          completed: true
        }]
      ));
    assert_eq!(loaded.list.len(), 1);
    let cleared = loaded
      .reduce(TaskAction::Replace(Vec::new()));
    assert!(cleared.list.is_empty());
  }

  #[test]
  fn login_error_can_be_cleared() {
    let state: Rc<ControlsState> =
      ControlsState::default().into();
    let failed = state.reduce(
      ControlsAction::LoginError(
        "Login failed".to_string()
      )
    );
    assert_eq!(
      failed.controls.login_error,
      "Login failed"
    );
    let cleared = failed.reduce(
      ControlsAction::LoginError(
        String::new()
      )
    );
    assert!(
      cleared.controls.login_error.is_empty()
    );
  }
}
