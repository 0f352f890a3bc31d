use tasklist_shared::{
  TaskId,
  User
};

use crate::tasks::TaskList;

pub const COMPLETED_CLASS: &str =
  "completed";

/// What the authenticated panel shows
/// for the current user.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct ProfileView {
  pub title:        String,
  pub display_name: String,
  pub email:        String,
  pub first_name:   String,
  pub last_name:    String
}

impl ProfileView {
  pub fn from_user(user: &User) -> Self {
    let first = non_empty(
      user.first_name.as_deref()
    );
    let last = non_empty(
      user.last_name.as_deref()
    );

    let title = match first {
      | Some(first) => {
        format!("{first}'s Tasks")
      }
      | None => "My Tasks".to_string()
    };
    let display_name = match (first, last)
    {
      | (Some(first), Some(last)) => {
        format!("{first} {last}")
      }
      | _ => "User".to_string()
    };

    Self {
      title,
      display_name,
      email: user.email.clone(),
      first_name: user
        .first_name
        .clone()
        .unwrap_or_default(),
      last_name: user
        .last_name
        .clone()
        .unwrap_or_default()
    }
  }
}

fn non_empty(
  value: Option<&str>
) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskRowView {
  pub id:          TaskId,
  pub title:       String,
  pub checked:     bool,
  pub title_class: &'static str
}

/// One row per task, in list order.
pub fn task_rows(
  list: &TaskList
) -> Vec<TaskRowView> {
  list
    .tasks()
    .iter()
    .map(|task| TaskRowView {
      id:          task.id,
      title:       task.title.clone(),
      checked:     task.completed,
      title_class: if task.completed {
        COMPLETED_CLASS
      } else {
        ""
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use tasklist_shared::Task;

  use super::*;
  use crate::tasks::TaskAction;

  fn user(
    first: Option<&str>,
    last: Option<&str>
  ) -> User {
    User {
      id:            5,
      email:         "ada@example.com"
        .to_string(),
      first_name:    first
        .map(str::to_string),
      last_name:     last
        .map(str::to_string),
      auth_provider: "google".to_string()
    }
  }

  #[test]
  fn full_name_and_possessive_title() {
    let view = ProfileView::from_user(
      &user(Some("Ada"), Some("Lovelace"))
    );
    assert_eq!(view.title, "Ada's Tasks");
    assert_eq!(
      view.display_name,
      "Ada Lovelace"
    );
    assert_eq!(
      view.email,
      "ada@example.com"
    );
    assert_eq!(view.first_name, "Ada");
    assert_eq!(view.last_name, "Lovelace");
  }

  #[test]
  fn missing_names_fall_back() {
    let view = ProfileView::from_user(
      &user(Some("Ada"), None)
    );
    assert_eq!(view.title, "Ada's Tasks");
    assert_eq!(view.display_name, "User");
    assert_eq!(view.last_name, "");

    let blank = ProfileView::from_user(
      &user(Some(""), Some("Lovelace"))
    );
    assert_eq!(blank.title, "My Tasks");
    assert_eq!(blank.display_name, "User");
  }

  #[test]
  fn rows_mirror_list() {
    let mut list = TaskList::new();
    list.apply(TaskAction::Replace(vec![
      Task {
        id:        7,
        title:     "Buy milk".to_string(),
        completed: false
      },
      Task {
        id:        8,
        title:     "Pay rent".to_string(),
        completed: true
      },
    ]));

    let rows = task_rows(&list);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Buy milk");
    assert!(!rows[0].checked);
    assert_eq!(rows[0].title_class, "");
    assert!(rows[1].checked);
    assert_eq!(
      rows[1].title_class,
      COMPLETED_CLASS
    );
  }
}
