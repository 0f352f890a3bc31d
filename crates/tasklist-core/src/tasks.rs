//! In-memory task list for the signed-in
//! user and the operations that keep it
//! in step with the server.

use tasklist_shared::{
  Task,
  TaskId,
  TaskPatch
};
use tracing::{
  debug,
  error,
  instrument
};

use crate::api::{
  ApiClient,
  Transport
};
use crate::controls::task_title_input;

/// Outcome of one round trip, to be
/// applied with [`TaskList::apply`].
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskAction {
  Replace(Vec<Task>),
  Append(Task),
  SetCompleted {
    id:        TaskId,
    completed: bool
  },
  Update(Task),
  Remove(TaskId),
  /// Redraw from unchanged state to
  /// undo what the user already saw.
  Resync,
  /// Nothing changed, nothing to draw.
  Keep
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Render {
  Full,
  Skip
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskList {
  tasks:    Vec<Task>,
  revision: u64
}

impl TaskList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  /// Bumped on every full render. The
  /// browser keys the list on it so a
  /// render rebuilds every row.
  pub fn revision(&self) -> u64 {
    self.revision
  }

  pub fn apply(
    &mut self,
    action: TaskAction
  ) -> Render {
    match action {
      | TaskAction::Replace(tasks) => {
        self.tasks = tasks;
      }
      | TaskAction::Append(task) => {
        self.tasks.push(task);
      }
      | TaskAction::SetCompleted {
        id,
        completed
      } => {
        if let Some(task) = self
          .tasks
          .iter_mut()
          .find(|task| task.id == id)
        {
          task.completed = completed;
        }
      }
      | TaskAction::Update(updated) => {
        if let Some(task) = self
          .tasks
          .iter_mut()
          .find(|task| task.id == updated.id)
        {
          *task = updated;
        }
      }
      | TaskAction::Remove(id) => {
        self
          .tasks
          .retain(|task| task.id != id);
      }
      | TaskAction::Resync => {}
      | TaskAction::Keep => {
        return Render::Skip;
      }
    }

    self.revision =
      self.revision.wrapping_add(1);
    debug!(
      revision = self.revision,
      tasks = self.tasks.len(),
      "task list re-rendered"
    );
    Render::Full
  }
}

#[instrument(skip(api))]
pub async fn fetch_tasks<T>(
  api: &ApiClient<T>
) -> TaskAction
where
  T: Transport
{
  match api.list_tasks().await {
    | Ok(tasks) => {
      TaskAction::Replace(tasks)
    }
    | Err(err) => {
      error!(error = %err, "failed to fetch tasks");
      TaskAction::Keep
    }
  }
}

/// Creates a task. Nothing is inserted
/// until the server returns it.
#[instrument(skip(api))]
pub async fn add_task<T>(
  api: &ApiClient<T>,
  title: &str
) -> TaskAction
where
  T: Transport
{
  match api.create_task(title).await {
    | Ok(task) => TaskAction::Append(task),
    | Err(err) => {
      error!(error = %err, "failed to add task");
      TaskAction::Keep
    }
  }
}

/// Task form submit. Blank input never
/// reaches the server.
pub async fn add_task_from_input<T>(
  api: &ApiClient<T>,
  raw: &str
) -> TaskAction
where
  T: Transport
{
  match task_title_input(raw) {
    | Some(title) => {
      add_task(api, &title).await
    }
    | None => {
      debug!("ignoring empty task title");
      TaskAction::Keep
    }
  }
}

/// Stores the completion flag the
/// server sends back, which may differ
/// from `completed`.
#[instrument(skip(api))]
pub async fn toggle_completion<T>(
  api: &ApiClient<T>,
  id: TaskId,
  completed: bool
) -> TaskAction
where
  T: Transport
{
  let patch =
    TaskPatch::completed(completed);
  match api.update_task(id, &patch).await
  {
    | Ok(task) => {
      TaskAction::SetCompleted {
        id,
        completed: task.completed
      }
    }
    | Err(err) => {
      error!(error = %err, "failed to update task");
      TaskAction::Resync
    }
  }
}

#[instrument(skip(api))]
pub async fn rename_task<T>(
  api: &ApiClient<T>,
  id: TaskId,
  title: &str
) -> TaskAction
where
  T: Transport
{
  let patch = TaskPatch::title(title);
  match api.update_task(id, &patch).await
  {
    | Ok(task) => TaskAction::Update(task),
    | Err(err) => {
      error!(error = %err, "failed to rename task");
      TaskAction::Keep
    }
  }
}

#[instrument(skip(api))]
pub async fn delete_task<T>(
  api: &ApiClient<T>,
  id: TaskId
) -> TaskAction
where
  T: Transport
{
  match api.delete_task(id).await {
    | Ok(()) => TaskAction::Remove(id),
    | Err(err) => {
      error!(error = %err, "failed to delete task");
      TaskAction::Keep
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn task(
    id: TaskId,
    title: &str,
    completed: bool
  ) -> Task {
    Task {
      id,
      title: title.to_string(),
      completed
    }
  }

  fn seeded() -> TaskList {
    let mut list = TaskList::new();
    list.apply(TaskAction::Replace(vec![
      task(1, "Buy milk", false),
      task(2, "Walk dog", true),
    ]));
    list
  }

  #[test]
  fn append_keeps_server_order() {
    let mut list = seeded();
    let render = list.apply(
      TaskAction::Append(task(
        9, "Call mum", false
      ))
    );
    assert_eq!(render, Render::Full);
    let ids: Vec<TaskId> = list
      .tasks()
      .iter()
      .map(|t| t.id)
      .collect();
    assert_eq!(ids, vec![1, 2, 9]);
  }

  #[test]
  fn set_completed_only_touches_target() {
    let mut list = seeded();
    list.apply(TaskAction::SetCompleted {
      id:        2,
      completed: false
    });
    assert_eq!(list.tasks()[0], task(1, "Buy milk", false));
    assert_eq!(list.tasks()[1], task(2, "Walk dog", false));
  }

  #[test]
  fn keep_leaves_vector_and_revision_alone(
  ) {
    let mut list = seeded();
    let before_ptr =
      list.tasks().as_ptr();
    let before_rev = list.revision();

    assert_eq!(
      list.apply(TaskAction::Keep),
      Render::Skip
    );
    assert_eq!(
      list.tasks().as_ptr(),
      before_ptr
    );
    assert_eq!(
      list.revision(),
      before_rev
    );
  }

  #[test]
  fn resync_redraws_without_mutation() {
    let mut list = seeded();
    let snapshot = list.tasks().to_vec();
    let before_ptr =
      list.tasks().as_ptr();
    let before_rev = list.revision();

    assert_eq!(
      list.apply(TaskAction::Resync),
      Render::Full
    );
    assert_eq!(list.tasks(), snapshot.as_slice());
    assert_eq!(
      list.tasks().as_ptr(),
      before_ptr
    );
    assert_eq!(
      list.revision(),
      before_rev + 1
    );
  }

  #[test]
  fn remove_and_update_by_id() {
    let mut list = seeded();
    list.apply(TaskAction::Update(task(
      1,
      "Buy oat milk",
      false
    )));
    assert_eq!(
      list.get(1).map(|t| t.title.as_str()),
      Some("Buy oat milk")
    );

    list.apply(TaskAction::Remove(1));
    assert!(list.get(1).is_none());
    assert_eq!(list.len(), 1);

    list.apply(TaskAction::Remove(42));
    assert_eq!(list.len(), 1);
  }
}
