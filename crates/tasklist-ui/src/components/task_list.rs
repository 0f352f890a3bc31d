use tasklist_core::controls::DELETE_BUTTON_CLASS;
use tasklist_core::view::TaskRowView;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListPanelProps {
  pub rows:     Vec<TaskRowView>,
  pub revision: u64,
  /// Single delegated handler for the
  /// whole list.
  pub on_click: Callback<MouseEvent>
}

#[function_component(TaskListPanel)]
pub fn task_list_panel(
  props: &TaskListPanelProps
) -> Html {
  let revision = props.revision;

  // Keyed on the revision so every
  // render rebuilds the rows, undoing a
  // checkbox the server refused.
  html! {
      <ul id="task-list" class="task-list" onclick={props.on_click.clone()}>
          {
              for props.rows.iter().map(|row| html! {
                  <li key={format!("{revision}:{}", row.id)} class="task-item">
                      <input
                          type="checkbox"
                          checked={row.checked}
                          data-id={row.id.to_string()}
                      />
                      <span class={row.title_class}>{ &row.title }</span>
                      <button class={DELETE_BUTTON_CLASS} data-id={row.id.to_string()}>
                          { "Delete" }
                      </button>
                  </li>
              })
          }
      </ul>
  }
}
