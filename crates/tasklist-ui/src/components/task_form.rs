use yew::{
  Callback,
  Html,
  Properties,
  SubmitEvent,
  UseStateHandle,
  function_component,
  html
};

use super::bind_text;

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub value:     UseStateHandle<String>,
  pub on_submit: Callback<SubmitEvent>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  html! {
      <form id="task-form" class="task-form" onsubmit={props.on_submit.clone()}>
          <input
              id="task-input"
              type="text"
              placeholder="What needs to be done?"
              value={(*props.value).clone()}
              oninput={bind_text(&props.value)}
          />
          <button type="submit">{ "Add" }</button>
      </form>
  }
}
