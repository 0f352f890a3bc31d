mod auth_panel;
mod profile_menu;
mod profile_modal;
mod task_form;
mod task_list;

pub use auth_panel::AuthPanel;
pub use profile_menu::ProfileMenu;
pub use profile_modal::ProfileModal;
pub use task_form::TaskForm;
pub use task_list::TaskListPanel;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  InputEvent,
  TargetCast,
  UseStateHandle
};

/// Keeps a text field and its state
/// handle in step.
fn bind_text(
  handle: &UseStateHandle<String>
) -> Callback<InputEvent> {
  let handle = handle.clone();
  Callback::from(
    move |event: InputEvent| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      handle.set(input.value());
    }
  )
}
