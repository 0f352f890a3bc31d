use yew::{
  Callback,
  Html,
  Properties,
  SubmitEvent,
  UseStateHandle,
  classes,
  function_component,
  html
};

use super::bind_text;

#[derive(Properties, PartialEq)]
pub struct ProfileModalProps {
  pub open:       bool,
  pub first_name: UseStateHandle<String>,
  pub last_name:  UseStateHandle<String>,
  pub on_save:    Callback<()>,
  pub on_cancel:  Callback<()>
}

#[function_component(ProfileModal)]
pub fn profile_modal(
  props: &ProfileModalProps
) -> Html {
  let hidden = (!props.open).then_some("hidden");

  let on_save = props.on_save.clone();
  let onsubmit = Callback::from(
    move |event: SubmitEvent| {
      event.prevent_default();
      on_save.emit(());
    }
  );
  let on_cancel = props.on_cancel.clone();
  let on_overlay = props.on_cancel.clone();

  html! {
      <>
          <div
              id="overlay"
              class={classes!("overlay", hidden)}
              onclick={move |_| on_overlay.emit(())}
          ></div>
          <div id="profile-modal" class={classes!("modal", hidden)}>
              <h2>{ "Edit profile" }</h2>
              <form id="profile-form" {onsubmit}>
                  <input
                      id="first-name"
                      type="text"
                      placeholder="First name"
                      value={(*props.first_name).clone()}
                      oninput={bind_text(&props.first_name)}
                  />
                  <input
                      id="last-name"
                      type="text"
                      placeholder="Last name"
                      value={(*props.last_name).clone()}
                      oninput={bind_text(&props.last_name)}
                  />
                  <button type="submit">{ "Save" }</button>
                  <button
                      type="button"
                      id="cancel-profile-btn"
                      onclick={move |_| on_cancel.emit(())}
                  >
                      { "Cancel" }
                  </button>
              </form>
          </div>
      </>
  }
}
