use tasklist_core::view::ProfileView;
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProfileMenuProps {
  pub profile:     ProfileView,
  pub open:        bool,
  pub trigger_ref: NodeRef,
  pub menu_ref:    NodeRef,
  pub on_toggle:   Callback<()>,
  pub on_edit:     Callback<()>,
  pub on_logout:   Callback<()>
}

#[function_component(ProfileMenu)]
pub fn profile_menu(
  props: &ProfileMenuProps
) -> Html {
  let on_toggle = props.on_toggle.clone();
  let on_edit = props.on_edit.clone();
  let on_logout = props.on_logout.clone();

  html! {
      <header class="app-header">
          <h1 id="tasks-title">{ &props.profile.title }</h1>
          <button
              id="profile-btn"
              type="button"
              ref={props.trigger_ref.clone()}
              onclick={move |_| on_toggle.emit(())}
          >
              { &props.profile.display_name }
          </button>
          <div
              id="profile-dropdown"
              ref={props.menu_ref.clone()}
              class={classes!("profile-dropdown", (!props.open).then_some("hidden"))}
          >
              <div id="user-name">{ &props.profile.display_name }</div>
              <div id="user-email" class="profile-email">{ &props.profile.email }</div>
              <button
                  id="edit-profile-btn"
                  type="button"
                  onclick={move |_| on_edit.emit(())}
              >
                  { "Edit profile" }
              </button>
              <button
                  id="logout-btn"
                  type="button"
                  onclick={move |_| on_logout.emit(())}
              >
                  { "Logout" }
              </button>
          </div>
      </header>
  }
}
