use tasklist_core::controls::{
  AuthTab,
  Controls
};
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
pub struct AuthPanelProps {
  pub controls:          Controls,
  pub login_email:
    UseStateHandle<String>,
  pub login_password:
    UseStateHandle<String>,
  pub register_email:
    UseStateHandle<String>,
  pub register_password:
    UseStateHandle<String>,
  pub register_confirm:
    UseStateHandle<String>,
  pub on_select_tab:     Callback<AuthTab>,
  pub on_login:          Callback<()>,
  pub on_register:       Callback<()>,
  pub on_google:         Callback<()>
}

#[function_component(AuthPanel)]
pub fn auth_panel(
  props: &AuthPanelProps
) -> Html {
  let controls = &props.controls;

  let submit = |callback: &Callback<()>| {
    let callback = callback.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        callback.emit(());
      }
    )
  };
  let on_google = props.on_google.clone();

  let form_class = |tab: AuthTab| {
    classes!(
      "auth-form",
      controls
        .is_active(tab)
        .then_some("active")
    )
  };

  html! {
      <>
          <div class="auth-tabs">
              {
                  for AuthTab::ALL.into_iter().map(|tab| {
                      let on_select_tab = props.on_select_tab.clone();
                      html! {
                          <button
                              type="button"
                              class={classes!("auth-tab", controls.is_active(tab).then_some("active"))}
                              data-tab={tab.id()}
                              onclick={move |_| on_select_tab.emit(tab)}
                          >
                              { tab.label() }
                          </button>
                      }
                  })
              }
          </div>

          <form
              id={AuthTab::Login.form_id()}
              class={form_class(AuthTab::Login)}
              onsubmit={submit(&props.on_login)}
          >
              <input
                  id="login-email"
                  type="email"
                  placeholder="Email"
                  required={true}
                  value={(*props.login_email).clone()}
                  oninput={bind_text(&props.login_email)}
              />
              <input
                  id="login-password"
                  type="password"
                  placeholder="Password"
                  required={true}
                  value={(*props.login_password).clone()}
                  oninput={bind_text(&props.login_password)}
              />
              <div id="login-error" class="error">{ &controls.login_error }</div>
              <button type="submit">{ "Login" }</button>
              <button
                  type="button"
                  id="google-login-btn"
                  onclick={move |_| on_google.emit(())}
              >
                  { "Sign in with Google" }
              </button>
          </form>

          <form
              id={AuthTab::Register.form_id()}
              class={form_class(AuthTab::Register)}
              onsubmit={submit(&props.on_register)}
          >
              <input
                  id="register-email"
                  type="email"
                  placeholder="Email"
                  required={true}
                  value={(*props.register_email).clone()}
                  oninput={bind_text(&props.register_email)}
              />
              <input
                  id="register-password"
                  type="password"
                  placeholder="Password"
                  required={true}
                  value={(*props.register_password).clone()}
                  oninput={bind_text(&props.register_password)}
              />
              <input
                  id="register-confirm-password"
                  type="password"
                  placeholder="Confirm password"
                  required={true}
                  value={(*props.register_confirm).clone()}
                  oninput={bind_text(&props.register_confirm)}
              />
              <div id="register-error" class="error">{ &controls.register_error }</div>
              <button type="submit">{ "Register" }</button>
          </form>
      </>
  }
}
