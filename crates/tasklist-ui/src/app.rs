mod location;
mod state;
mod storage;

use gloo::events::{
  EventListener,
  EventListenerOptions
};
use tasklist_core::api::defaults;
use tasklist_core::controls::{
  AuthTab,
  ClickTarget,
  TaskClick,
  classify_task_click,
  task_title_input
};
use tasklist_core::view::{
  ProfileView,
  task_rows
};
use tasklist_core::{
  ApiClient,
  AuthView,
  TaskAction,
  oauth,
  session,
  tasks
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
  Element,
  HtmlInputElement,
  Node
};
use yew::{
  Callback,
  Html,
  NodeRef,
  SubmitEvent,
  classes,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer,
  use_state
};

use self::state::{
  ControlsAction,
  ControlsState,
  SessionState,
  TaskFollowUp,
  TaskState
};
use crate::api::FetchTransport;
use crate::components::{
  AuthPanel,
  ProfileMenu,
  ProfileModal,
  TaskForm,
  TaskListPanel
};

type Api = ApiClient<FetchTransport>;

#[function_component(App)]
pub fn app() -> Html {
  let api = use_memo((), |_| {
    Api::new(
      FetchTransport,
      storage::load_client_config()
    )
  });

  let auth =
    use_reducer(SessionState::default);
  let task_state =
    use_reducer(TaskState::default);
  let controls =
    use_reducer(ControlsState::default);

  let login_email =
    use_state(String::new);
  let login_password =
    use_state(String::new);
  let register_email =
    use_state(String::new);
  let register_password =
    use_state(String::new);
  let register_confirm =
    use_state(String::new);
  let task_input = use_state(String::new);
  let profile_first =
    use_state(String::new);
  let profile_last =
    use_state(String::new);

  let menu_trigger = NodeRef::default();
  let menu_panel = NodeRef::default();

  // Startup: OAuth return, then the
  // initial auth check.
  {
    let api = api.clone();
    let auth = auth.clone();
    let controls = controls.clone();
    use_effect_with((), move |_| {
      let fragment =
        location::current_fragment();
      let oauth_failed =
        oauth::error_code_from_fragment(
          &fragment
        )
        .is_some();
      controls.dispatch(
        ControlsAction::OAuthReturn(
          fragment
        )
      );

      if oauth_failed {
        tracing::warn!("returned from google with an error");
        location::reset_to_root();
        auth.dispatch(None);
      }

      spawn_local(async move {
        let user =
          session::check_auth_status(&api)
            .await;
        auth.dispatch(user);
      });
      || ()
    });
  }

  // Task list follows session changes.
  {
    let api = api.clone();
    let task_state = task_state.clone();
    use_effect_with(
      (auth.generation, auth.task_follow_up()),
      move |(_, follow_up)| {
        match follow_up {
          | Some(TaskFollowUp::Fetch) => {
            spawn_local(async move {
              let action =
                tasks::fetch_tasks(&api)
                  .await;
              task_state.dispatch(action);
            });
          }
          | Some(TaskFollowUp::Clear) => {
            task_state.dispatch(
              TaskAction::Replace(Vec::new())
            );
          }
          | None => {}
        }
        || ()
      }
    );
  }

  {
    let profile_first =
      profile_first.clone();
    let profile_last =
      profile_last.clone();
    use_effect_with(
      auth.session.user().cloned(),
      move |user| {
        if let Some(user) = user {
          let view =
            ProfileView::from_user(user);
          profile_first
            .set(view.first_name);
          profile_last
            .set(view.last_name);
        }
        || ()
      }
    );
  }

  {
    let controls = controls.clone();
    let menu_trigger =
      menu_trigger.clone();
    let menu_panel = menu_panel.clone();
    use_effect_with((), move |_| {
      let document =
        gloo::utils::document();
      let listener =
        EventListener::new_with_options(
          &document,
          "click",
          EventListenerOptions::run_in_capture_phase(),
          move |event| {
            let target = event
              .target()
              .and_then(|target| {
                target.dyn_into::<Node>().ok()
              });
            let inside = |node: &NodeRef| {
              node.get().is_some_and(|node| {
                node.contains(target.as_ref())
              })
            };
            controls.dispatch(
              ControlsAction::DocumentClick {
                inside_trigger: inside(
                  &menu_trigger
                ),
                inside_menu:    inside(
                  &menu_panel
                )
              }
            );
          }
        );
      move || drop(listener)
    });
  }

  let on_select_tab = {
    let controls = controls.clone();
    Callback::from(move |tab: AuthTab| {
      controls.dispatch(
        ControlsAction::SelectTab(tab)
      );
    })
  };

  let on_login = {
    let api = api.clone();
    let auth = auth.clone();
    let controls = controls.clone();
    let login_email =
      login_email.clone();
    let login_password =
      login_password.clone();
    Callback::from(move |_| {
      let api = api.clone();
      let auth = auth.clone();
      let controls = controls.clone();
      let login_password =
        login_password.clone();
      let email = (*login_email).clone();
      let password =
        (*login_password).clone();
      spawn_local(async move {
        match session::login(
          &api, &email, &password
        )
        .await
        {
          | Ok(user) => {
            controls.dispatch(
              ControlsAction::LoginError(
                String::new()
              )
            );
            login_password
              .set(String::new());
            auth.dispatch(Some(user));
          }
          | Err(err) => {
            tracing::error!(error = %err, "login error");
            controls.dispatch(
              ControlsAction::LoginError(
                err.user_message()
              )
            );
          }
        }
      });
    })
  };

  let on_register = {
    let api = api.clone();
    let auth = auth.clone();
    let controls = controls.clone();
    let register_email =
      register_email.clone();
    let register_password =
      register_password.clone();
    let register_confirm =
      register_confirm.clone();
    Callback::from(move |_| {
      let api = api.clone();
      let auth = auth.clone();
      let controls = controls.clone();
      let register_password =
        register_password.clone();
      let register_confirm =
        register_confirm.clone();
      let email =
        (*register_email).clone();
      let password =
        (*register_password).clone();
      let confirm =
        (*register_confirm).clone();
      spawn_local(async move {
        match session::register_with_confirmation(
          &api, &email, &password,
          &confirm
        )
        .await
        {
          | Ok(user) => {
            controls.dispatch(
              ControlsAction::RegisterError(
                String::new()
              )
            );
            register_password
              .set(String::new());
            register_confirm
              .set(String::new());
            auth.dispatch(Some(user));
          }
          | Err(err) => {
            tracing::error!(error = %err, "registration error");
            controls.dispatch(
              ControlsAction::RegisterError(
                err.user_message()
              )
            );
          }
        }
      });
    })
  };

  let on_google = {
    let api = api.clone();
    let controls = controls.clone();
    Callback::from(move |_| {
      let api = api.clone();
      let controls = controls.clone();
      controls.dispatch(
        ControlsAction::LoginError(
          String::new()
        )
      );
      spawn_local(async move {
        match session::initiate_google_login(&api).await {
          | Ok(url) => {
            storage::save_google_auth_started();
            location::navigate_to(&url);
          }
          | Err(_) => {
            controls.dispatch(
              ControlsAction::LoginError(
                defaults::GOOGLE_START
                  .to_string()
              )
            );
          }
        }
      });
    })
  };

  let on_toggle_menu = {
    let controls = controls.clone();
    Callback::from(move |_| {
      controls.dispatch(
        ControlsAction::ToggleProfileMenu
      );
    })
  };

  let on_edit_profile = {
    let controls = controls.clone();
    Callback::from(move |_| {
      controls.dispatch(
        ControlsAction::OpenProfileModal
      );
    })
  };

  let on_logout = {
    let api = api.clone();
    let auth = auth.clone();
    let controls = controls.clone();
    Callback::from(move |_| {
      let api = api.clone();
      let auth = auth.clone();
      let controls = controls.clone();
      spawn_local(async move {
        if session::logout(&api)
          .await
          .is_ok()
        {
          auth.dispatch(None);
          controls.dispatch(
            ControlsAction::CloseProfileMenu
          );
        }
      });
    })
  };

  let on_save_profile = {
    let api = api.clone();
    let auth = auth.clone();
    let controls = controls.clone();
    let profile_first =
      profile_first.clone();
    let profile_last =
      profile_last.clone();
    Callback::from(move |_| {
      let api = api.clone();
      let auth = auth.clone();
      let controls = controls.clone();
      let first = (*profile_first).clone();
      let last = (*profile_last).clone();
      spawn_local(async move {
        match session::update_profile(
          &api, &first, &last
        )
        .await
        {
          | Ok(user) => {
            auth.dispatch(Some(user));
            controls.dispatch(
              ControlsAction::CloseProfileModal
            );
          }
          | Err(err) => {
            tracing::error!(error = %err, "profile update error");
          }
        }
      });
    })
  };

  let on_cancel_profile = {
    let controls = controls.clone();
    Callback::from(move |_| {
      controls.dispatch(
        ControlsAction::CloseProfileModal
      );
    })
  };

  let on_add_task = {
    let api = api.clone();
    let task_state = task_state.clone();
    let task_input = task_input.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let Some(title) =
          task_title_input(&task_input)
        else {
          return;
        };
        let api = api.clone();
        let task_state =
          task_state.clone();
        let task_input =
          task_input.clone();
        spawn_local(async move {
          let action =
            tasks::add_task(&api, &title)
              .await;
          task_state.dispatch(action);
          task_input.set(String::new());
        });
      }
    )
  };

  let on_task_click = {
    let api = api.clone();
    let task_state = task_state.clone();
    Callback::from(
      move |event: yew::MouseEvent| {
        let Some(target) =
          click_target(&event)
        else {
          return;
        };
        let Some(click) =
          classify_task_click(&target)
        else {
          return;
        };
        let api = api.clone();
        let task_state =
          task_state.clone();
        spawn_local(async move {
          let action = match click {
            | TaskClick::Toggle {
              id,
              completed
            } => {
              tasks::toggle_completion(
                &api, id, completed
              )
              .await
            }
            | TaskClick::Delete {
              id
            } => {
              tasks::delete_task(&api, id)
                .await
            }
          };
          task_state.dispatch(action);
        });
      }
    )
  };

  let (auth_hidden, main_hidden) =
    match auth.session.view() {
      | AuthView::Authenticated => {
        (Some("hidden"), None)
      }
      | AuthView::Unauthenticated => {
        (None, Some("hidden"))
      }
    };
  let profile = auth
    .session
    .user()
    .map(ProfileView::from_user);

  html! {
      <>
          <div
              id="auth-container"
              class={classes!("auth-container", auth_hidden)}
          >
              <AuthPanel
                  controls={controls.controls.clone()}
                  login_email={login_email.clone()}
                  login_password={login_password.clone()}
                  register_email={register_email.clone()}
                  register_password={register_password.clone()}
                  register_confirm={register_confirm.clone()}
                  {on_select_tab}
                  {on_login}
                  {on_register}
                  {on_google}
              />
          </div>
          <div
              id="main-container"
              class={classes!("main-container", main_hidden)}
          >
              {
                  if let Some(profile) = profile {
                      html! {
                          <>
                              <ProfileMenu
                                  profile={profile}
                                  open={controls.controls.profile_menu_open}
                                  trigger_ref={menu_trigger.clone()}
                                  menu_ref={menu_panel.clone()}
                                  on_toggle={on_toggle_menu}
                                  on_edit={on_edit_profile}
                                  {on_logout}
                              />
                              <ProfileModal
                                  open={controls.controls.profile_modal_open}
                                  first_name={profile_first.clone()}
                                  last_name={profile_last.clone()}
                                  on_save={on_save_profile}
                                  on_cancel={on_cancel_profile}
                              />
                          </>
                      }
                  } else {
                      html! {}
                  }
              }
              <TaskForm value={task_input.clone()} on_submit={on_add_task} />
              <TaskListPanel
                  rows={task_rows(&task_state.list)}
                  revision={task_state.list.revision()}
                  on_click={on_task_click}
              />
          </div>
      </>
  }
}

fn click_target(
  event: &yew::MouseEvent
) -> Option<ClickTarget> {
  let element = event
    .target()?
    .dyn_into::<Element>()
    .ok()?;

  let input = element
    .dyn_ref::<HtmlInputElement>();

  Some(ClickTarget {
    tag_name:   element.tag_name(),
    input_type: element
      .get_attribute("type"),
    classes:    element
      .class_name()
      .split_whitespace()
      .map(str::to_string)
      .collect(),
    data_id:    element
      .get_attribute("data-id"),
    checked:    input
      .is_some_and(HtmlInputElement::checked)
  })
}
