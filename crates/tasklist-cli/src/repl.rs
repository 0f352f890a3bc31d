//! Line-oriented front end over the
//! same session and task models the
//! browser uses. Each command maps onto
//! one model operation; the table is
//! reprinted whenever the list asks for a
//! full render.

use std::io::{
  BufRead,
  Write
};

use tasklist_core::api::defaults;
use tasklist_core::view::{
  ProfileView,
  task_rows
};
use tasklist_core::{
  ApiClient,
  Render,
  Session,
  SessionChange,
  TaskAction,
  TaskList,
  Transport,
  User,
  session,
  tasks
};
use tracing::{
  debug,
  info
};

use crate::cli::{
  Command,
  HELP
};
use crate::render::Renderer;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Flow {
  Continue,
  Quit
}

pub struct Shell<'a, T, W> {
  api:      &'a ApiClient<T>,
  renderer: &'a Renderer,
  out:      W,
  session:  Session,
  tasks:    TaskList
}

impl<'a, T, W> Shell<'a, T, W>
where
  T: Transport,
  W: Write
{
  pub fn new(
    api: &'a ApiClient<T>,
    renderer: &'a Renderer,
    out: W
  ) -> Self {
    Self {
      api,
      renderer,
      out,
      session: Session::new(),
      tasks: TaskList::new()
    }
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn tasks(&self) -> &TaskList {
    &self.tasks
  }

  pub fn into_output(self) -> W {
    self.out
  }

  /// Picks up an existing server
  /// session, if the cookie jar has one.
  pub async fn start(
    &mut self
  ) -> anyhow::Result<()> {
    let user =
      session::check_auth_status(
        self.api
      )
      .await;
    self.apply_user(user).await
  }

  pub async fn run<R: BufRead>(
    &mut self,
    input: R
  ) -> anyhow::Result<()> {
    for line in input.lines() {
      let line = line?;
      if self.run_line(&line).await?
        == Flow::Quit
      {
        break;
      }
    }
    info!("input closed");
    Ok(())
  }

  pub async fn run_line(
    &mut self,
    line: &str
  ) -> anyhow::Result<Flow> {
    match Command::parse(line) {
      | Ok(Some(command)) => {
        self.execute(command).await
      }
      | Ok(None) => Ok(Flow::Continue),
      | Err(err) => {
        writeln!(self.out, "error: {err}")?;
        Ok(Flow::Continue)
      }
    }
  }

  #[tracing::instrument(skip_all)]
  pub async fn execute(
    &mut self,
    command: Command
  ) -> anyhow::Result<Flow> {
    match command {
      | Command::Login {
        email,
        password
      } => {
        match session::login(
          self.api, &email, &password
        )
        .await
        {
          | Ok(user) => {
            self.apply_user(Some(user)).await?
          }
          | Err(err) => self.show_error(
            &err.user_message()
          )?
        }
      }
      | Command::Register {
        email,
        password,
        confirm
      } => {
        match session::register_with_confirmation(
          self.api, &email, &password,
          &confirm
        )
        .await
        {
          | Ok(user) => {
            self.apply_user(Some(user)).await?
          }
          | Err(err) => self.show_error(
            &err.user_message()
          )?
        }
      }
      | Command::Logout => {
        match session::logout(self.api).await {
          | Ok(()) => {
            self.apply_user(None).await?
          }
          | Err(err) => {
            debug!(error = %err, "still signed in");
          }
        }
      }
      | Command::Whoami => {
        match self.session.user() {
          | Some(user) => {
            let profile =
              ProfileView::from_user(user);
            self.renderer.print_profile(
              &mut self.out,
              &profile
            )?;
          }
          | None => self.not_signed_in()?
        }
      }
      | Command::Profile {
        first_name,
        last_name
      } => {
        if !self.session.is_authenticated()
        {
          self.not_signed_in()?;
          return Ok(Flow::Continue);
        }
        match session::update_profile(
          self.api,
          &first_name,
          &last_name
        )
        .await
        {
          | Ok(user) => {
            let profile =
              ProfileView::from_user(&user);
            self.apply_user(Some(user)).await?;
            self.renderer.print_profile(
              &mut self.out,
              &profile
            )?;
          }
          | Err(err) => self.show_error(
            &err.user_message()
          )?
        }
      }
      | Command::Google => {
        match session::initiate_google_login(self.api).await {
          | Ok(url) => {
            writeln!(
              self.out,
              "open this URL in a browser to continue:\n{url}"
            )?;
          }
          | Err(_) => self.show_error(
            defaults::GOOGLE_START
          )?
        }
      }
      | Command::List => {
        if self.require_auth()? {
          let action =
            tasks::fetch_tasks(self.api)
              .await;
          self.apply_tasks(action)?;
        }
      }
      | Command::Add {
        title
      } => {
        if self.require_auth()? {
          let action =
            tasks::add_task_from_input(
              self.api, &title
            )
            .await;
          self.apply_tasks(action)?;
        }
      }
      | Command::Toggle {
        id,
        completed
      } => {
        if self.require_auth()? {
          let action =
            tasks::toggle_completion(
              self.api, id, completed
            )
            .await;
          self.apply_tasks(action)?;
        }
      }
      | Command::Rename {
        id,
        title
      } => {
        if self.require_auth()? {
          let action = tasks::rename_task(
            self.api, id, &title
          )
          .await;
          self.apply_tasks(action)?;
        }
      }
      | Command::Remove {
        id
      } => {
        if self.require_auth()? {
          let action =
            tasks::delete_task(self.api, id)
              .await;
          self.apply_tasks(action)?;
        }
      }
      | Command::Help => {
        writeln!(self.out, "{HELP}")?;
      }
      | Command::Quit => {
        return Ok(Flow::Quit);
      }
    }

    Ok(Flow::Continue)
  }

  async fn apply_user(
    &mut self,
    user: Option<User>
  ) -> anyhow::Result<()> {
    let change =
      self.session.set_user(user);
    debug!(?change, "session changed");

    match change {
      | SessionChange::SignedIn => {
        if let Some(user) =
          self.session.user()
        {
          writeln!(
            self.out,
            "signed in as {}",
            user.email
          )?;
        }
      }
      | SessionChange::SignedOut => {
        self.tasks = TaskList::new();
        writeln!(self.out, "signed out")?;
      }
      | SessionChange::Refreshed
      | SessionChange::StillSignedOut => {}
    }

    if change.should_fetch_tasks() {
      let action =
        tasks::fetch_tasks(self.api).await;
      self.apply_tasks(action)?;
    }
    Ok(())
  }

  fn apply_tasks(
    &mut self,
    action: TaskAction
  ) -> anyhow::Result<()> {
    match self.tasks.apply(action) {
      | Render::Full => {
        self.renderer.print_task_table(
          &mut self.out,
          &task_rows(&self.tasks)
        )
      }
      | Render::Skip => {
        writeln!(self.out, "(unchanged)")?;
        Ok(())
      }
    }
  }

  fn require_auth(
    &mut self
  ) -> anyhow::Result<bool> {
    if self.session.is_authenticated() {
      Ok(true)
    } else {
      self.not_signed_in()?;
      Ok(false)
    }
  }

  fn not_signed_in(
    &mut self
  ) -> anyhow::Result<()> {
    writeln!(
      self.out,
      "not signed in; use `login`, `register` or `google`"
    )?;
    Ok(())
  }

  fn show_error(
    &mut self,
    message: &str
  ) -> anyhow::Result<()> {
    writeln!(self.out, "error: {message}")?;
    Ok(())
  }
}
