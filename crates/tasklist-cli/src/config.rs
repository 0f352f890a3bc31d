//! `~/.tasklistrc`: `key = value` lines,
//! `#` comments and `include <path>`
//! directives, layered over built-in
//! defaults and then command-line
//! overrides.

use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  bail
};
use tasklist_core::ClientConfig;
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const API_BASE_KEY: &str =
  "api.base";
pub const COLOR_KEY: &str = "color";

const RC_ENV: &str = "TASKLISTRC";
const RC_FILE_NAME: &str = ".tasklistrc";
const KNOWN_KEYS: [&str; 2] =
  [API_BASE_KEY, COLOR_KEY];

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

/// Where the rc file came from, or why
/// there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RcSource {
  Flag(PathBuf),
  Env(PathBuf),
  Home(PathBuf),
  Disabled,
  Absent
}

impl RcSource {
  fn locate(
    flag: Option<&Path>
  ) -> Self {
    if let Some(path) = flag {
      return Self::Flag(path.to_path_buf());
    }
    match std::env::var(RC_ENV) {
      | Ok(value) if value == "/dev/null" => {
        Self::Disabled
      }
      | Ok(value) => {
        Self::Env(PathBuf::from(value))
      }
      | Err(_) => {
        dirs::home_dir()
          .map(|home| home.join(RC_FILE_NAME))
          .filter(|path| path.exists())
          .map_or(Self::Absent, Self::Home)
      }
    }
  }

  fn path(&self) -> Option<&Path> {
    match self {
      | Self::Flag(path)
      | Self::Env(path)
      | Self::Home(path) => Some(path),
      | Self::Disabled | Self::Absent => {
        None
      }
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Blank,
  Include(&'a str),
  Setting {
    key:   &'a str,
    value: &'a str
  }
}

impl<'a> RcLine<'a> {
  /// `None` for a line that is neither
  /// blank, an include nor `key = value`.
  fn parse(raw: &'a str) -> Option<Self> {
    let line = raw
      .split_once('#')
      .map_or(raw, |(before, _)| before)
      .trim();

    if line.is_empty() {
      return Some(Self::Blank);
    }
    if let Some(target) =
      line.strip_prefix("include ")
    {
      return Some(Self::Include(
        target.trim()
      ));
    }
    let (key, value) =
      line.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then(|| {
      Self::Setting {
        key,
        value: value.trim()
      }
    })
  }
}

impl Config {
  /// Built-in defaults only.
  pub fn defaults() -> Self {
    let map = [
      (API_BASE_KEY, "http://localhost:3000"),
      (COLOR_KEY, "on")
    ]
    .into_iter()
    .map(|(key, value)| {
      (key.to_string(), value.to_string())
    })
    .collect();
    Config {
      map,
      loaded_files: Vec::new()
    }
  }

  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::defaults();

    let source =
      RcSource::locate(rc_override);
    match source.path() {
      | Some(path) => {
        info!(?source, "loading tasklistrc");
        cfg.read_rc(path, &mut Vec::new())?;
      }
      | None => {
        debug!(?source, "using default settings");
      }
    }

    Ok(cfg)
  }

  /// `rc.` prefixes are accepted so
  /// `--set rc.api.base=...` and
  /// `--set api.base=...` agree.
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key
        .strip_prefix("rc.")
        .map(str::to_string)
        .unwrap_or(key);
      debug!(%key, %value, "applying override");
      self.set(key, value);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn client_config(
    &self
  ) -> ClientConfig {
    ClientConfig::with_base(
      self
        .get(API_BASE_KEY)
        .unwrap_or_default()
    )
  }

  fn set(
    &mut self,
    key: String,
    value: String
  ) {
    if !KNOWN_KEYS.contains(&key.as_str())
    {
      warn!(%key, "unknown setting");
    }
    self.map.insert(key, value);
  }

  /// `stack` holds the files currently
  /// being read, outermost first.
  fn read_rc(
    &mut self,
    path: &Path,
    stack: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = home_relative(path);
    if stack.contains(&path) {
      bail!(
        "include cycle through {}",
        path.display()
      );
    }

    let text = fs::read_to_string(&path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    self.loaded_files.push(path.clone());
    stack.push(path.clone());

    for (idx, raw) in
      text.lines().enumerate()
    {
      let line_no = idx + 1;
      let Some(line) = RcLine::parse(raw)
      else {
        bail!(
          "invalid config line {}:{}: {}",
          path.display(),
          line_no,
          raw
        );
      };

      match line {
        | RcLine::Blank => {}
        | RcLine::Include("") => {
          bail!(
            "{}:{}: include path cannot be empty",
            path.display(),
            line_no
          );
        }
        | RcLine::Include(target) => {
          let target =
            include_target(&path, target);
          if target.exists() {
            debug!(include = %target.display(), line = line_no, "reading include");
            self.read_rc(&target, stack)?;
          } else {
            warn!(include = %target.display(), "include file does not exist; skipping");
          }
        }
        | RcLine::Setting {
          key,
          value
        } => {
          trace!(key, value, "rc setting");
          self.set(
            key.to_string(),
            value.to_string()
          );
        }
      }
    }

    stack.pop();
    Ok(())
  }
}

/// Include paths are relative to the
/// file that names them.
fn include_target(
  including: &Path,
  target: &str
) -> PathBuf {
  let target =
    home_relative(Path::new(target));
  if target.is_absolute() {
    return target;
  }
  including
    .parent()
    .unwrap_or_else(|| Path::new("."))
    .join(target)
}

fn home_relative(
  path: &Path
) -> PathBuf {
  path
    .strip_prefix("~")
    .ok()
    .zip(dirs::home_dir())
    .map_or_else(
      || path.to_path_buf(),
      |(rest, home)| home.join(rest)
    )
}

pub fn parse_bool(
  s: &str
) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}
