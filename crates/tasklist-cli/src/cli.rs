use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser};
use tasklist_core::TaskId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "Terminal client for the tasklist API",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "rc-file")]
    pub rc_file: Option<PathBuf>,

    /// Overrides `api.base` from the rc file.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Run one command and exit instead of reading from stdin.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// One line of input, already split into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { email: String, password: String, confirm: String },
    Logout,
    Whoami,
    Profile { first_name: String, last_name: String },
    Google,
    List,
    Add { title: String },
    Toggle { id: TaskId, completed: bool },
    Rename { id: TaskId, title: String },
    Remove { id: TaskId },
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  login <email> <password>
  register <email> <password> <confirm>
  logout
  whoami
  profile <first> <last>
  google
  list
  add <title...>
  done <id> | undo <id>
  rename <id> <title...>
  rm <id>
  help
  quit";

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        let Some((word, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match word {
            "login" => {
                let [email, password] = words::<2>(word, rest)?;
                Self::Login { email, password }
            }
            "register" => {
                let [email, password, confirm] = words::<3>(word, rest)?;
                Self::Register {
                    email,
                    password,
                    confirm,
                }
            }
            "logout" => Self::Logout,
            "whoami" => Self::Whoami,
            "profile" => {
                let [first_name, last_name] = words::<2>(word, rest)?;
                Self::Profile {
                    first_name,
                    last_name,
                }
            }
            "google" => Self::Google,
            "list" | "ls" => Self::List,
            // Blank titles are left for the model to drop.
            "add" => Self::Add {
                title: rest.to_string(),
            },
            "done" | "toggle" => Self::Toggle {
                id: task_id(rest)?,
                completed: true,
            },
            "undo" => Self::Toggle {
                id: task_id(rest)?,
                completed: false,
            },
            "rename" => {
                let (id, title) =
                    split_word(rest).ok_or_else(|| anyhow!("usage: rename <id> <title...>"))?;
                if title.trim().is_empty() {
                    return Err(anyhow!("usage: rename <id> <title...>"));
                }
                Self::Rename {
                    id: task_id(id)?,
                    title: title.trim().to_string(),
                }
            }
            "rm" | "delete" => Self::Remove { id: task_id(rest)? },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(anyhow!("unknown command: {other} (try `help`)")),
        };

        debug!(command = word, "parsed command");
        Ok(Some(command))
    }
}

fn split_word(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((line, "")),
    }
}

fn words<const N: usize>(command: &str, rest: &str) -> anyhow::Result<[String; N]> {
    let parts: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    let count = parts.len();
    parts
        .try_into()
        .map_err(|_| anyhow!("{command} expects {N} arguments, got {count}"))
}

fn task_id(raw: &str) -> anyhow::Result<TaskId> {
    let raw = raw.trim();
    raw.parse::<TaskId>()
        .map_err(|_| anyhow!("expected a task id, got: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(Command::parse("   ").expect("parse"), None);
    }

    #[test]
    fn add_keeps_the_whole_title() {
        assert_eq!(
            Command::parse("add  Buy oat milk ").expect("parse"),
            Some(Command::Add {
                title: "Buy oat milk".to_string()
            })
        );
    }

    #[test]
    fn toggle_aliases_set_direction() {
        assert_eq!(
            Command::parse("done 4").expect("parse"),
            Some(Command::Toggle {
                id: 4,
                completed: true
            })
        );
        assert_eq!(
            Command::parse("undo 4").expect("parse"),
            Some(Command::Toggle {
                id: 4,
                completed: false
            })
        );
    }

    #[test]
    fn rename_splits_id_from_title() {
        assert_eq!(
            Command::parse("rename 2 Walk both dogs").expect("parse"),
            Some(Command::Rename {
                id: 2,
                title: "Walk both dogs".to_string()
            })
        );
        assert!(Command::parse("rename 2").is_err());
    }

    #[test]
    fn bad_ids_and_arity_are_rejected() {
        assert!(Command::parse("rm abc").is_err());
        assert!(Command::parse("login a@b.com").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn rc_override_parses_key_value() {
        let kv: KeyVal = "api.base = http://localhost:5000".parse().expect("kv");
        assert_eq!(kv.key, "api.base");
        assert_eq!(kv.value, "http://localhost:5000");
        assert!("nope".parse::<KeyVal>().is_err());
    }
}
