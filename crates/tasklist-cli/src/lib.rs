pub mod cli;
pub mod config;
pub mod render;
pub mod repl;
pub mod transport;

use std::ffi::OsString;
use std::io;

use anyhow::Context;
use clap::Parser;
use tasklist_core::ApiClient;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting tasklist CLI"
  );

  let mut cfg = config::Config::load(
    cli.rc_file.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );
  if let Some(base) = cli.base_url {
    cfg.apply_overrides([(
      config::API_BASE_KEY.to_string(),
      base
    )]);
  }
  debug!(files = ?cfg.loaded_files, "configuration resolved");

  let renderer =
    render::Renderer::new(&cfg)?;
  let api = ApiClient::new(
    transport::HttpTransport::new()?,
    cfg.client_config()
  );
  info!(api_base = %api.config().api_base, "using API");

  let one_shot = (!cli.rest.is_empty())
    .then(|| {
      cli
        .rest
        .iter()
        .map(|arg| {
          arg.to_string_lossy().to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
    });

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async runtime"
      )?;

  runtime.block_on(async {
    let mut shell = repl::Shell::new(
      &api,
      &renderer,
      io::stdout().lock()
    );
    shell.start().await?;
    match one_shot {
      | Some(line) => {
        shell.run_line(&line).await?;
        anyhow::Ok(())
      }
      | None => {
        shell.run(io::stdin().lock()).await
      }
    }
  })?;

  info!("done");
  Ok(())
}
