use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use memsim::config::{Config, DEFAULT_CONFIG_FILE};
use memsim::coordinator::Coordinator;
use memsim::remote::SimulatorClient;
use memsim::session::Session;

use crate::Commands;

#[derive(Parser)]
#[command(name = "memsim")]
#[command(about = "Terminal client for the memory management simulator", long_about = None)]
pub(crate) struct Cli {
    /// Config file (missing file means defaults)
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Simulator base URL; overrides the config file
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load(&cli.config)?;
    if let Some(url) = cli.url {
        cfg.base_url = url;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    match cli.command {
        None | Some(Commands::Tui) => {
            memsim::logging::init_file(&cfg.log_file)?;
            runtime.block_on(memsim::tui::run(memsim::tui::TuiRunOptions { config: cfg }))
        }
        Some(command) => {
            memsim::logging::init_stderr();
            runtime.block_on(crate::cli_exec::handle_command(&cfg, command))
        }
    }
}

/// Client, session and coordinator for `cfg`. Nothing is fetched yet.
pub(crate) fn connect(cfg: &Config) -> Result<Coordinator> {
    let client = SimulatorClient::new(&cfg.base_url, cfg.request_timeout())?;
    Ok(Coordinator::new(client, Session::shared()))
}
