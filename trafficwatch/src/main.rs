mod cli;

use crate::cli::{Cli, Command, GenerateArgs, RunArgs};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use trafficwatch_core::generator::generate;
use trafficwatch_core::logging::{DisplayMode, init_logging};
use trafficwatch_core::monitor::Monitor;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Generate(args)) => run_generator(args),
        Some(Command::Run(args)) => run_monitor(args),
        None => run_monitor(RunArgs::default()),
    }
}

fn run_monitor(args: RunArgs) -> Result<()> {
    let mode = args.display_mode();
    // Keeps the non-blocking log writer alive until exit.
    let _guard = init_logging(mode, args.log_file.as_deref())?;

    let config = args.resolve_config()?;
    let runtime = Runtime::new().context("failed to start tokio runtime")?;

    runtime.block_on(async {
        let monitor = Monitor::start(config, mode).await?;

        let token = monitor.shutdown_token();
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested");
            token.cancel();
        })?;

        monitor.wait().await?;
        Ok::<_, anyhow::Error>(())
    })
}

fn run_generator(args: GenerateArgs) -> Result<()> {
    let _guard = init_logging(DisplayMode::Quiet, None)?;

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let runtime = Runtime::new().context("failed to start tokio runtime")?;
    let written = runtime.block_on(generate(args.into(), token))?;

    tracing::info!(written, "generator finished");
    Ok(())
}
