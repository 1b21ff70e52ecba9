//! Skiff entry point
//!
//! An interactive shell for Docker-compatible container engines.

use std::fs::OpenOptions;
use std::io;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use skiff::cli::repl::Shell;
use skiff::cli::Cli;
use skiff::engine::{Engine, HttpEngine};
use skiff::shell::completion::Completer;
use skiff::shell::fallback::ProcessHandoff;
use skiff::shell::{Context, Dispatcher, Interrupt};
use skiff::storage::{ShellConfig, SkiffPaths};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = SkiffPaths::new()?;
    paths.ensure_directories()?;
    let mut config = ShellConfig::load_or_init(&paths, cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.docker_host = Some(host);
    }
    if let Some(timeout) = cli.timeout {
        config.client_timeout = timeout;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // stdout and stderr belong to the session, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .with_context(|| format!("opening {}", paths.log_file().display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let interrupt = Interrupt::new();
    interrupt.install()?;

    let host = config.engine_host();
    let timeout = Duration::from_secs(config.client_timeout);
    let engine = match HttpEngine::connect(&host, timeout, interrupt.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    info!(%host, version = skiff::VERSION, "connected to engine");

    let context = Context {
        engine: Rc::new(engine) as Rc<dyn Engine>,
        handoff: Rc::new(ProcessHandoff),
        cli_binary: config.external_cli.clone(),
        prefer_long: config.long_option_names,
    };
    let mut shell = Shell::new(Dispatcher::new(context), Completer::new(config.long_option_names))
        .with_interrupt(interrupt);

    let (mut stdout, mut stderr) = (io::stdout(), io::stderr());
    if let Some(line) = cli.command {
        shell.run_line(&line, &mut stdout, &mut stderr)?;
        return Ok(());
    }

    println!(
        "{} {}. Type \"help\" to list commands, end a line with ? for completions.",
        skiff::APP_NAME,
        skiff::VERSION
    );
    shell.prime();
    shell.run(io::stdin().lock(), &mut stdout, &mut stderr)?;
    Ok(())
}
