use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ultifocus::cli::args::{Cli, Commands};
use ultifocus::cli::commands;
use ultifocus::config::{ColorSetting, Config, Paths};
use ultifocus::error::FocusError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Log to `~/.ultifocus/ultifocus.log`; the terminal belongs to the TUI.
fn init_logging(paths: &Paths) -> anyhow::Result<()> {
    paths.ensure_dirs()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)
        .with_context(|| format!("opening {}", paths.log_file.display()))?;

    let filter =
        EnvFilter::try_from_env("ULTIFOCUS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn run(cli: Cli) -> Result<(), FocusError> {
    let paths = Paths::new()?;
    if let Err(e) = init_logging(&paths) {
        eprintln!("{}: logging disabled: {e:#}", "warning".yellow());
    }

    // `config` subcommands must work even when the file is broken.
    let config = match cli.command {
        Commands::Config(_) => Config::load_from_path(&paths.config_file).unwrap_or_default(),
        _ => Config::load_from_path(&paths.config_file)?,
    };
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }
    let format = cli.output.unwrap_or(config.general.default_output);
    debug!(?format, "dispatching command");

    let output = match cli.command {
        Commands::Start(args) => commands::start(&args, &config, format)?,
        Commands::Device { user_agent } => commands::device(user_agent, &config, format)?,
        Commands::Preview { duration, standard } => {
            commands::preview(duration.as_deref(), standard, &config, format)?
        }
        Commands::Config(args) => commands::config(&args.command, &paths, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
