use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "ultifocus")]
#[command(about = "Distraction-resistant focus sessions in your terminal")]
#[command(long_about = "ultifocus - UltiFocus lock mode for the terminal

Runs a timed focus session that takes over the terminal. In lock mode the
usual ways out (Ctrl+C, closing shortcuts, switching away) are intercepted
and counted as exit attempts. The only way out before the timer ends is an
emergency exit that asks for confirmation twice and forfeits the session's
rewards.

QUICK START:
  ultifocus start              25 minute lock session
  ultifocus start -d 50m       50 minute lock session
  ultifocus start --standard   Standard session, 'q' ends it
  ultifocus device             Show how well lock mode works here

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  ultifocus <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a focus session
    ///
    /// Takes over the terminal and counts down. In lock mode, exit
    /// shortcuts are intercepted and counted; press Esc or 'e' for an
    /// emergency exit.
    ///
    /// # Examples
    ///
    ///   ultifocus start
    ///   ultifocus start -d 1h30m
    ///   ultifocus start --standard -d 15
    #[command(alias = "s")]
    Start(StartArgs),

    /// Show device capabilities and lock-mode effectiveness
    ///
    /// Classifies the current terminal, or any user agent passed with
    /// --user-agent, and reports which lock features are available.
    ///
    /// # Examples
    ///
    ///   ultifocus device
    ///   ultifocus device --user-agent "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
    #[command(alias = "d")]
    Device {
        /// User agent to classify instead of the terminal's own
        #[arg(long, short = 'u')]
        user_agent: Option<String>,
    },

    /// Preview a session's countdown and rewards without starting it
    Preview {
        /// Session length (e.g. 25m, 1h, 90s; a bare number is minutes)
        #[arg(long, short = 'd')]
        duration: Option<String>,

        /// Preview a standard session instead of lock mode
        #[arg(long)]
        standard: bool,
    },

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: ultifocus completions bash > ~/.bash_completion.d/ultifocus
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for `start`.
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Session length (e.g. 25m, 1h, 90s; a bare number is minutes)
    #[arg(long, short = 'd')]
    pub duration: Option<String>,

    /// Run a standard session without lock mode
    #[arg(long)]
    pub standard: bool,

    /// User agent to classify instead of the terminal's own
    #[arg(long, short = 'u')]
    pub user_agent: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
