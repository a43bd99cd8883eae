//! Configuration file commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::FocusError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written.
pub fn config(
    cmd: &ConfigCommands,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(&paths.config_file)?;
            match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => config.to_yaml(),
            }
        }

        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({
                "root": paths.root,
                "config": paths.config_file,
                "log": paths.log_file,
            })),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },

        ConfigCommands::Init { force } => init(paths, *force, format),
    }
}

fn init(paths: &Paths, force: bool, format: OutputFormat) -> Result<String, FocusError> {
    if paths.config_file.exists() && !force {
        return Err(FocusError::InvalidArgument(format!(
            "{} already exists. Use --force to overwrite.",
            paths.config_file.display()
        )));
    }

    paths.ensure_dirs()?;
    Config::default().save_to_path(&paths.config_file)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "written": paths.config_file,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Wrote".green(),
            paths.config_file.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("home"));

        config(&ConfigCommands::Init { force: false }, &paths, OutputFormat::Json).unwrap();
        assert!(paths.config_file.exists());

        let shown = config(&ConfigCommands::Show, &paths, OutputFormat::Pretty).unwrap();
        assert!(shown.contains("default_duration_minutes: 25"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        std::fs::write(&paths.config_file, "focus:\n  vibration: false\n").unwrap();

        let err = config(&ConfigCommands::Init { force: false }, &paths, OutputFormat::Pretty)
            .unwrap_err();
        assert!(matches!(err, FocusError::InvalidArgument(_)));

        config(&ConfigCommands::Init { force: true }, &paths, OutputFormat::Pretty).unwrap();
        let loaded = Config::load_from_path(&paths.config_file).unwrap();
        assert!(loaded.focus.vibration);
    }

    #[test]
    fn test_path_json() {
        let paths = Paths::with_root("/tmp/uf".into());
        let out = config(&ConfigCommands::Path, &paths, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["config"], "/tmp/uf/config.yaml");
    }
}
