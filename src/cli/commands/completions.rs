//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::FocusError;

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, FocusError> {
    let shell = shell_from_str(shell).ok_or_else(|| {
        FocusError::InvalidArgument(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

/// Generate the completion script for a shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, FocusError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "ultifocus", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| FocusError::InvalidArgument(format!("completion script is not UTF-8: {e}")))
}

fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

/// Installation instructions for a shell's completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc:
source <(ultifocus completions bash)
"
        .to_string(),

        Shell::Zsh => "# Save to your fpath, then run compinit:
ultifocus completions zsh > ~/.zsh/completions/_ultifocus
"
        .to_string(),

        Shell::Fish => "# Save to fish completions directory:
ultifocus completions fish > ~/.config/fish/completions/ultifocus.fish
"
        .to_string(),

        Shell::PowerShell => "# Add to your PowerShell profile ($PROFILE):
ultifocus completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => "# Save to elvish completions directory:
ultifocus completions elvish > ~/.elvish/lib/ultifocus.elv
"
        .to_string(),

        _ => "Unknown shell".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_str() {
        assert_eq!(shell_from_str("bash"), Some(Shell::Bash));
        assert_eq!(shell_from_str("PWSH"), Some(Shell::PowerShell));
        assert_eq!(shell_from_str("tcsh"), None);
    }

    #[test]
    fn test_generate_bash_completions() {
        let script = completions("bash", false).unwrap();
        assert!(script.contains("ultifocus"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_install_instructions() {
        let text = completions("fish", true).unwrap();
        assert!(text.contains("ultifocus completions fish"));
    }

    #[test]
    fn test_unknown_shell() {
        assert!(matches!(
            completions("tcsh", false),
            Err(FocusError::InvalidArgument(_))
        ));
    }
}
