//! Shell completion generation command.

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Binary name completions are generated for.
const BIN_NAME: &str = "manilist";

/// Writes shell completions for `shell` to `out`.
///
/// # Arguments
///
/// * `shell` - Target shell (bash, zsh, fish, powershell, elvish)
/// * `out` - Destination, normally stdout
pub fn execute(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_generation() {
        for shell in [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ] {
            let mut output = Vec::new();
            execute(shell, &mut output);
            assert!(!output.is_empty(), "no completions for {shell:?}");
        }
    }

    #[test]
    fn test_bash_completion_knows_subcommands() {
        let mut output = Vec::new();
        execute(Shell::Bash, &mut output);
        let script = String::from_utf8_lossy(&output);
        assert!(script.contains("manifest"));
        assert!(script.contains("--quiet"));
    }
}
