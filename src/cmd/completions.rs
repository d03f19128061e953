//! Completions command implementation
//!
//! Handles the `component-size-report completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// component-size-report completions bash > /etc/bash_completion.d/component-size-report
///
/// # Zsh
/// component-size-report completions zsh > ~/.zfunc/_component-size-report
///
/// # Fish
/// component-size-report completions fish > ~/.config/fish/completions/component-size-report.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
