//! Shell completions command

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::CompletionsArgs;
use crate::error::{Result, RiggerError};

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    generate(shell, &mut std::io::stdout().lock());
    Ok(())
}

fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "elvish" => Ok(Shell::Elvish),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "zsh" => Ok(Shell::Zsh),
        _ => Err(RiggerError::UnknownShell {
            shell: name.to_string(),
        }),
    }
}

fn generate(shell: Shell, out: &mut dyn Write) {
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "rigger", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_names() {
        assert_eq!(parse_shell("bash").unwrap(), Shell::Bash);
        assert_eq!(parse_shell("Zsh").unwrap(), Shell::Zsh);
        assert_eq!(parse_shell("pwsh").unwrap(), Shell::PowerShell);
        assert_eq!(parse_shell("ELVISH").unwrap(), Shell::Elvish);
    }

    #[test]
    fn test_parse_shell_unknown() {
        let err = parse_shell("tcsh").unwrap_err();
        assert!(matches!(err, RiggerError::UnknownShell { shell } if shell == "tcsh"));
    }

    #[test]
    fn test_generate_mentions_subcommands() {
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("rigger"));
        assert!(script.contains("deploy"));
        assert!(script.contains("inspect"));
    }
}
