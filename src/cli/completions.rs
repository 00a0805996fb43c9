use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Bash:\n    rigger completions bash > ~/.local/share/bash-completion/completions/rigger\n\n\
                  Zsh:\n    rigger completions zsh > \"${fpath[1]}/_rigger\"\n\n\
                  Fish:\n    rigger completions fish > ~/.config/fish/completions/rigger.fish\n\n\
                  PowerShell:\n    rigger completions pwsh | Out-String | Invoke-Expression")]
pub struct CompletionsArgs {
    /// Target shell: bash, elvish, fish, powershell (or pwsh), zsh; case-insensitive
    #[arg(value_name = "SHELL")]
    pub shell: String,
}
