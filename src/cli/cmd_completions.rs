// Completions command - generate shell completion scripts
use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use cidgate::constants;
use std::io;

#[derive(Args)]
#[command(
    alias = "completion",
    about = "Generate shell completion scripts",
    long_about = "Generate a tab-completion script for bash, zsh, fish or PowerShell and write it
to stdout. Without a shell argument, installation instructions are printed.",
    help_template = crate::clap_help!(
        examples: "  # Bash\n  \
                   {bin} completions bash > ~/.bash_completion.d/cidgate\n\n  \
                   # Zsh (with ~/.zsh/completions in fpath)\n  \
                   {bin} completions zsh > ~/.zsh/completions/_cidgate\n\n  \
                   # Fish\n  \
                   {bin} completions fish > ~/.config/fish/completions/cidgate.fish"
    )
)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    /// If not specified, shows installation instructions
    #[arg(value_enum)]
    pub shell: Option<ShellArg>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ShellArg {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl From<ShellArg> for Shell {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Bash => Shell::Bash,
            ShellArg::Zsh => Shell::Zsh,
            ShellArg::Fish => Shell::Fish,
            ShellArg::PowerShell => Shell::PowerShell,
        }
    }
}

pub fn run(cmd: CompletionsCommand) -> Result<()> {
    match cmd.shell {
        Some(shell_arg) => {
            let shell: Shell = shell_arg.into();
            let mut app = super::Cli::command();
            let bin_name = app.get_name().to_string();
            generate(shell, &mut app, bin_name, &mut io::stdout());
        }
        None => show_instructions(),
    }
    Ok(())
}

fn show_instructions() {
    let bin = constants::BINARY_NAME;

    println!("Shell Completion Setup");
    println!("══════════════════════\n");
    println!("Usage:");
    println!("  {} completions <SHELL>\n", bin);
    println!("Bash:");
    println!("  {} completions bash > ~/.bash_completion.d/{}", bin, bin);
    println!("  echo 'source ~/.bash_completion.d/{}' >> ~/.bashrc\n", bin);
    println!("Zsh:");
    println!("  mkdir -p ~/.zsh/completions");
    println!("  {} completions zsh > ~/.zsh/completions/_{}", bin, bin);
    println!("  echo 'fpath=(~/.zsh/completions $fpath)' >> ~/.zshrc\n");
    println!("Fish:");
    println!("  {} completions fish > ~/.config/fish/completions/{}.fish\n", bin, bin);
    println!("PowerShell:");
    println!("  {} completions powershell > {}.ps1", bin, bin);
    println!("  . ./{}.ps1", bin);
}
