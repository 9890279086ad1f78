use anyhow::Result;
use clap::{Parser, Subcommand};

// CLI Commands (cmd_ prefix)
mod cmd_add;
mod cmd_completions;
mod cmd_resolve;
mod cmd_serve;

// Helper modules (no cmd_ prefix)
mod logger;
mod utils;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format custom help template with grouped commands
fn format_help_template() -> &'static str {
    concat!(
        "{about-with-newline}\n\n",
        "{usage-heading}\n  {usage}\n\n",
        "Options:\n{options}\n\n",
        "Gateway:\n",
        "  serve     Start the HTTP gateway\n",
        "\n",
        "Content:\n",
        "  add       Compute the content identifier of a file or directory\n",
        "  resolve   Resolve a mutable name against a set of published names\n",
        "\n",
        "Utilities:\n",
        "  completions Generate shell completion scripts\n",
        "\n",
        "See 'cidgate <COMMAND> --help' for more information on a specific command.\n"
    )
}

#[derive(Parser)]
#[command(bin_name = "cidgate")]
#[command(version = VERSION)]
#[command(about = concat!("cidgate v", env!("CARGO_PKG_VERSION"), " - content-addressed HTTP gateway"))]
#[command(long_about = concat!(
    "cidgate v", env!("CARGO_PKG_VERSION"), " - content-addressed HTTP gateway\n\n",
    "Serves immutable files and directories by content identifier under\n",
    "/ipfs/<cid>, and mutable names under /ipns/<name> or through the\n",
    "request's Host header."
))]
#[command(author)]
#[command(propagate_version = true)]
#[command(help_template = format_help_template())]
pub struct Cli {
    /// Only print errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve(cmd_serve::ServeCommand),
    Add(cmd_add::AddCommand),
    Resolve(cmd_resolve::ResolveCommand),
    Completions(cmd_completions::CompletionsCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger based on verbosity flags
    logger::init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve(cmd) => cmd_serve::run(cmd, cli.quiet)?,
        Commands::Add(cmd) => cmd_add::run(cmd, cli.quiet)?,
        Commands::Resolve(cmd) => cmd_resolve::run(cmd, cli.verbose)?,
        Commands::Completions(cmd) => cmd_completions::run(cmd)?,
    }

    Ok(())
}

/// Macro to create clap help templates with examples
/// This works around the limitation that {bin} doesn't work in after_help
/// Uses env! macro to get binary name at compile time
#[macro_export]
macro_rules! clap_help {
    (examples: $examples:literal) => {{
        const BIN: &str = env!("CARGO_PKG_NAME");
        concat!(
            "{about-with-newline}\n",
            "{usage-heading} {usage}\n\n",
            "{all-args}\n\n",
            "Examples:\n",
            $examples
        ).replace("{bin}", BIN)
    }};
}
