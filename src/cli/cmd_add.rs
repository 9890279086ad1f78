// Add command - compute the content identifier of a local file or directory
use super::utils::display_path;
use anyhow::Result;
use cidgate::format::format_bytes;
use cidgate::{add_path, ImportOptions, MemoryStore};
use clap::{Args, ValueHint};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
#[command(
    about = "Compute the content identifier of a file or directory",
    long_about = "Import a file or directory tree into a throwaway in-memory store and print the
content identifier it would be served under, as /ipfs/<cid>.

Identifiers are deterministic: the same tree always yields the same identifier,
so this can be used to predict gateway URLs before starting 'serve'.",
    help_template = crate::clap_help!(
        examples: "  # Identifier of a directory\n  \
                   {bin} add ./site\n\n  \
                   # Include dot-files\n  \
                   {bin} add ./site --hidden\n\n  \
                   # Only print the identifier\n  \
                   {bin} add ./site --quiet"
    )
)]
pub struct AddCommand {
    /// File or directory to import
    #[arg(value_hint = ValueHint::AnyPath)]
    pub path: PathBuf,

    /// Include dot-files and dot-directories
    #[arg(long)]
    pub hidden: bool,
}

pub fn run(cmd: AddCommand, quiet: bool) -> Result<()> {
    let store = MemoryStore::new();
    let start = Instant::now();
    let stats = add_path(&store, &cmd.path, ImportOptions { hidden: cmd.hidden })?;

    if quiet {
        println!("{}", stats.root);
        return Ok(());
    }

    println!("/ipfs/{}", stats.root);
    eprintln!(
        "  {}: {} files, {} directories, {} in {:.3}s",
        display_path(&cmd.path).display(),
        stats.files,
        stats.directories,
        format_bytes(stats.bytes),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
