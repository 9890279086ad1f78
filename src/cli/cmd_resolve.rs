// Resolve command - offline check of a mutable name against published names
use super::utils::{parse_publish, seed_backends, PublishArg};
use anyhow::{Context, Result};
use cidgate::{fetch, resolve_trail, ImportOptions};
use clap::Args;

#[derive(Args)]
#[command(
    about = "Resolve a mutable name",
    long_about = "Resolve NAME through the names given with --publish, exactly as the gateway
would for /ipns/NAME, and print the resulting /ipfs/ path.

Indirections (a name published to /ipns/<other>) are followed up to --depth-limit
times. With --verbose every name visited along the way is printed.",
    help_template = crate::clap_help!(
        examples: "  # Resolve a name published to a directory\n  \
                   {bin} resolve example.net --publish example.net=./site\n\n  \
                   # Follow an alias\n  \
                   {bin} resolve www.example.net \\\n    \
                   --publish example.net=./site --publish www.example.net=/ipns/example.net/docs"
    )
)]
pub struct ResolveCommand {
    /// Name to resolve (with or without /ipns/)
    pub name: String,

    /// Publish NAME pointing at a content path or a local path to import (repeatable)
    #[arg(long = "publish", value_name = "NAME=TARGET", value_parser = parse_publish)]
    pub publishes: Vec<PublishArg>,

    /// Maximum number of name indirections followed
    #[arg(long, default_value_t = cidgate::constants::DEFAULT_DEPTH_LIMIT)]
    pub depth_limit: usize,
}

pub fn run(cmd: ResolveCommand, verbose: bool) -> Result<()> {
    let (store, names) = seed_backends(&[], &cmd.publishes, ImportOptions::default())?;

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(async {
        let resolution = resolve_trail(&names, &cmd.name, cmd.depth_limit)
            .await
            .with_context(|| format!("Failed to resolve {}", cmd.name))?;

        if verbose {
            for (hop, name) in resolution.trail.iter().enumerate() {
                eprintln!("  {}. /ipns/{}", hop + 1, name);
            }
        }
        println!("{}", resolution.path);

        match fetch(&store, &resolution.path).await {
            Ok(resolved) if verbose => {
                let kind = if resolved.node.is_directory() { "directory" } else { "file" };
                eprintln!("  -> {} {}", kind, resolved.cid);
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                log::warn!("{} is not available locally: {}", resolution.path, e);
            }
            Err(e) => return Err(e.into()),
        }
        Ok::<(), anyhow::Error>(())
    })
}
