// Shared utility functions for CLI commands

use anyhow::{Context, Result};
use cidgate::{add_path, ContentPath, ImportOptions, MemoryNamesys, MemoryStore};
use std::path::{Path, PathBuf};

/// A `NAME=TARGET` publish argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishArg {
    pub name: String,
    pub target: String,
}

/// Clap value parser for `NAME=TARGET`
pub fn parse_publish(s: &str) -> Result<PublishArg, String> {
    let (name, target) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TARGET, got {:?}", s))?;
    if name.trim().is_empty() || target.trim().is_empty() {
        return Err(format!("expected NAME=TARGET, got {:?}", s));
    }
    Ok(PublishArg {
        name: name.trim().to_string(),
        target: target.trim().to_string(),
    })
}

/// A target is a content path when it is scoped, otherwise a local path to import
pub fn publish_target(store: &MemoryStore, target: &str, options: ImportOptions) -> Result<ContentPath> {
    if target.starts_with("/ipfs/") || target.starts_with("/ipns/") {
        return ContentPath::parse(target)
            .with_context(|| format!("Invalid content path {:?}", target));
    }
    let stats = add_path(store, Path::new(target), options)
        .with_context(|| format!("Failed to import {}", target))?;
    Ok(ContentPath::ipfs(stats.root))
}

/// Import local paths and publish names into fresh in-memory backends
pub fn seed_backends(
    adds: &[PathBuf],
    publishes: &[PublishArg],
    options: ImportOptions,
) -> Result<(MemoryStore, MemoryNamesys)> {
    let store = MemoryStore::new();
    let names = MemoryNamesys::new();

    for path in adds {
        let stats = add_path(&store, path, options)
            .with_context(|| format!("Failed to import {}", display_path(path).display()))?;
        log::info!(
            "Added {} as /ipfs/{} ({} files, {} directories)",
            display_path(path).display(),
            stats.root,
            stats.files,
            stats.directories
        );
    }

    for publish in publishes {
        let target = publish_target(&store, &publish.target, options)?;
        names
            .publish(&publish.name, target.clone())
            .with_context(|| format!("Failed to publish {}", publish.name))?;
        log::info!("Published /ipns/{} -> {}", publish.name, target);
    }

    Ok((store, names))
}

/// Display path resolving "." to absolute path
pub fn display_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
