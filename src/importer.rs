// Importer - adds a local file or directory tree to a store, bottom-up

use crate::cid::Cid;
use crate::node::{Directory, LinkKind, Node};
use crate::store::MemoryStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Options controlling which entries are imported
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Include dot-files and dot-directories
    pub hidden: bool,
}

/// Summary of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub root: Cid,
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// Import `path` into `store` and return the root identifier
pub fn add_path(store: &MemoryStore, path: &Path, options: ImportOptions) -> Result<ImportStats> {
    let mut stats = ImportStats {
        root: Cid::digest(&[]),
        files: 0,
        directories: 0,
        bytes: 0,
    };
    let (root, _, _) = add_entry(store, path, options, &mut stats)?;
    stats.root = root;
    Ok(stats)
}

fn add_entry(
    store: &MemoryStore,
    path: &Path,
    options: ImportOptions,
    stats: &mut ImportStats,
) -> Result<(Cid, u64, LinkKind)> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;

    if metadata.is_file() {
        let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let size = data.len() as u64;
        let cid = store.add_bytes(data)?;
        stats.files += 1;
        stats.bytes += size;
        log::debug!("[Importer] added {} ({} bytes) as {}", path.display(), size, cid);
        return Ok((cid, size, LinkKind::File));
    }

    if !metadata.is_dir() {
        anyhow::bail!("Unsupported file type: {}", path.display());
    }

    let mut entries: Vec<_> = fs::read_dir(path)
        .with_context(|| format!("Failed to list {}", path.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut builder = Directory::builder();
    for entry in entries {
        let name = entry.file_name().into_string().map_err(|name| {
            anyhow::anyhow!("Non UTF-8 file name {:?} in {}", name, path.display())
        })?;
        if !options.hidden && name.starts_with('.') {
            continue;
        }
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            log::warn!("[Importer] skipping symlink {}", entry.path().display());
            continue;
        }
        let (cid, size, kind) = add_entry(store, &entry.path(), options, stats)?;
        builder = builder.link(&name, cid, size, kind)?;
    }

    let dir = builder.build();
    let size = Node::Directory(dir.clone()).size();
    let cid = store.add_directory(dir)?;
    stats.directories += 1;
    log::debug!("[Importer] added directory {} as {}", path.display(), cid);
    Ok((cid, size, LinkKind::Directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_path::ContentPath;
    use crate::store::fetch;

    #[tokio::test]
    async fn test_import_tree() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("foo"))?;
        fs::write(dir.path().join("foo/index.html"), "<p>hi</p>")?;
        fs::write(dir.path().join("readme.txt"), "hello")?;
        fs::write(dir.path().join(".hidden"), "secret")?;

        let store = MemoryStore::new();
        let stats = add_path(&store, dir.path(), ImportOptions::default())?;
        assert_eq!(stats.files, 2);
        assert_eq!(stats.directories, 2);
        assert_eq!(stats.bytes, 14);

        let path = ContentPath::ipfs(stats.root.clone()).join(["foo", "index.html"])?;
        let resolved = fetch(&store, &path).await?;
        assert_eq!(resolved.node, Node::file("<p>hi</p>"));

        let root = fetch(&store, &ContentPath::ipfs(stats.root.clone())).await?;
        let Node::Directory(root) = root.node else {
            panic!("root should be a directory");
        };
        assert_eq!(root.get("foo").map(|l| l.kind), Some(LinkKind::Directory));
        assert_eq!(root.get("readme.txt").map(|l| l.kind), Some(LinkKind::File));

        let hidden = ContentPath::ipfs(stats.root).join([".hidden"])?;
        assert!(fetch(&store, &hidden).await.is_err());
        Ok(())
    }

    #[test]
    fn test_import_is_deterministic() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.txt"), "a")?;
        fs::write(dir.path().join("b.txt"), "b")?;

        let first = add_path(&MemoryStore::new(), dir.path(), ImportOptions::default())?;
        let second = add_path(&MemoryStore::new(), dir.path(), ImportOptions::default())?;
        assert_eq!(first.root, second.root);
        Ok(())
    }

    #[test]
    fn test_import_single_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("fnord.txt");
        fs::write(&file, "fnord")?;

        let store = MemoryStore::new();
        let stats = add_path(&store, &file, ImportOptions::default())?;
        assert_eq!(stats.root, Node::file("fnord").cid());
        assert_eq!(stats.directories, 0);
        Ok(())
    }
}
