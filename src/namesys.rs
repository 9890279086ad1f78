// Name resolution - maps mutable names to content paths, following bounded indirections

use crate::constants::DEFAULT_DEPTH_LIMIT;
use crate::content_path::{ContentPath, PathRoot};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The name has no mapping
    #[error("could not resolve name")]
    NotFound,
    /// The chain of indirections did not end in a content-addressed path
    #[error("could not resolve name (recursion limit exceeded)")]
    DepthExceeded,
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    /// Failure reported by a resolver backend
    #[error("{0}")]
    Backend(String),
}

/// Result of a traced resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Terminal `/ipfs/` path, including any sub-path carried through indirections
    pub path: ContentPath,
    /// Names visited, in order
    pub trail: Vec<String>,
}

/// Naming backend capability injected into the gateway
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Single lookup without following indirections
    async fn resolve_once(&self, name: &str) -> Result<ContentPath, ResolveError>;

    /// Resolve with the system-wide depth limit
    async fn resolve(&self, name: &str) -> Result<ContentPath, ResolveError> {
        self.resolve_n(name, DEFAULT_DEPTH_LIMIT).await
    }

    /// Resolve following at most `max_depth` lookups
    async fn resolve_n(&self, name: &str, max_depth: usize) -> Result<ContentPath, ResolveError> {
        resolve_trail(self, name, max_depth)
            .await
            .map(|resolution| resolution.path)
    }
}

/// Follow `/ipns/` indirections until a content-addressed path is reached
///
/// Each hop's sub-path is placed in front of the sub-path accumulated so far, so
/// `a -> /ipns/b/x` and `b -> /ipfs/<cid>/y` resolve `a` to `/ipfs/<cid>/y/x`.
pub async fn resolve_trail<R>(
    resolver: &R,
    name: &str,
    max_depth: usize,
) -> Result<Resolution, ResolveError>
where
    R: NameResolver + ?Sized,
{
    let mut current = normalize_name(name);
    if current.is_empty() {
        return Err(ResolveError::InvalidName(name.to_string()));
    }

    let mut rest: Vec<String> = Vec::new();
    let mut trail = Vec::new();

    for _ in 0..max_depth {
        trail.push(current.clone());
        let hop = resolver.resolve_once(&current).await?;

        let mut segments = hop.segments().to_vec();
        segments.append(&mut rest);
        rest = segments;

        match hop.root() {
            PathRoot::Ipfs(cid) => {
                let path = ContentPath::ipfs(cid.clone())
                    .join(&rest)
                    .map_err(|e| ResolveError::Backend(e.to_string()))?;
                log::debug!("[Namesys] {} resolved via {:?} to {}", name, trail, path);
                return Ok(Resolution { path, trail });
            }
            PathRoot::Ipns(next) => current = next.clone(),
        }
    }

    log::debug!("[Namesys] {} exceeded depth limit {} via {:?}", name, max_depth, trail);
    Err(ResolveError::DepthExceeded)
}

/// Normalize a mutable name key (removes `/ipns/` prefix and trailing root dot, lowercases)
pub fn normalize_name(name: &str) -> String {
    name.trim_start_matches("/ipns/")
        .trim_matches('/')
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

// ============================================================================
// In-memory naming table
// ============================================================================

/// Concurrent-read name table; publishing is only used by fixtures and the CLI
#[derive(Default)]
pub struct MemoryNamesys {
    entries: RwLock<HashMap<String, ContentPath>>,
}

impl MemoryNamesys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, name: &str, path: ContentPath) -> Result<(), ResolveError> {
        let key = normalize_name(name);
        if key.is_empty() || key.contains('/') {
            return Err(ResolveError::InvalidName(name.to_string()));
        }
        log::debug!("[Namesys] publish {} -> {}", key, path);
        self.entries
            .write()
            .map_err(|_| ResolveError::Backend("name table lock poisoned".into()))?
            .insert(key, path);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NameResolver for MemoryNamesys {
    async fn resolve_once(&self, name: &str) -> Result<ContentPath, ResolveError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ResolveError::Backend("name table lock poisoned".into()))?;
        entries
            .get(&normalize_name(name))
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cid::Cid;

    fn target() -> ContentPath {
        ContentPath::ipfs(Cid::digest(b"fnord"))
    }

    #[tokio::test]
    async fn test_resolve_direct_mapping() {
        let ns = MemoryNamesys::new();
        ns.publish("example.com", target()).unwrap();

        assert_eq!(ns.resolve("example.com").await.unwrap(), target());
        assert_eq!(ns.resolve("/ipns/example.com").await.unwrap(), target());
        assert_eq!(ns.resolve("EXAMPLE.com.").await.unwrap(), target());
    }

    #[tokio::test]
    async fn test_unknown_name_fails() {
        let ns = MemoryNamesys::new();
        let err = ns.resolve("nxdomain.example.com").await.unwrap_err();
        assert_eq!(err, ResolveError::NotFound);
        assert_eq!(err.to_string(), "could not resolve name");
    }

    #[tokio::test]
    async fn test_indirections_carry_sub_paths() {
        let ns = MemoryNamesys::new();
        ns.publish("a.example", ContentPath::parse("/ipns/b.example/x").unwrap())
            .unwrap();
        ns.publish("b.example", target().join(["y"]).unwrap()).unwrap();

        let resolution = resolve_trail(&ns, "a.example", DEFAULT_DEPTH_LIMIT)
            .await
            .unwrap();
        assert_eq!(resolution.path, target().join(["y", "x"]).unwrap());
        assert_eq!(resolution.trail, vec!["a.example", "b.example"]);
    }

    #[tokio::test]
    async fn test_depth_limit() {
        let ns = MemoryNamesys::new();
        ns.publish("n0.example", ContentPath::parse("/ipns/n1.example").unwrap())
            .unwrap();
        ns.publish("n1.example", ContentPath::parse("/ipns/n2.example").unwrap())
            .unwrap();
        ns.publish("n2.example", target()).unwrap();

        assert_eq!(ns.resolve_n("n0.example", 3).await.unwrap(), target());
        assert_eq!(
            ns.resolve_n("n0.example", 2).await.unwrap_err(),
            ResolveError::DepthExceeded
        );
        assert_eq!(
            ns.resolve_n("n0.example", 0).await.unwrap_err(),
            ResolveError::DepthExceeded
        );
    }

    #[tokio::test]
    async fn test_self_reference_terminates() {
        let ns = MemoryNamesys::new();
        ns.publish("loop.example", ContentPath::parse("/ipns/loop.example").unwrap())
            .unwrap();
        assert_eq!(
            ns.resolve("loop.example").await.unwrap_err(),
            ResolveError::DepthExceeded
        );
    }

    #[test]
    fn test_publish_rejects_empty_names() {
        let ns = MemoryNamesys::new();
        assert!(ns.publish("", target()).is_err());
        assert!(ns.publish("/ipns/", target()).is_err());
        assert!(ns.is_empty());
        ns.publish("ok.example", target()).unwrap();
        assert_eq!(ns.len(), 1);
    }
}
