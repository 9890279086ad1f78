// Content store - fetch nodes by identifier and walk directory links along a content path

use crate::cid::Cid;
use crate::content_path::{ContentPath, PathRoot};
use crate::node::{Directory, Node};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("node {0} not found")]
    NotFound(Cid),
    #[error("no link named {name:?} under {parent}")]
    NoLink { name: String, parent: Cid },
    #[error("{0} is a file and has no links")]
    NotADirectory(Cid),
    /// A mutable-name path reached the store without being resolved first
    #[error("path {0} must be resolved before fetching")]
    Unresolved(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this error means "nothing at that address" rather than a backend failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound(_) | StoreError::NoLink { .. } | StoreError::NotADirectory(_)
        )
    }
}

/// Addressable node storage; availability, caching and retries belong to the implementation
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get(&self, cid: &Cid) -> Result<Node, StoreError>;
}

/// A node reached by walking a content path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub cid: Cid,
    pub node: Node,
}

/// Fetch the node addressed by an `/ipfs/` path, one link at a time
pub async fn fetch<S>(store: &S, path: &ContentPath) -> Result<Resolved, StoreError>
where
    S: ContentStore + ?Sized,
{
    let mut cid = match path.root() {
        PathRoot::Ipfs(cid) => cid.clone(),
        PathRoot::Ipns(_) => return Err(StoreError::Unresolved(path.to_string())),
    };
    let mut node = store.get(&cid).await?;

    for segment in path.segments() {
        let child = match &node {
            Node::Directory(dir) => dir.get(segment).map(|link| link.cid.clone()),
            Node::File(_) => return Err(StoreError::NotADirectory(cid)),
        };
        let child = child.ok_or_else(|| StoreError::NoLink {
            name: segment.clone(),
            parent: cid.clone(),
        })?;
        node = store.get(&child).await?;
        cid = child;
    }

    Ok(Resolved { cid, node })
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory node table, safe for concurrent readers
#[derive(Default)]
pub struct MemoryStore {
    nodes: RwLock<HashMap<Cid, Node>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and return its identifier; inserting the same node twice is a no-op
    pub fn put(&self, node: Node) -> Result<Cid, StoreError> {
        let cid = node.cid();
        let mut nodes = self
            .nodes
            .write()
            .map_err(|_| StoreError::Backend("node table lock poisoned".into()))?;
        nodes.entry(cid.clone()).or_insert(node);
        Ok(cid)
    }

    pub fn add_bytes(&self, data: impl Into<Bytes>) -> Result<Cid, StoreError> {
        self.put(Node::File(data.into()))
    }

    pub fn add_directory(&self, dir: Directory) -> Result<Cid, StoreError> {
        self.put(Node::Directory(dir))
    }

    pub fn len(&self) -> usize {
        self.nodes.read().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self, cid: &Cid) -> Result<Node, StoreError> {
        let nodes = self
            .nodes
            .read()
            .map_err(|_| StoreError::Backend("node table lock poisoned".into()))?;
        nodes
            .get(cid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(cid.clone()))
    }
}
