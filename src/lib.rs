//! cidgate - resolution and serving core of a content-addressed HTTP gateway
//!
//! Requests are turned into `/ipfs/<cid>/...` paths (directly, or by resolving a
//! mutable name taken from `/ipns/<name>` or the Host header), the addressed node is
//! fetched from a [`ContentStore`], and files or directory listings are rendered.
//!
//! ```no_run
//! use cidgate::{ContentPath, MemoryNamesys, MemoryStore, Node};
//!
//! let store = MemoryStore::new();
//! let cid = store.add_bytes("fnord").unwrap();
//! let names = MemoryNamesys::new();
//! names.publish("example.net", ContentPath::ipfs(cid)).unwrap();
//! assert_eq!(Node::file("fnord").cid().as_str().len(), 64);
//! ```

pub mod cid;
pub mod constants;
pub mod content_path;
pub mod format;
pub mod importer;
pub mod namesys;
pub mod node;
pub mod runtime;
pub mod store;

#[cfg(feature = "server")]
pub mod server;

pub use cid::{Cid, InvalidCid};
pub use content_path::{ContentPath, PathError, PathRoot};
pub use importer::{add_path, ImportOptions, ImportStats};
pub use namesys::{resolve_trail, MemoryNamesys, NameResolver, Resolution, ResolveError};
pub use node::{Directory, DirectoryBuilder, Link, LinkKind, Node, NodeError};
pub use runtime::GatewayRuntime;
pub use store::{fetch, ContentStore, MemoryStore, Resolved, StoreError};
