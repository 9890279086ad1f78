#![allow(dead_code)]

use anyhow::Result;
use std::sync::Arc;

use cidgate::{Cid, ContentPath, Directory, MemoryNamesys, MemoryStore, Node};

/// Prefix every test gateway accepts
pub const GOOD_PREFIX: &str = "/good-prefix";

/// In-memory backends shared by a test router and the test body
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub names: Arc<MemoryNamesys>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            names: Arc::new(MemoryNamesys::new()),
        }
    }

    pub fn publish(&self, name: &str, path: &str) -> Result<()> {
        self.names.publish(name, ContentPath::parse(path)?)?;
        Ok(())
    }

    pub fn publish_cid(&self, name: &str, cid: &Cid) -> Result<()> {
        self.names.publish(name, ContentPath::ipfs(cid.clone()))?;
        Ok(())
    }

    /// Store `node` and every node in `children`, returning the identifier of `node`
    pub fn put_all(&self, children: Vec<Node>, node: Node) -> Result<Cid> {
        for child in children {
            self.store.put(child)?;
        }
        Ok(self.store.put(node)?)
    }

    /// A single file containing "fnord"
    pub fn add_fnord(&self) -> Result<Cid> {
        Ok(self.store.add_bytes("fnord")?)
    }

    /// `/` with `_` and `foo/index.html`
    pub fn add_index_tree(&self) -> Result<Cid> {
        let underscore = Node::file("_");
        let index = Node::file("_");
        let foo = Node::Directory(Directory::from_children([("index.html", &index)])?);
        let root = Node::Directory(Directory::from_children([("_", &underscore), ("foo", &foo)])?);
        self.put_all(vec![underscore, index, foo], root)
    }

    /// `/index.html` next to `/about.txt`
    pub fn add_root_index_tree(&self) -> Result<Cid> {
        let index = Node::file("<h1>welcome</h1>");
        let about = Node::file("about");
        let root = Node::Directory(Directory::from_children([
            ("about.txt", &about),
            ("index.html", &index),
        ])?);
        self.put_all(vec![index, about], root)
    }

    /// `/file.txt`, `/foo? #<'/file.txt` and `/foo? #<'/bar/file.txt`
    pub fn add_backlink_tree(&self) -> Result<Cid> {
        let file1 = Node::file("1");
        let file2 = Node::file("2");
        let file3 = Node::file("3");
        let bar = Node::Directory(Directory::from_children([("file.txt", &file3)])?);
        let foo = Node::Directory(Directory::from_children([
            ("file.txt", &file2),
            ("bar", &bar),
        ])?);
        let root = Node::Directory(Directory::from_children([
            ("file.txt", &file1),
            ("foo? #<'", &foo),
        ])?);
        self.put_all(vec![file1, file2, file3, bar, foo], root)
    }

    pub fn config(&self) -> cidgate::server::ServerConfig {
        let mut config = cidgate::server::ServerConfig::default();
        config.path_prefixes = vec![GOOD_PREFIX.to_string()];
        config.version.commit = "theshortcommithash".to_string();
        config
    }

    pub fn router(&self) -> Result<axum::Router> {
        self.router_with(self.config())
    }

    pub fn router_with(&self, config: cidgate::server::ServerConfig) -> Result<axum::Router> {
        let server = cidgate::server::Server::new(self.names.clone(), self.store.clone(), config)?;
        Ok(server.router())
    }
}

/// Build a GET request with a Host header
pub fn get(host: &str, path: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(path)
        .header("host", host)
        .body(axum::body::Body::empty())
        .expect("valid request")
}

/// Status, headers and body text of a router response
pub async fn send(
    router: axum::Router,
    request: axum::http::Request<axum::body::Body>,
) -> Result<(axum::http::StatusCode, axum::http::HeaderMap, String)> {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let response = router.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, headers, String::from_utf8(bytes.to_vec())?))
}

/// Serve `router` on an ephemeral port; returns the base URL and the server task
pub async fn start_test_server(
    router: axum::Router,
) -> Result<(String, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok((format!("http://{}", addr), handle))
}
