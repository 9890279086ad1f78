// Node model - immutable files and directories addressed by content identifier

use crate::cid::Cid;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::Arc;

const FILE_TAG: u8 = 0x00;
const DIRECTORY_TAG: u8 = 0x01;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("invalid link name: {0:?}")]
    InvalidName(String),
    #[error("duplicate link name: {0:?}")]
    DuplicateName(String),
}

/// An addressed unit of stored content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Opaque payload, served verbatim
    File(Bytes),
    /// Named children ordered by name
    Directory(Directory),
}

impl Node {
    pub fn file(data: impl Into<Bytes>) -> Self {
        Node::File(data.into())
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn kind(&self) -> LinkKind {
        match self {
            Node::File(_) => LinkKind::File,
            Node::Directory(_) => LinkKind::Directory,
        }
    }

    /// Cumulative size of the content reachable from this node
    pub fn size(&self) -> u64 {
        match self {
            Node::File(data) => data.len() as u64,
            Node::Directory(dir) => dir.links().iter().map(|l| l.size).sum(),
        }
    }

    /// Canonical byte encoding the identifier is derived from
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Node::File(data) => {
                let mut out = Vec::with_capacity(data.len() + 1);
                out.push(FILE_TAG);
                out.extend_from_slice(data);
                out
            }
            Node::Directory(dir) => {
                let mut out = vec![DIRECTORY_TAG];
                for link in dir.links() {
                    out.extend_from_slice(&(link.name.len() as u32).to_be_bytes());
                    out.extend_from_slice(link.name.as_bytes());
                    out.extend_from_slice(link.cid.as_str().as_bytes());
                    out.extend_from_slice(&link.size.to_be_bytes());
                }
                out
            }
        }
    }

    pub fn cid(&self) -> Cid {
        Cid::digest(&self.encode())
    }
}

/// Kind of the node a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    File,
    Directory,
}

/// A named reference from a directory to a child node
///
/// `kind` is recorded when the directory is built so listings never fetch children.
/// It is implied by `cid`, so it takes no part in the canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub cid: Cid,
    pub size: u64,
    pub kind: LinkKind,
}

impl Link {
    pub fn is_directory(&self) -> bool {
        self.kind == LinkKind::Directory
    }
}

/// Directory node; links are sorted by name and names are unique
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directory {
    links: Arc<[Link]>,
}

impl Directory {
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder::default()
    }

    /// Build a directory from `(name, child)` pairs
    pub fn from_children<'a, I>(children: I) -> Result<Self, NodeError>
    where
        I: IntoIterator<Item = (&'a str, &'a Node)>,
    {
        let mut builder = DirectoryBuilder::default();
        for (name, node) in children {
            builder = builder.child(name, node)?;
        }
        Ok(builder.build())
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, name: &str) -> Option<&Link> {
        self.links
            .binary_search_by(|link| link.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.links[idx])
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Pure construction of a [`Directory`]; nothing is mutated once built
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    links: BTreeMap<String, Link>,
}

impl DirectoryBuilder {
    /// Link a child node by value; its identifier and size are derived from it
    pub fn child(self, name: &str, node: &Node) -> Result<Self, NodeError> {
        self.link(name, node.cid(), node.size(), node.kind())
    }

    /// Link an already-addressed child
    pub fn link(
        mut self,
        name: &str,
        cid: Cid,
        size: u64,
        kind: LinkKind,
    ) -> Result<Self, NodeError> {
        validate_link_name(name)?;
        if self.links.contains_key(name) {
            return Err(NodeError::DuplicateName(name.to_string()));
        }
        self.links.insert(
            name.to_string(),
            Link {
                name: name.to_string(),
                cid,
                size,
                kind,
            },
        );
        Ok(self)
    }

    pub fn build(self) -> Directory {
        Directory {
            links: self.links.into_values().collect(),
        }
    }
}

/// Link names must be addressable as a single path segment
pub fn validate_link_name(name: &str) -> Result<(), NodeError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\0')
    {
        return Err(NodeError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_sorted_by_name() {
        let a = Node::file("a");
        let b = Node::file("b");
        let dir = Directory::from_children([("zeta", &a), ("alpha", &b), ("mid", &a)]).unwrap();
        let names: Vec<&str> = dir.links().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        assert_eq!(dir.get("mid").unwrap().cid, a.cid());
        assert!(dir.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_and_invalid_names() {
        let f = Node::file("x");
        let err = Directory::builder()
            .child("same", &f)
            .unwrap()
            .child("same", &f)
            .unwrap_err();
        assert_eq!(err, NodeError::DuplicateName("same".into()));

        for bad in ["", ".", "..", "a/b"] {
            assert!(Directory::builder().child(bad, &f).is_err(), "{bad:?}");
        }
        // Unusual but addressable names are fine
        assert!(Directory::builder().child("foo? #<'", &f).is_ok());
    }

    #[test]
    fn test_identifier_depends_on_content_and_names() {
        let f = Node::file("1");
        let d1 = Node::Directory(Directory::from_children([("file.txt", &f)]).unwrap());
        let d2 = Node::Directory(Directory::from_children([("other.txt", &f)]).unwrap());
        assert_ne!(d1.cid(), d2.cid());
        assert_ne!(d1.cid(), f.cid());
        assert_eq!(d1.cid(), d1.clone().cid());
    }

    #[test]
    fn test_cumulative_size() {
        let a = Node::file("abc");
        let b = Node::file("de");
        let inner = Node::Directory(Directory::from_children([("b", &b)]).unwrap());
        let outer = Node::Directory(Directory::from_children([("a", &a), ("inner", &inner)]).unwrap());
        assert_eq!(outer.size(), 5);
    }

    #[test]
    fn test_links_record_child_kind() {
        let f = Node::file("x");
        let sub = Node::Directory(Directory::default());
        let dir = Directory::from_children([("f", &f), ("sub", &sub)]).unwrap();
        assert_eq!(dir.get("f").unwrap().kind, LinkKind::File);
        assert!(dir.get("sub").unwrap().is_directory());

        // Kind is implied by the identifier and leaves the encoding untouched
        let by_value = Node::Directory(dir);
        let by_link = Node::Directory(
            Directory::builder()
                .link("f", f.cid(), f.size(), LinkKind::File)
                .unwrap()
                .link("sub", sub.cid(), sub.size(), LinkKind::Directory)
                .unwrap()
                .build(),
        );
        assert_eq!(by_value.cid(), by_link.cid());
    }
}
