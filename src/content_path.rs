// Content paths - normalized, scoped paths handed to the store and the name resolver

use crate::cid::{Cid, InvalidCid};
use crate::constants::{IPFS_SCOPE, IPNS_SCOPE};
use crate::namesys::normalize_name;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is missing a namespace")]
    MissingScope,
    #[error("unknown namespace {0:?}")]
    UnknownScope(String),
    #[error("path is missing an identifier after /{0}/")]
    MissingIdentifier(&'static str),
    #[error(transparent)]
    InvalidCid(#[from] InvalidCid),
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("invalid path segment: {0:?}")]
    InvalidSegment(String),
}

/// Namespace and identifier a content path is anchored at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathRoot {
    /// Content-addressed: `/ipfs/<cid>`
    Ipfs(Cid),
    /// Mutable name: `/ipns/<name>`
    Ipns(String),
}

/// Normalized path: a root plus decoded, non-empty sub-path segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentPath {
    root: PathRoot,
    segments: Vec<String>,
}

impl ContentPath {
    pub fn ipfs(cid: Cid) -> Self {
        Self {
            root: PathRoot::Ipfs(cid),
            segments: Vec::new(),
        }
    }

    pub fn ipns(name: &str) -> Result<Self, PathError> {
        let name = normalize_name(name);
        if name.is_empty() || name.contains('/') {
            return Err(PathError::InvalidName(name));
        }
        Ok(Self {
            root: PathRoot::Ipns(name),
            segments: Vec::new(),
        })
    }

    /// Build from already-split, already-decoded segments; the first one is the namespace
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self, PathError> {
        let mut iter = segments.iter().map(AsRef::<str>::as_ref);
        let scope = iter.next().ok_or(PathError::MissingScope)?;
        let path = match scope {
            IPFS_SCOPE => {
                let id = iter.next().ok_or(PathError::MissingIdentifier(IPFS_SCOPE))?;
                ContentPath::ipfs(Cid::parse(id)?)
            }
            IPNS_SCOPE => {
                let id = iter.next().ok_or(PathError::MissingIdentifier(IPNS_SCOPE))?;
                ContentPath::ipns(id)?
            }
            other => return Err(PathError::UnknownScope(other.to_string())),
        };
        path.join(iter)
    }

    /// Parse the display form (`/ipfs/<cid>/a/b`); duplicate slashes are collapsed
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let segments: Vec<&str> = input.split('/').filter(|s| !s.is_empty()).collect();
        Self::from_segments(&segments)
    }

    /// Append sub-path segments, validating each one
    pub fn join<I, S>(mut self, segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            validate_segment(segment)?;
            self.segments.push(segment.to_string());
        }
        Ok(self)
    }

    pub fn root(&self) -> &PathRoot {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_ipfs(&self) -> bool {
        matches!(self.root, PathRoot::Ipfs(_))
    }
}

pub fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment == "." || segment == ".." || segment.contains('/') || segment.contains('\0') {
        return Err(PathError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            PathRoot::Ipfs(cid) => write!(f, "/{}/{}", IPFS_SCOPE, cid)?,
            PathRoot::Ipns(name) => write!(f, "/{}/{}", IPNS_SCOPE, name)?,
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for ContentPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentPath::parse(s)
    }
}
