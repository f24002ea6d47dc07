//! On-demand file content fetching.
//!
//! The host decides where content comes from (platform API, local checkout).
//! Absence is a normal outcome: a missing file is `Ok(None)`, and callers
//! treat fetch errors the same way.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::FetchError;

/// Result type for content fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Source of file content at the change request's head revision.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the content of `path`, or `None` if it does not exist.
    async fn fetch(&self, path: &str) -> FetchResult<Option<String>>;
}

/// Reads files from a local checkout rooted at `root`.
#[derive(Debug, Clone)]
pub struct FsContentFetcher {
    root: PathBuf,
}

impl FsContentFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a change-request path below the root, rejecting escapes.
    fn resolve(&self, path: &str) -> FetchResult<PathBuf> {
        let rel = Path::new(path);
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if path.is_empty() || escapes {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl ContentFetcher for FsContentFetcher {
    async fn fetch(&self, path: &str) -> FetchResult<Option<String>> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// In-memory content keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentFetcher {
    files: HashMap<String, String>,
}

impl MemoryContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[async_trait]
impl ContentFetcher for MemoryContentFetcher {
    async fn fetch(&self, path: &str) -> FetchResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}
