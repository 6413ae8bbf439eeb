//! Artifact writers
//!
//! Where generated entry points end up. Paths handed to a writer are
//! relative to the service root.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Persistence for generated artifacts
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    /// Create a folder and its parents; existing folders are fine
    async fn create_dir(&self, path: &Path) -> Result<()>;

    /// Write a file, replacing any previous contents
    async fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Remove a folder and everything in it
    ///
    /// A missing folder is reported as an `io::ErrorKind::NotFound` error.
    async fn remove_dir(&self, path: &Path) -> Result<()>;
}

/// Writer backed by the local file system
#[derive(Debug, Clone)]
pub struct FileSystemWriter {
    root: PathBuf,
}

impl FileSystemWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactWriter for FileSystemWriter {
    async fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(self.root.join(path)).await?;
        Ok(())
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(self.root.join(path), contents).await?;
        Ok(())
    }

    async fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(self.root.join(path)).await?;
        Ok(())
    }
}

/// In-memory writer, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryWriter {
    dirs: RwLock<BTreeSet<PathBuf>>,
    files: RwLock<BTreeMap<PathBuf, String>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every written file
    pub async fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.read().await.clone()
    }

    pub async fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().await.get(path.as_ref()).cloned()
    }

    pub async fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.read().await.contains(path.as_ref())
    }

    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl ArtifactWriter for MemoryWriter {
    async fn create_dir(&self, path: &Path) -> Result<()> {
        let mut dirs = self.dirs.write().await;
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let parent_exists = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.dirs.read().await.contains(parent)
            }
            _ => true,
        };

        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )
            .into());
        }

        self.files
            .write()
            .await
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    async fn remove_dir(&self, path: &Path) -> Result<()> {
        let mut dirs = self.dirs.write().await;
        if !dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )
            .into());
        }

        dirs.retain(|dir| !dir.starts_with(path));
        self.files.write().await.retain(|file, _| !file.starts_with(path));
        Ok(())
    }
}
