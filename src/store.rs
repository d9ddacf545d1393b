// src/store.rs
// =============================================================================
// Persists mirrored pages.
//
// The crawler hands us a local path like "example.org/foo/index.html" and
// the rewritten page text. FsStore writes it below the mirror root,
// creating the directories on the way.
// =============================================================================

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait Store: Send + Sync {
    async fn save(&self, path: &str, content: &str) -> Result<()>;
}

/// Writes pages under a fixed mirror root on the local filesystem.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Maps a local path onto the mirror root
    //
    // Only plain names are kept: "/", ".", ".." and drive prefixes are
    // dropped so a crafted address cannot write outside the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative: PathBuf = Path::new(path)
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name),
                _ => None,
            })
            .collect();

        if relative.as_os_str().is_empty() {
            bail!("Refusing to save to empty path {:?}", path);
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Store for FsStore {
    async fn save(&self, path: &str, content: &str) -> Result<()> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        tokio::fs::write(&full_path, content)
            .await
            .with_context(|| format!("Failed to write {}", full_path.display()))?;

        debug!("Saved {} bytes to {}", content.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        store
            .save("example.org/foo/bar/index.html", "<p>hi</p>")
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("example.org/foo/bar/index.html")).unwrap();
        assert_eq!(written, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        store.save("example.org/index.html", "old").await.unwrap();
        store.save("example.org/index.html", "new").await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("example.org/index.html")).unwrap();
        assert_eq!(written, "new");
    }

    #[test]
    fn test_resolve_stays_inside_root() {
        let store = FsStore::new("/mirror");

        assert_eq!(
            store.resolve("/index.html").unwrap(),
            PathBuf::from("/mirror/index.html")
        );
        assert_eq!(
            store.resolve("example.org/../../etc/index.html").unwrap(),
            PathBuf::from("/mirror/example.org/etc/index.html")
        );
        assert!(store.resolve("..").is_err());
    }
}
