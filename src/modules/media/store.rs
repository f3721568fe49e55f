use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::{
    api::error,
    modules::media::{content_type, model::StoredAsset, sanitizer::SafeName},
};

#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Writes `bytes` under `name`, replacing any existing file.
    async fn put(&self, name: &SafeName, bytes: &[u8]) -> Result<(), error::SystemError>;

    /// Writes `bytes` under `name` only if nothing is stored there yet.
    /// Returns `false` when the name is already taken.
    async fn put_new(&self, name: &SafeName, bytes: &[u8]) -> Result<bool, error::SystemError>;

    async fn get(&self, name: &SafeName) -> Result<Option<StoredAsset>, error::SystemError>;

    /// Removes `name`. Removing a name that does not exist succeeds.
    async fn delete(&self, name: &SafeName) -> Result<(), error::SystemError>;
}

/// Assets kept as flat files directly under one root directory.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the root if needed and checks that it is writable.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, error::SystemError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).await?;

        let marker = store.root.join(format!(".writable.{}", Uuid::now_v7().simple()));
        fs::write(&marker, b"marker").await?;
        fs::remove_file(&marker).await?;

        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &SafeName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Writes the content to a hidden temp file in the root and syncs it.
    /// Sanitized names never start with '.', so temp files cannot be addressed.
    /// The temp name does not embed the target, so its length never depends on it.
    async fn stage(&self, name: &SafeName, bytes: &[u8]) -> Result<PathBuf, error::SystemError> {
        fs::create_dir_all(&self.root).await?;

        let temp_path = self.root.join(format!(".{}.part", Uuid::now_v7().simple()));
        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            warn!("Failed to stage asset {}: {}", name, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(temp_path)
    }
}

#[async_trait::async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(&self, name: &SafeName, bytes: &[u8]) -> Result<(), error::SystemError> {
        let temp_path = self.stage(name, bytes).await?;
        let target = self.path_of(name);

        if let Err(e) = fs::rename(&temp_path, &target).await {
            warn!("Failed to move asset into place {}: {}", target.display(), e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!("Stored asset {} ({} bytes)", target.display(), bytes.len());
        Ok(())
    }

    async fn put_new(&self, name: &SafeName, bytes: &[u8]) -> Result<bool, error::SystemError> {
        let temp_path = self.stage(name, bytes).await?;
        let target = self.path_of(name);

        // hard_link fails atomically when the target exists
        let linked = fs::hard_link(&temp_path, &target).await;
        let _ = fs::remove_file(&temp_path).await;

        match linked {
            Ok(()) => {
                debug!("Stored new asset {} ({} bytes)", target.display(), bytes.len());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, name: &SafeName) -> Result<Option<StoredAsset>, error::SystemError> {
        let path = self.path_of(name);

        // symlink_metadata so that links are never followed out of the root
        match fs::symlink_metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(StoredAsset {
            name: name.clone(),
            content_type: content_type::resolve(name),
            bytes,
        }))
    }

    async fn delete(&self, name: &SafeName) -> Result<(), error::SystemError> {
        let path = self.path_of(name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted asset {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
