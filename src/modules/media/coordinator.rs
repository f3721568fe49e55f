use std::sync::Arc;

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::api::error;
use crate::modules::media::{
    content_type,
    model::{AssetConfig, NamingPolicy, StoredAsset, Upload},
    repository::{AssetOwner, AssetOwnerRepository},
    sanitizer::{self, SafeName},
    store::AssetStore,
};

const DISAMBIGUATE_ATTEMPTS: usize = 3;

/// Where an upload ended up in the store.
struct Placement {
    name: SafeName,
    /// The name was free before this write, so nothing else can reference it.
    fresh: bool,
}

/// Keeps entity asset references and stored files consistent.
///
/// New files are written before the owning record is saved; files that are no
/// longer referenced are removed only after the record change is committed.
/// A failed step can therefore leave an unreferenced file behind, but never a
/// record pointing at a missing one.
#[derive(Clone)]
pub struct AssetCoordinator {
    store: Arc<dyn AssetStore>,
    config: AssetConfig,
}

impl AssetCoordinator {
    pub fn new(store: Arc<dyn AssetStore>, config: AssetConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Checks an upload against the policy and returns its safe name.
    fn accept(&self, upload: &Upload) -> Result<SafeName, error::SystemError> {
        if upload.is_empty() {
            return Err(error::SystemError::bad_request("Uploaded file is empty"));
        }

        if upload.bytes.len() > self.config.max_file_size {
            return Err(error::SystemError::bad_request(format!(
                "File size exceeds maximum allowed size of {} bytes",
                self.config.max_file_size
            )));
        }

        let name = sanitizer::sanitize(&upload.filename)?;

        let resolved = content_type::resolve(&name);
        if !self.config.allowed_mime_types.iter().any(|allowed| allowed == &resolved) {
            return Err(error::SystemError::bad_request(format!(
                "File type '{}' is not allowed",
                resolved
            )));
        }

        if let Some(declared) = upload.content_type.as_deref() {
            if declared != resolved && declared != content_type::OCTET_STREAM {
                debug!(
                    "Declared content type {} differs from resolved {} for {}",
                    declared,
                    resolved,
                    name
                );
            }
        }

        Ok(name)
    }

    /// Writes the upload, resolving name collisions with files the entity does not own.
    async fn place(
        &self,
        name: SafeName,
        bytes: &[u8],
        current: Option<&str>,
    ) -> Result<Placement, error::SystemError> {
        if current == Some(name.as_str()) {
            self.store.put(&name, bytes).await?;
            return Ok(Placement { name, fresh: false });
        }

        if self.store.put_new(&name, bytes).await? {
            return Ok(Placement { name, fresh: true });
        }

        match self.config.naming {
            NamingPolicy::Overwrite => {
                warn!("Asset {} already exists and will be overwritten", name);
                self.store.put(&name, bytes).await?;
                Ok(Placement { name, fresh: false })
            }
            NamingPolicy::Disambiguate => {
                for _ in 0..DISAMBIGUATE_ATTEMPTS {
                    let candidate = name.prefixed(&Uuid::now_v7().simple().to_string());
                    if self.store.put_new(&candidate, bytes).await? {
                        info!("Asset name {} was taken, stored as {}", name, candidate);
                        return Ok(Placement { name: candidate, fresh: true });
                    }
                }
                Err(error::SystemError::Storage(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("could not find a free name for {}", name),
                )))
            }
        }
    }

    /// Best-effort removal of a file written for a record change that did not commit.
    async fn compensate(&self, placement: &Placement, kind: &str) {
        if !placement.fresh {
            return;
        }
        match self.store.delete(&placement.name).await {
            Ok(()) => info!("Removed orphaned {} asset {}", kind, placement.name),
            Err(e) => {
                error!("Failed to remove orphaned {} asset {}: {}", kind, placement.name, e)
            }
        }
    }

    /// Non-fatal removal of a file the committed record no longer references.
    async fn discard_obsolete(&self, stored: &str, kind: &str) {
        let Some(name) = SafeName::from_stored(stored) else {
            warn!("Skipping removal of {} asset with unsafe stored name {:?}", kind, stored);
            return;
        };
        match self.store.delete(&name).await {
            Ok(()) => info!("Removed obsolete {} asset {}", kind, name),
            Err(e) => warn!("Could not delete obsolete {} asset {}: {}", kind, name, e),
        }
    }

    pub async fn create_with_asset<E, R>(
        &self,
        repo: &R,
        mut draft: E,
        upload: Option<Upload>,
    ) -> Result<E, error::SystemError>
    where
        E: AssetOwner,
        R: AssetOwnerRepository<E> + Sync + ?Sized,
    {
        let upload = upload.ok_or_else(|| {
            error::SystemError::bad_request(format!("{} image is required", E::KIND))
        })?;
        let name = self.accept(&upload)?;

        let placement = self.place(name, &upload.bytes, None).await?;
        draft.set_asset(Some(placement.name.to_string()));

        match repo.save(&draft).await {
            Ok(saved) => {
                info!("Created {} {} with asset {}", E::KIND, saved.id(), placement.name);
                Ok(saved)
            }
            Err(e) => {
                warn!("Saving {} {} failed: {}", E::KIND, draft.id(), e);
                self.compensate(&placement, E::KIND).await;
                Err(e)
            }
        }
    }

    /// Applies `apply` to the stored entity and, when a non-empty upload is
    /// given, swaps its asset for the uploaded one.
    pub async fn replace_asset<E, R, F>(
        &self,
        repo: &R,
        id: &E::Id,
        apply: F,
        upload: Option<Upload>,
    ) -> Result<E, error::SystemError>
    where
        E: AssetOwner,
        R: AssetOwnerRepository<E> + Sync + ?Sized,
        F: FnOnce(&mut E) + Send,
    {
        let mut entity = repo
            .load(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found(format!("{} not found", E::KIND)))?;

        let Some(upload) = upload.filter(|upload| !upload.is_empty()) else {
            apply(&mut entity);
            return repo.save(&entity).await;
        };

        let name = self.accept(&upload)?;
        let old = entity.asset().map(str::to_owned);

        let placement = self.place(name, &upload.bytes, old.as_deref()).await?;
        apply(&mut entity);
        entity.set_asset(Some(placement.name.to_string()));

        let saved = match repo.save(&entity).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Saving {} {} failed: {}", E::KIND, id, e);
                self.compensate(&placement, E::KIND).await;
                return Err(e);
            }
        };

        info!("Replaced asset of {} {} with {}", E::KIND, id, placement.name);
        if let Some(old) = old.filter(|old| old != placement.name.as_str()) {
            self.discard_obsolete(&old, E::KIND).await;
        }

        Ok(saved)
    }

    pub async fn delete_with_asset<E, R>(
        &self,
        repo: &R,
        id: &E::Id,
    ) -> Result<(), error::SystemError>
    where
        E: AssetOwner,
        R: AssetOwnerRepository<E> + Sync + ?Sized,
    {
        let entity = repo
            .load(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found(format!("{} not found", E::KIND)))?;

        repo.delete(id).await?;
        info!("Deleted {} {}", E::KIND, id);

        if let Some(stored) = entity.asset() {
            self.discard_obsolete(stored, E::KIND).await;
        }

        Ok(())
    }

    pub async fn serve_asset(&self, raw: &str) -> Result<StoredAsset, error::SystemError> {
        let name = sanitizer::sanitize_stored(raw)?;
        if name.as_str() != raw {
            return Err(error::SystemError::not_found("Image not found"));
        }

        self.store
            .get(&name)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Image not found"))
    }
}
