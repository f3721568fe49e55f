use std::fmt::Display;

use crate::api::error;

/// A record that owns at most one stored asset.
pub trait AssetOwner: Clone + Send + Sync + 'static {
    type Id: Copy + Display + Send + Sync + 'static;

    /// Singular label used in logs and error messages, e.g. "Photo".
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn asset(&self) -> Option<&str>;

    fn set_asset(&mut self, name: Option<String>);
}

/// Persistence of asset owners. Every call is atomic on its own.
#[async_trait::async_trait]
pub trait AssetOwnerRepository<E: AssetOwner> {
    async fn load(&self, id: &E::Id) -> Result<Option<E>, error::SystemError>;

    /// Inserts or updates the record. Fails with `SystemError::Conflict(None)`
    /// when the stored version no longer matches the one that was loaded.
    async fn save(&self, entity: &E) -> Result<E, error::SystemError>;

    /// Fails with `NotFound` when no record was removed.
    async fn delete(&self, id: &E::Id) -> Result<(), error::SystemError>;
}
