//! In-memory collaborators shared by the unit tests.

use std::{
    collections::HashMap,
    path::Path,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        album::{model::InsertAlbum, repository::AlbumRepository, schema::AlbumEntity},
        customer::{repository::CustomerRepository, schema::CustomerEntity},
        media::{
            model::StoredAsset, sanitizer::SafeName, store::AssetStore, AssetConfig,
            AssetCoordinator, AssetOwner, AssetOwnerRepository, LocalAssetStore,
        },
        photo::{repository::PhotoRepository, schema::PhotoEntity},
        user::{
            repository::UserRepository,
            schema::{UserEntity, UserRole},
        },
    },
};

pub trait Versioned {
    fn version(&self) -> i32;
    fn set_version(&mut self, version: i32);
}

macro_rules! versioned {
    ($($entity:ty),*) => {
        $(impl Versioned for $entity {
            fn version(&self) -> i32 {
                self.version
            }

            fn set_version(&mut self, version: i32) {
                self.version = version;
            }
        })*
    };
}

versioned!(UserEntity, CustomerEntity, PhotoEntity);

/// Repository double with the same version check as the PostgreSQL upsert,
/// plus switches to make the next save or delete fail.
pub struct InMemoryRepository<E> {
    rows: Mutex<HashMap<String, E>>,
    fail_save: AtomicBool,
    fail_delete: AtomicBool,
    saves: AtomicUsize,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            fail_save: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }
}

impl<E: AssetOwner + Versioned> InMemoryRepository<E> {
    pub fn get(&self, id: &E::Id) -> Option<E> {
        self.rows.lock().unwrap().get(&id.to_string()).cloned()
    }

    pub fn all(&self) -> Vec<E> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_next_save(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_delete(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    /// Simulates a concurrent writer committing a change to `id`.
    pub fn bump_version(&self, id: &E::Id) {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id.to_string()) {
            let next = row.version() + 1;
            row.set_version(next);
        }
    }
}

#[async_trait::async_trait]
impl<E: AssetOwner + Versioned> AssetOwnerRepository<E> for InMemoryRepository<E> {
    async fn load(&self, id: &E::Id) -> Result<Option<E>, error::SystemError> {
        Ok(self.get(id))
    }

    async fn save(&self, entity: &E) -> Result<E, error::SystemError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save.swap(false, Ordering::SeqCst) {
            return Err(error::SystemError::DatabaseError("injected save failure".into()));
        }

        let mut rows = self.rows.lock().unwrap();
        let key = entity.id().to_string();
        let mut stored = entity.clone();
        if let Some(existing) = rows.get(&key) {
            if existing.version() != entity.version() {
                return Err(error::SystemError::stale_version());
            }
            stored.set_version(existing.version() + 1);
        }
        rows.insert(key, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: &E::Id) -> Result<(), error::SystemError> {
        if self.fail_delete.swap(false, Ordering::SeqCst) {
            return Err(error::SystemError::DatabaseError("injected delete failure".into()));
        }
        match self.rows.lock().unwrap().remove(&id.to_string()) {
            Some(_) => Ok(()),
            None => Err(error::SystemError::not_found(format!("{} not found", E::KIND))),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryRepository<UserEntity> {
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.all())
    }

    async fn find_by_role(&self, role: UserRole) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.all().into_iter().filter(|u| u.role == role).collect())
    }

    async fn find_by_username(
        &self,
        user_name: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.all().into_iter().find(|u| u.user_name == user_name))
    }

    async fn count(&self) -> Result<i64, error::SystemError> {
        Ok(self.all().len() as i64)
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64, error::SystemError> {
        Ok(self.find_by_role(role).await?.len() as i64)
    }
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryRepository<CustomerEntity> {
    async fn find_all(&self) -> Result<Vec<CustomerEntity>, error::SystemError> {
        Ok(self.all())
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<CustomerEntity>, error::SystemError> {
        Ok(self.all().into_iter().filter(|c| c.user_id == *user_id).collect())
    }

    async fn find_by_username(
        &self,
        user_name: &str,
    ) -> Result<Option<CustomerEntity>, error::SystemError> {
        Ok(self.all().into_iter().find(|c| c.user_name == user_name))
    }

    async fn count(&self) -> Result<i64, error::SystemError> {
        Ok(self.all().len() as i64)
    }
}

#[async_trait::async_trait]
impl PhotoRepository for InMemoryRepository<PhotoEntity> {
    async fn find_all(&self) -> Result<Vec<PhotoEntity>, error::SystemError> {
        Ok(self.all())
    }

    async fn find_by_album(
        &self,
        album_id: &Uuid,
    ) -> Result<Vec<PhotoEntity>, error::SystemError> {
        Ok(self.all().into_iter().filter(|p| p.album_id == *album_id).collect())
    }
}

#[derive(Default)]
pub struct InMemoryAlbumRepository {
    rows: Mutex<HashMap<Uuid, AlbumEntity>>,
}

#[async_trait::async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AlbumEntity>, error::SystemError> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<AlbumEntity>, error::SystemError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, album: &InsertAlbum) -> Result<AlbumEntity, error::SystemError> {
        let entity = AlbumEntity {
            id: Uuid::now_v7(),
            name: album.name.clone(),
            description: album.description.clone(),
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().insert(entity.id, entity.clone());
        Ok(entity)
    }
}

/// Local store that can be told to fail writes or deletes, and records every
/// delete it is asked to perform.
pub struct FaultyStore {
    inner: LocalAssetStore,
    fail_put: AtomicBool,
    fail_delete: AtomicBool,
    deleted: Mutex<Vec<String>>,
}

impl FaultyStore {
    pub fn new(root: &Path) -> Self {
        Self {
            inner: LocalAssetStore::new(root),
            fail_put: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_puts(&self) {
        self.fail_put.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn injected() -> error::SystemError {
        error::SystemError::Storage(std::io::Error::other("injected storage failure"))
    }
}

#[async_trait::async_trait]
impl AssetStore for FaultyStore {
    async fn put(&self, name: &SafeName, bytes: &[u8]) -> Result<(), error::SystemError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.put(name, bytes).await
    }

    async fn put_new(&self, name: &SafeName, bytes: &[u8]) -> Result<bool, error::SystemError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.put_new(name, bytes).await
    }

    async fn get(&self, name: &SafeName) -> Result<Option<StoredAsset>, error::SystemError> {
        self.inner.get(name).await
    }

    async fn delete(&self, name: &SafeName) -> Result<(), error::SystemError> {
        self.deleted.lock().unwrap().push(name.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.delete(name).await
    }
}

pub fn asset_config(root: &Path) -> AssetConfig {
    AssetConfig { upload_dir: root.to_path_buf(), ..AssetConfig::default() }
}

pub fn coordinator(root: &Path) -> Arc<AssetCoordinator> {
    Arc::new(AssetCoordinator::new(Arc::new(LocalAssetStore::new(root)), asset_config(root)))
}

pub fn sample_user(user_name: &str) -> UserEntity {
    let now = chrono::Utc::now();
    UserEntity {
        id: Uuid::now_v7(),
        user_name: user_name.to_string(),
        email: format!("{}@gym.test", user_name),
        telephone: "0600000000".to_string(),
        hash_password: "$argon2id$placeholder".to_string(),
        role: UserRole::Coach,
        description: String::new(),
        profile_image: None,
        version: 0,
        created_at: now,
        updated_at: now,
    }
}
