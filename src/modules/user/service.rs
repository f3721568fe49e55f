use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::media::{AssetCoordinator, Upload};
use crate::modules::user::model::{CreateUserModel, UpdateUserModel, UserResponse};
use crate::modules::user::{
    repository::UserRepository,
    schema::{UserEntity, UserRole},
};
use crate::utils::hash_password;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    assets: Arc<AssetCoordinator>,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        assets: Arc<AssetCoordinator>,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, assets }
    }

    pub fn max_upload_size(&self) -> usize {
        self.assets.config().max_file_size
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        self.repo
            .load(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn list_by_role(
        &self,
        role: UserRole,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.repo.find_by_role(role).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_by_username(
        &self,
        user_name: &str,
    ) -> Result<UserResponse, error::SystemError> {
        self.repo
            .find_by_username(user_name)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| {
                let msg = format!("User not found with username: {}", user_name);
                error::SystemError::not_found(msg)
            })
    }

    pub async fn count(&self) -> Result<i64, error::SystemError> {
        self.repo.count().await
    }

    pub async fn count_by_role(&self, role: UserRole) -> Result<i64, error::SystemError> {
        self.repo.count_by_role(role).await
    }

    pub async fn create(
        &self,
        user: CreateUserModel,
        profile_image: Option<Upload>,
    ) -> Result<UserResponse, error::SystemError> {
        let hash_password = hash_password(&user.password)?;
        let now = chrono::Utc::now();

        let draft = UserEntity {
            id: Uuid::now_v7(),
            user_name: user.user_name,
            email: user.email,
            telephone: user.telephone,
            hash_password,
            role: user.role,
            description: user.description,
            profile_image: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let saved = self.assets.create_with_asset(self.repo.as_ref(), draft, profile_image).await?;
        Ok(UserResponse::from(saved))
    }

    pub async fn update(
        &self,
        id: Uuid,
        user: UpdateUserModel,
        profile_image: Option<Upload>,
    ) -> Result<UserResponse, error::SystemError> {
        if user.is_empty() && profile_image.is_none() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let hash_password = user.password.as_deref().map(hash_password).transpose()?;

        let apply = move |entity: &mut UserEntity| {
            if let Some(user_name) = user.user_name {
                entity.user_name = user_name;
            }
            if let Some(email) = user.email {
                entity.email = email;
            }
            if let Some(telephone) = user.telephone {
                entity.telephone = telephone;
            }
            if let Some(hash_password) = hash_password {
                entity.hash_password = hash_password;
            }
            if let Some(role) = user.role {
                entity.role = role;
            }
            if let Some(description) = user.description {
                entity.description = description;
            }
        };

        let saved =
            self.assets.replace_asset(self.repo.as_ref(), &id, apply, profile_image).await?;
        Ok(UserResponse::from(saved))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), error::SystemError> {
        self.assets.delete_with_asset::<UserEntity, _>(self.repo.as_ref(), &id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{coordinator, InMemoryRepository};

    fn new_user() -> CreateUserModel {
        CreateUserModel {
            user_name: "coach.kim".to_string(),
            email: "kim@gym.test".to_string(),
            telephone: "0600000000".to_string(),
            password: "s3cret-pass".to_string(),
            role: UserRole::Coach,
            description: "Strength coach".to_string(),
        }
    }

    fn empty_update() -> UpdateUserModel {
        UpdateUserModel {
            user_name: None,
            email: None,
            telephone: None,
            password: None,
            role: None,
            description: None,
        }
    }

    fn image(name: &str) -> Option<Upload> {
        Some(Upload::new(name, b"png-bytes".to_vec()))
    }

    fn setup(dir: &tempfile::TempDir) -> (Arc<InMemoryRepository<UserEntity>>, UserService) {
        let repo = Arc::new(InMemoryRepository::<UserEntity>::default());
        let service = UserService::with_dependencies(repo.clone(), coordinator(dir.path()));
        (repo, service)
    }

    #[tokio::test]
    async fn create_hashes_password_and_stores_image() {
        let dir = tempfile::tempdir().unwrap();
        let (repo, service) = setup(&dir);

        let user = service.create(new_user(), image("kim.png")).await.unwrap();

        assert_eq!(user.profile_image.as_deref(), Some("kim.png"));
        assert_eq!(user.image_url.as_deref(), Some("/api/users/images/kim.png"));
        let stored = repo.get(&user.id).unwrap();
        assert_ne!(stored.hash_password, "s3cret-pass");
        assert!(dir.path().join("kim.png").is_file());
    }

    #[tokio::test]
    async fn update_without_image_keeps_reference_and_rehashes_password() {
        let dir = tempfile::tempdir().unwrap();
        let (repo, service) = setup(&dir);
        let user = service.create(new_user(), image("kim.png")).await.unwrap();
        let old_hash = repo.get(&user.id).unwrap().hash_password;

        let update = UpdateUserModel {
            description: Some("Head coach".to_string()),
            password: Some("another-pass".to_string()),
            ..empty_update()
        };
        let updated = service.update(user.id, update, None).await.unwrap();

        assert_eq!(updated.description, "Head coach");
        assert_eq!(updated.profile_image.as_deref(), Some("kim.png"));
        assert_ne!(repo.get(&user.id).unwrap().hash_password, old_hash);
    }

    #[tokio::test]
    async fn update_with_nothing_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (_, service) = setup(&dir);

        let err = service.update(Uuid::now_v7(), empty_update(), None).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_removes_record_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let (repo, service) = setup(&dir);
        let user = service.create(new_user(), image("kim.png")).await.unwrap();

        service.delete(user.id).await.unwrap();

        assert!(repo.get(&user.id).is_none());
        assert!(!dir.path().join("kim.png").exists());
        assert!(matches!(service.get_by_id(user.id).await, Err(error::SystemError::NotFound(_))));
    }

    #[tokio::test]
    async fn role_queries_only_see_matching_users() {
        let dir = tempfile::tempdir().unwrap();
        let (_, service) = setup(&dir);
        service.create(new_user(), image("kim.png")).await.unwrap();
        let member = CreateUserModel {
            user_name: "member.lou".to_string(),
            email: "lou@gym.test".to_string(),
            role: UserRole::User,
            ..new_user()
        };
        service.create(member, image("lou.png")).await.unwrap();

        let coaches = service.list_by_role(UserRole::Coach).await.unwrap();
        assert_eq!(coaches.len(), 1);
        assert_eq!(coaches[0].user_name, "coach.kim");
        assert_eq!(service.count().await.unwrap(), 2);
        assert_eq!(service.count_by_role(UserRole::Coach).await.unwrap(), 1);
        assert_eq!(service.count_by_role(UserRole::Admin).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn get_by_username_finds_exact_match() {
        let dir = tempfile::tempdir().unwrap();
        let (_, service) = setup(&dir);
        let user = service.create(new_user(), image("kim.png")).await.unwrap();

        assert_eq!(service.get_by_username("coach.kim").await.unwrap().id, user.id);
        assert!(matches!(
            service.get_by_username("coach").await,
            Err(error::SystemError::NotFound(_))
        ));
    }
}
