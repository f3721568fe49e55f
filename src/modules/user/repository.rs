use crate::{
    api::error,
    modules::{
        media::AssetOwnerRepository,
        user::schema::{UserEntity, UserRole},
    },
};

#[async_trait::async_trait]
pub trait UserRepository: AssetOwnerRepository<UserEntity> {
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;
    async fn find_by_role(&self, role: UserRole) -> Result<Vec<UserEntity>, error::SystemError>;
    async fn find_by_username(
        &self,
        user_name: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;
    async fn count(&self) -> Result<i64, error::SystemError>;
    async fn count_by_role(&self, role: UserRole) -> Result<i64, error::SystemError>;
}
