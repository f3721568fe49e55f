use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        media::AssetOwnerRepository,
        user::{
            repository::UserRepository,
            schema::{UserEntity, UserRole},
        },
    },
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssetOwnerRepository<UserEntity> for UserRepositoryPg {
    async fn load(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn save(&self, user: &UserEntity) -> Result<UserEntity, error::SystemError> {
        sqlx::query_as::<_, UserEntity>(
            r#"
        INSERT INTO users
            (id, user_name, email, telephone, hash_password, role, description,
             profile_image, version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        ON CONFLICT (id) DO UPDATE
        SET
            user_name     = EXCLUDED.user_name,
            email         = EXCLUDED.email,
            telephone     = EXCLUDED.telephone,
            hash_password = EXCLUDED.hash_password,
            role          = EXCLUDED.role,
            description   = EXCLUDED.description,
            profile_image = EXCLUDED.profile_image,
            version       = users.version + 1,
            updated_at    = NOW()
        WHERE users.version = EXCLUDED.version
        RETURNING *
        "#,
        )
        .bind(user.id)
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.telephone)
        .bind(&user.hash_password)
        .bind(user.role)
        .bind(&user.description)
        .bind(&user.profile_image)
        .bind(user.version)
        .bind(user.created_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(error::SystemError::stale_version)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        let rows = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::not_found("User not found"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
        let users =
            sqlx::query_as::<_, UserEntity>("SELECT * FROM users ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    async fn find_by_role(&self, role: UserRole) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = sqlx::query_as::<_, UserEntity>(
            "SELECT * FROM users WHERE role = $1 ORDER BY user_name",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_username(
        &self,
        user_name: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE user_name = $1")
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn count(&self) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
