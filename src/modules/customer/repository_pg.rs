use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        customer::{repository::CustomerRepository, schema::CustomerEntity},
        media::AssetOwnerRepository,
    },
};

#[derive(Clone)]
pub struct CustomerRepositoryPg {
    pool: sqlx::PgPool,
}

impl CustomerRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssetOwnerRepository<CustomerEntity> for CustomerRepositoryPg {
    async fn load(&self, id: &Uuid) -> Result<Option<CustomerEntity>, error::SystemError> {
        let customer = sqlx::query_as::<_, CustomerEntity>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn save(&self, customer: &CustomerEntity) -> Result<CustomerEntity, error::SystemError> {
        sqlx::query_as::<_, CustomerEntity>(
            r#"
        INSERT INTO customers
            (id, user_name, email, telephone, start_date, end_date, pack, amount_paid,
             user_id, profile_image, version, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        ON CONFLICT (id) DO UPDATE
        SET
            user_name     = EXCLUDED.user_name,
            email         = EXCLUDED.email,
            telephone     = EXCLUDED.telephone,
            start_date    = EXCLUDED.start_date,
            end_date      = EXCLUDED.end_date,
            pack          = EXCLUDED.pack,
            amount_paid   = EXCLUDED.amount_paid,
            user_id       = EXCLUDED.user_id,
            profile_image = EXCLUDED.profile_image,
            version       = customers.version + 1,
            updated_at    = NOW()
        WHERE customers.version = EXCLUDED.version
        RETURNING *
        "#,
        )
        .bind(customer.id)
        .bind(&customer.user_name)
        .bind(&customer.email)
        .bind(&customer.telephone)
        .bind(customer.start_date)
        .bind(customer.end_date)
        .bind(&customer.pack)
        .bind(&customer.amount_paid)
        .bind(customer.user_id)
        .bind(&customer.profile_image)
        .bind(customer.version)
        .bind(customer.created_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(error::SystemError::stale_version)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), error::SystemError> {
        let rows = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::not_found("Customer not found"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CustomerRepository for CustomerRepositoryPg {
    async fn find_all(&self) -> Result<Vec<CustomerEntity>, error::SystemError> {
        let customers =
            sqlx::query_as::<_, CustomerEntity>("SELECT * FROM customers ORDER BY user_name")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<CustomerEntity>, error::SystemError> {
        let customers = sqlx::query_as::<_, CustomerEntity>(
            "SELECT * FROM customers WHERE user_id = $1 ORDER BY user_name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    async fn find_by_username(
        &self,
        user_name: &str,
    ) -> Result<Option<CustomerEntity>, error::SystemError> {
        let customer = sqlx::query_as::<_, CustomerEntity>(
            "SELECT * FROM customers WHERE user_name = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn count(&self) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
