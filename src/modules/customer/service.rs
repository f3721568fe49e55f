use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::customer::model::{CreateCustomerModel, CustomerResponse, UpdateCustomerModel};
use crate::modules::customer::{repository::CustomerRepository, schema::CustomerEntity};
use crate::modules::media::{AssetCoordinator, Upload};
use crate::modules::user::repository::UserRepository;

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
    assets: Arc<AssetCoordinator>,
}

fn check_period(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<(), error::SystemError> {
    if end < start {
        return Err(error::SystemError::bad_request("End date must not be before start date"));
    }
    Ok(())
}

impl CustomerService {
    pub fn with_dependencies(
        repo: Arc<dyn CustomerRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
        assets: Arc<AssetCoordinator>,
    ) -> Self {
        info!("CustomerService initialized with dependencies");
        CustomerService { repo, users, assets }
    }

    pub fn max_upload_size(&self) -> usize {
        self.assets.config().max_file_size
    }

    async fn ensure_user(&self, user_id: &Uuid) -> Result<(), error::SystemError> {
        match self.users.load(user_id).await? {
            Some(_) => Ok(()),
            None => {
                Err(error::SystemError::not_found(format!("User not found with ID: {}", user_id)))
            }
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerResponse, error::SystemError> {
        self.repo
            .load(&id)
            .await?
            .map(CustomerResponse::from)
            .ok_or_else(|| error::SystemError::not_found("Customer not found"))
    }

    pub async fn list(&self) -> Result<Vec<CustomerResponse>, error::SystemError> {
        let customers = self.repo.find_all().await?;
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CustomerResponse>, error::SystemError> {
        self.ensure_user(&user_id).await?;
        let customers = self.repo.find_by_user(&user_id).await?;
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    pub async fn get_by_username(
        &self,
        user_name: &str,
    ) -> Result<CustomerResponse, error::SystemError> {
        let customer = self.repo.find_by_username(user_name).await?.ok_or_else(|| {
            let msg = format!("Customer not found with username: {}", user_name);
            error::SystemError::not_found(msg)
        })?;
        Ok(CustomerResponse::from(customer))
    }

    pub async fn count(&self) -> Result<i64, error::SystemError> {
        self.repo.count().await
    }

    pub async fn create(
        &self,
        customer: CreateCustomerModel,
        profile_image: Option<Upload>,
    ) -> Result<CustomerResponse, error::SystemError> {
        check_period(customer.start_date, customer.end_date)?;
        self.ensure_user(&customer.user_id).await?;
        let now = chrono::Utc::now();

        let draft = CustomerEntity {
            id: Uuid::now_v7(),
            user_name: customer.user_name,
            email: customer.email,
            telephone: customer.telephone,
            start_date: customer.start_date,
            end_date: customer.end_date,
            pack: customer.pack,
            amount_paid: customer.amount_paid,
            user_id: customer.user_id,
            profile_image: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let saved = self.assets.create_with_asset(self.repo.as_ref(), draft, profile_image).await?;
        Ok(CustomerResponse::from(saved))
    }

    pub async fn update(
        &self,
        id: Uuid,
        customer: UpdateCustomerModel,
        profile_image: Option<Upload>,
    ) -> Result<CustomerResponse, error::SystemError> {
        if customer.is_empty() && profile_image.is_none() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let current = self
            .repo
            .load(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Customer not found"))?;
        check_period(
            customer.start_date.unwrap_or(current.start_date),
            customer.end_date.unwrap_or(current.end_date),
        )?;
        if let Some(user_id) = &customer.user_id {
            self.ensure_user(user_id).await?;
        }

        let apply = move |entity: &mut CustomerEntity| {
            if let Some(user_name) = customer.user_name {
                entity.user_name = user_name;
            }
            if let Some(email) = customer.email {
                entity.email = email;
            }
            if let Some(telephone) = customer.telephone {
                entity.telephone = telephone;
            }
            if let Some(start_date) = customer.start_date {
                entity.start_date = start_date;
            }
            if let Some(end_date) = customer.end_date {
                entity.end_date = end_date;
            }
            if let Some(pack) = customer.pack {
                entity.pack = pack;
            }
            if let Some(user_id) = customer.user_id {
                entity.user_id = user_id;
            }
            if let Some(amount_paid) = customer.amount_paid {
                entity.amount_paid = amount_paid;
            }
        };

        let saved =
            self.assets.replace_asset(self.repo.as_ref(), &id, apply, profile_image).await?;
        Ok(CustomerResponse::from(saved))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), error::SystemError> {
        self.assets.delete_with_asset::<CustomerEntity, _>(self.repo.as_ref(), &id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::AssetOwnerRepository;
    use crate::modules::user::schema::UserEntity;
    use crate::test::{coordinator, sample_user, InMemoryRepository};

    fn date(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    fn new_customer(user_id: Uuid) -> CreateCustomerModel {
        CreateCustomerModel {
            user_name: "sara.b".to_string(),
            email: "sara@mail.test".to_string(),
            telephone: "0611223344".to_string(),
            start_date: date("2026-01-01"),
            end_date: date("2026-06-30"),
            pack: "Premium".to_string(),
            user_id,
            amount_paid: "300".to_string(),
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        customers: Arc<InMemoryRepository<CustomerEntity>>,
        coach_id: Uuid,
        service: CustomerService,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let customers = Arc::new(InMemoryRepository::<CustomerEntity>::default());
        let users = Arc::new(InMemoryRepository::<UserEntity>::default());
        let coach = users.save(&sample_user("coach.ali")).await.unwrap();
        let service =
            CustomerService::with_dependencies(customers.clone(), users, coordinator(dir.path()));
        Fixture { _dir: dir, customers, coach_id: coach.id, service }
    }

    #[tokio::test]
    async fn create_links_customer_to_coach() {
        let f = fixture().await;

        let customer = f
            .service
            .create(new_customer(f.coach_id), Some(Upload::new("sara.jpg", b"jpeg".to_vec())))
            .await
            .unwrap();

        assert_eq!(customer.user_id, f.coach_id);
        assert_eq!(customer.image_url.as_deref(), Some("/api/customers/images/sara.jpg"));
        let listed = f.service.list_by_user(f.coach_id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn create_for_unknown_coach_is_not_found() {
        let f = fixture().await;

        let err = f
            .service
            .create(new_customer(Uuid::now_v7()), Some(Upload::new("sara.jpg", b"jpeg".to_vec())))
            .await
            .unwrap_err();

        assert!(matches!(err, error::SystemError::NotFound(_)));
        assert!(f.customers.is_empty());
    }

    #[tokio::test]
    async fn period_must_not_end_before_it_starts() {
        let f = fixture().await;
        let mut model = new_customer(f.coach_id);
        model.end_date = date("2025-12-31");

        let err = f
            .service
            .create(model, Some(Upload::new("sara.jpg", b"jpeg".to_vec())))
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));

        let customer = f
            .service
            .create(new_customer(f.coach_id), Some(Upload::new("sara.jpg", b"jpeg".to_vec())))
            .await
            .unwrap();
        let update = UpdateCustomerModel {
            user_name: None,
            email: None,
            telephone: None,
            start_date: Some(date("2026-07-01")),
            end_date: None,
            pack: None,
            user_id: None,
            amount_paid: None,
        };
        let err = f.service.update(customer.id, update, None).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[tokio::test]
    async fn lookup_by_username_and_count() {
        let f = fixture().await;
        assert_eq!(f.service.count().await.unwrap(), 0);

        let customer = f
            .service
            .create(new_customer(f.coach_id), Some(Upload::new("sara.jpg", b"jpeg".to_vec())))
            .await
            .unwrap();

        assert_eq!(f.service.count().await.unwrap(), 1);
        assert_eq!(f.service.get_by_username("sara.b").await.unwrap().id, customer.id);
        let err = f.service.get_by_username("nobody").await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }
}
