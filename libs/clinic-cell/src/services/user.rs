use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use shared_database::{create_record, list_records, Collection, Filter, SharedStore};
use shared_models::UserId;
use shared_utils::validation::{normalize_email, require_non_blank};

use crate::models::{ClinicError, CreateUserRequest, User, UserQuery};

pub struct UserService {
    store: SharedStore,
    // Serializes the email check with the insert.
    registration: Mutex<()>,
}

impl UserService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            registration: Mutex::new(()),
        }
    }

    pub async fn create_user(&self, mut request: CreateUserRequest) -> Result<UserId, ClinicError> {
        require_non_blank("full_name", &request.full_name)?;
        request.email = normalize_email(&request.email)?;

        let _guard = self.registration.lock().await;

        if self.email_exists(&request.email).await? {
            warn!("Rejected user registration with duplicate email {}", request.email);
            return Err(ClinicError::DuplicateEmail(request.email));
        }

        let id = create_record(self.store.as_ref(), Collection::User, &request).await?;
        info!("User {} created with role {}", id, request.role);

        Ok(UserId::new(id))
    }

    pub async fn list_users(&self, query: UserQuery) -> Result<Vec<User>, ClinicError> {
        debug!("Listing users with {:?}", query);
        let filter = Filter::from_query(&query)?;
        Ok(list_records(self.store.as_ref(), Collection::User, &filter).await?)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, ClinicError> {
        let existing = self
            .store
            .find(Collection::User, &Filter::new().eq("email", email))
            .await?;
        Ok(!existing.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use shared_utils::test_utils::memory_store;

    fn request(email: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            full_name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            role,
            clinic_id: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn duplicate_check_ignores_case() {
        let service = UserService::new(memory_store());

        service
            .create_user(request("ada@clinic.io", UserRole::Doctor))
            .await
            .unwrap();
        let second = service
            .create_user(request("ADA@Clinic.io", UserRole::Patient))
            .await;

        assert!(matches!(second, Err(ClinicError::DuplicateEmail(email)) if email == "ada@clinic.io"));
    }

    #[tokio::test]
    async fn stored_email_is_normalized() {
        let service = UserService::new(memory_store());
        service
            .create_user(request("  Grace@Navy.MIL ", UserRole::Patient))
            .await
            .unwrap();

        let users = service.list_users(UserQuery::default()).await.unwrap();
        assert_eq!(users[0].email, "grace@navy.mil");
    }
}
