//! Mechanic lifecycle and ranking service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Mechanic, MechanicPatch, NewMechanic, RankedMechanic};
use crate::domain::repositories::MechanicRepository;
use crate::error::AppError;
use crate::utils::db_error::{MECHANICS_EMAIL_KEY, conflict_message};

/// Service for managing mechanics.
pub struct MechanicService<R: MechanicRepository> {
    repository: Arc<R>,
}

impl<R: MechanicRepository> MechanicService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a mechanic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if another mechanic already uses the email.
    pub async fn create(&self, new_mechanic: NewMechanic) -> Result<Mechanic, AppError> {
        self.ensure_email_free(&new_mechanic.email, None).await?;

        let mechanic = self.repository.create(new_mechanic).await?;
        info!(mechanic_id = mechanic.id, "Mechanic created");
        Ok(mechanic)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mechanic has that id.
    pub async fn get(&self, id: i64) -> Result<Mechanic, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Mechanic>, AppError> {
        self.repository.list().await
    }

    /// Every mechanic with the number of distinct tickets worked, busiest first.
    pub async fn ranking(&self) -> Result<Vec<RankedMechanic>, AppError> {
        self.repository.ranking().await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the mechanic does not exist.
    /// Returns [`AppError::Conflict`] if the new email belongs to another mechanic.
    pub async fn update(&self, id: i64, patch: MechanicPatch) -> Result<Mechanic, AppError> {
        let existing = self.get(id).await?;

        if let Some(email) = patch.email.as_deref()
            && email != existing.email
        {
            self.ensure_email_free(email, Some(id)).await?;
        }

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a mechanic and detaches it from every ticket.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the mechanic does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(mechanic_id = id, "Mechanic deleted");
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> Result<(), AppError> {
        match self.repository.find_by_email(email).await? {
            Some(other) if Some(other.id) != owner => Err(AppError::conflict(
                conflict_message(Some(MECHANICS_EMAIL_KEY)),
                json!({ "email": email }),
            )),
            _ => Ok(()),
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Mechanic not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMechanicRepository;

    fn create_test_mechanic(id: i64, email: &str) -> Mechanic {
        Mechanic::new(
            id,
            "Bob".to_string(),
            email.to_string(),
            "Brakes".to_string(),
            5,
        )
    }

    fn new_mechanic(email: &str) -> NewMechanic {
        NewMechanic {
            name: "Bob".to_string(),
            email: email.to_string(),
            specialization: "Brakes".to_string(),
            experience: 5,
        }
    }

    #[tokio::test]
    async fn test_create_mechanic_success() {
        let mut mock_repo = MockMechanicRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "bob@shop.com")
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(create_test_mechanic(1, "bob@shop.com")));

        let service = MechanicService::new(Arc::new(mock_repo));

        let mechanic = service.create(new_mechanic("bob@shop.com")).await.unwrap();

        assert_eq!(mechanic.id, 1);
    }

    #[tokio::test]
    async fn test_create_mechanic_duplicate_email() {
        let mut mock_repo = MockMechanicRepository::new();

        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(create_test_mechanic(1, "bob@shop.com"))));
        mock_repo.expect_create().times(0);

        let service = MechanicService::new(Arc::new(mock_repo));

        let result = service.create(new_mechanic("bob@shop.com")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_ranking_passes_through_order() {
        let mut mock_repo = MockMechanicRepository::new();

        mock_repo.expect_ranking().times(1).returning(|| {
            Ok(vec![
                RankedMechanic {
                    mechanic: create_test_mechanic(2, "b@shop.com"),
                    ticket_count: 3,
                },
                RankedMechanic {
                    mechanic: create_test_mechanic(1, "a@shop.com"),
                    ticket_count: 0,
                },
            ])
        });

        let service = MechanicService::new(Arc::new(mock_repo));

        let ranking = service.ranking().await.unwrap();

        assert_eq!(ranking[0].ticket_count, 3);
        assert_eq!(ranking[1].ticket_count, 0);
    }

    #[tokio::test]
    async fn test_update_missing_mechanic() {
        let mut mock_repo = MockMechanicRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().times(0);

        let service = MechanicService::new(Arc::new(mock_repo));

        let result = service.update(9, MechanicPatch::default()).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_mechanic() {
        let mut mock_repo = MockMechanicRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = MechanicService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.delete(9).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
