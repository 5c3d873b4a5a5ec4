//! DTOs for mechanic endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::limits::{fits_email, fits_text};

use crate::domain::entities::{Mechanic, MechanicPatch, NewMechanic, RankedMechanic};
use crate::error::AppError;

/// Request body for `POST /mechanics`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMechanicRequest {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Missing data for required field."),
        email(message = "Not a valid email address."),
        custom(function = "fits_email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub specialization: Option<String>,

    #[validate(
        required(message = "Missing data for required field."),
        range(min = 0, message = "Must be greater than or equal to 0.")
    )]
    pub experience: Option<i32>,
}

impl CreateMechanicRequest {
    pub fn validated(self) -> Result<NewMechanic, AppError> {
        self.validate()?;

        Ok(NewMechanic {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            specialization: self.specialization.unwrap_or_default(),
            experience: self.experience.unwrap_or_default(),
        })
    }
}

/// Request body for `PUT /mechanics/{id}`. Only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMechanicRequest {
    #[validate(
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub name: Option<String>,

    #[validate(
        email(message = "Not a valid email address."),
        custom(function = "fits_email")
    )]
    pub email: Option<String>,

    #[validate(
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub specialization: Option<String>,

    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub experience: Option<i32>,
}

impl UpdateMechanicRequest {
    pub fn validated(self) -> Result<MechanicPatch, AppError> {
        self.validate()?;

        Ok(MechanicPatch {
            name: self.name,
            email: self.email,
            specialization: self.specialization,
            experience: self.experience,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MechanicResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub experience: i32,
}

impl From<Mechanic> for MechanicResponse {
    fn from(mechanic: Mechanic) -> Self {
        Self {
            id: mechanic.id,
            name: mechanic.name,
            email: mechanic.email,
            specialization: mechanic.specialization,
            experience: mechanic.experience,
        }
    }
}

/// A mechanic as listed by `GET /mechanics/ranking`.
#[derive(Debug, Serialize)]
pub struct RankedMechanicResponse {
    #[serde(flatten)]
    pub mechanic: MechanicResponse,
    pub ticket_count: i64,
}

impl From<RankedMechanic> for RankedMechanicResponse {
    fn from(ranked: RankedMechanic) -> Self {
        Self {
            mechanic: ranked.mechanic.into(),
            ticket_count: ranked.ticket_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_are_all_reported() {
        let req: CreateMechanicRequest = serde_json::from_value(json!({"name": "Bob"})).unwrap();

        match req.validated() {
            Err(AppError::Validation { fields }) => {
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("specialization"));
                assert!(fields.contains_key("experience"));
                assert!(!fields.contains_key("name"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_negative_experience_rejected() {
        let req: UpdateMechanicRequest =
            serde_json::from_value(json!({"experience": -1})).unwrap();
        assert!(req.validated().is_err());
    }

    #[test]
    fn test_ranked_response_is_flat() {
        let ranked = RankedMechanic {
            mechanic: Mechanic::new(1, "Bob".into(), "bob@shop.com".into(), "Brakes".into(), 4),
            ticket_count: 0,
        };

        let value = serde_json::to_value(RankedMechanicResponse::from(ranked)).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["ticket_count"], 0);
    }
}
