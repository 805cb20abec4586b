use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{EventCategory, Gender};

/// Request payload for creating a new event (stage 1).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub category: EventCategory,

    pub gender: Gender,

    pub date: NaiveDate,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Venue must be between 1 and 255 characters"
    ))]
    pub venue: String,

    /// Overrides the championship policy for this event when set.
    #[serde(default)]
    pub points_eligible: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateEventRequest {
        CreateEventRequest {
            name: name.to_string(),
            category: EventCategory::Track,
            gender: Gender::Male,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            venue: "Main Stadium".to_string(),
            points_eligible: None,
        }
    }

    #[test]
    fn test_create_request_accepts_valid_payload() {
        assert!(request("100m Sprint").validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_name() {
        assert!(request("").validate().is_err());
    }
}
