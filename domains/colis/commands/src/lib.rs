use colis_models::{ColisStatus, Priority};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateColisCommand {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Description must be between 1 and 255 characters"
    ))]
    pub description: String,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "Weight must be greater than 0 and at most 1000 kg"
    ))]
    pub weight_kg: f64,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Destination city must be between 1 and 100 characters"
    ))]
    pub destination_city: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Destination address must be between 1 and 255 characters"
    ))]
    pub destination_address: String,
    #[serde(default)]
    pub priority: Priority,
    pub zone_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateColisStatusCommand {
    #[serde(skip)]
    pub colis_id: Uuid,
    pub status: ColisStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteColisCommand {
    pub colis_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateColisCommand {
        CreateColisCommand {
            description: "Laptop".to_string(),
            weight_kg: 2.1,
            destination_city: "Paris".to_string(),
            destination_address: "10 avenue Foch".to_string(),
            priority: Priority::High,
            zone_id: None,
        }
    }

    #[test]
    fn test_valid_command_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let command = CreateColisCommand {
            weight_kg: 0.0,
            ..valid()
        };
        let errors = command.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("weight_kg"));
    }

    #[test]
    fn test_several_invalid_fields_are_all_collected() {
        let command = CreateColisCommand {
            description: String::new(),
            destination_city: String::new(),
            ..valid()
        };
        let errors = command.validate().unwrap_err();

        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_priority_defaults_to_normal() {
        let command: CreateColisCommand = serde_json::from_value(
            serde_json::json!({
                "description": "Shoes",
                "weight_kg": 1.0,
                "destination_city": "Lille",
                "destination_address": "2 rue Nationale"
            }),
        )
        .unwrap();

        assert_eq!(command.priority, Priority::Normal);
        assert!(command.zone_id.is_none());
    }
}
