//! Group domain models for shared expense groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A shared expense-tracking group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub currency_symbol: String,
    pub terms: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    #[validate(custom(function = "shared::validation::validate_currency_symbol"))]
    pub currency_symbol: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Terms must be at most 2000 characters"))]
    pub terms: String,
}

/// Request payload for updating a group.
///
/// Updates replace all mutable fields at once.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateGroupRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    #[validate(custom(function = "shared::validation::validate_currency_symbol"))]
    pub currency_symbol: String,

    #[validate(length(max = 2000, message = "Terms must be at most 2000 characters"))]
    pub terms: String,
}

/// Response for listing groups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListGroupsResponse {
    pub data: Vec<Group>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_request() -> CreateGroupRequest {
        CreateGroupRequest {
            name: "Flat 7b".to_string(),
            description: "Groceries and rent".to_string(),
            currency_symbol: "€".to_string(),
            terms: String::new(),
        }
    }

    #[test]
    fn test_create_request_valid() {
        assert!(valid_create_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_empty_name() {
        let mut request = valid_create_request();
        request.name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_name_too_long() {
        let mut request = valid_create_request();
        request.name = "x".repeat(101);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_bad_currency_symbol() {
        let mut request = valid_create_request();
        request.currency_symbol = String::new();
        assert!(request.validate().is_err());

        request.currency_symbol = "E UR".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_defaults_from_json() {
        let request: CreateGroupRequest =
            serde_json::from_str(r#"{"name": "Trip", "currency_symbol": "$"}"#).unwrap();
        assert!(request.description.is_empty());
        assert!(request.terms.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_requires_all_fields() {
        let result: Result<UpdateGroupRequest, _> =
            serde_json::from_str(r#"{"name": "Trip", "currency_symbol": "$"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_group_serialization_roundtrip() {
        let group = Group {
            id: 1,
            name: "Flat 7b".to_string(),
            description: String::new(),
            currency_symbol: "€".to_string(),
            terms: String::new(),
            created_by: Some(9),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&group).unwrap();
        assert!(json.contains("\"currency_symbol\":\"€\""));
        let back: Group = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 1);
        assert_eq!(back.created_by, Some(9));
    }
}
