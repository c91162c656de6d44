use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::RecommendationCriteria;

/// Request to rank properties for a criteria set
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub criteria: RecommendationCriteria,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(alias = "exclude_property_ids", rename = "excludePropertyIds", default)]
    pub exclude_property_ids: Vec<String>,
}

/// Request to score a single property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScorePropertyRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "property_id", rename = "propertyId")]
    pub property_id: String,
    #[serde(default)]
    pub criteria: RecommendationCriteria,
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Request to record a user interaction with a listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordInteractionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "property_id", rename = "propertyId")]
    pub property_id: String,
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_accepts_minimal_body() {
        let req: RecommendRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_id.is_none());
        assert!(req.limit.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_recommend_request_rejects_empty_user_id() {
        let req: RecommendRequest = serde_json::from_str(r#"{"userId": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_recommend_request_rejects_zero_limit() {
        let req: RecommendRequest = serde_json::from_str(r#"{"limit": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_interaction_request_snake_case_alias() {
        let req: RecordInteractionRequest = serde_json::from_str(
            r#"{"user_id": "u1", "property_id": "p1", "kind": "viewed"}"#,
        )
        .unwrap();
        assert_eq!(req.property_id, "p1");
        assert!(req.validate().is_ok());
    }
}
