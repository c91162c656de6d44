use serde::{Deserialize, Serialize};
use crate::models::domain::{InteractionRecord, RankedProperty};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<RankedProperty>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Record interaction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInteractionResponse {
    pub success: bool,
    #[serde(rename = "interactionId")]
    pub interaction_id: String,
}

/// Interactions listing for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub interactions: Vec<InteractionRecord>,
    pub count: usize,
}
