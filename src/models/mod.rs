// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogQuery, FactorScores, InteractionKind, InteractionRecord, InteractionSignals, Property,
    RankedProperty, RecommendationCriteria, RecommendationScore, ScoringWeights,
};
pub use requests::{RecommendRequest, RecordInteractionRequest, ScorePropertyRequest};
pub use responses::{
    ErrorResponse, HealthResponse, InteractionsResponse, RecommendResponse,
    RecordInteractionResponse,
};
